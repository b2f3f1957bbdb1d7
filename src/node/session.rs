//! Ledger session
//!
//! Owns the in-memory chain together with the store that persists it. The
//! presentation layer holds one session per ledger and routes every read and
//! write through it.

use serde::Serialize;

use super::ReportCardEntry;
use crate::chain::{Block, Chain, Timestamp, ValidationReport};
use crate::error::{LedgerError, Result};
use crate::payload::Payload;
use crate::storage::ChainStore;

/// Chain plus its persistence store
#[derive(Debug)]
pub struct LedgerSession<S: ChainStore> {
    chain: Chain,
    store: S,
}

/// Summary figures about the ledger
#[derive(Debug, Clone, Serialize)]
pub struct LedgerStats {
    pub blocks: usize,
    pub entries: usize,
    pub tip_hash: String,
    pub genesis_hash: String,
    pub last_updated: String,
}

impl<S: ChainStore> LedgerSession<S> {
    /// Load the persisted chain or start a genesis-only one.
    ///
    /// Missing or unreadable ledgers are not fatal; any other storage error is.
    pub fn open(store: S) -> Result<Self> {
        let chain = match store.load() {
            Ok(Some(chain)) => {
                tracing::info!(blocks = chain.len(), "Loaded existing ledger from {}", store.describe());
                chain
            }
            Ok(None) => {
                tracing::info!("No ledger found in {}; starting with genesis block", store.describe());
                Chain::genesis()
            }
            Err(LedgerError::Format(reason)) => {
                tracing::warn!(%reason, "Ledger in {} is unreadable; starting with genesis block", store.describe());
                Chain::genesis()
            }
            Err(e) => return Err(e),
        };

        Ok(Self { chain, store })
    }

    /// Validate an entry, append it and persist the chain.
    ///
    /// Invalid entries never reach the chain. If persisting fails the block
    /// stays in memory and the storage error is returned; a later successful
    /// save writes it out.
    pub fn submit(&mut self, entry: &ReportCardEntry) -> Result<&Block> {
        if let Err(e) = entry.validate() {
            tracing::info!("Entry rejected: {}", e);
            return Err(e);
        }
        let now = Timestamp::now();
        self.append_at(entry.to_payload(now), now)
    }

    /// Append arbitrary payload data and persist the chain
    pub fn append(&mut self, data: Payload) -> Result<&Block> {
        self.append_at(data, Timestamp::now())
    }

    fn append_at(&mut self, data: Payload, timestamp: Timestamp) -> Result<&Block> {
        let index = self.chain.append_at(data, timestamp).index();
        if let Err(e) = self.store.save(&self.chain) {
            tracing::error!(index, "Block appended but ledger not saved: {}", e);
            return Err(e);
        }
        tracing::info!(index, hash = %self.chain.tail().hash(), "Entry added to ledger");
        Ok(self.chain.tail())
    }

    /// Persist the current in-memory chain
    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.chain)
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// All blocks in chain order
    pub fn list_blocks(&self) -> &[Block] {
        self.chain.blocks()
    }

    pub fn block(&self, position: usize) -> Option<&Block> {
        self.chain.get(position)
    }

    pub fn tail(&self) -> &Block {
        self.chain.tail()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn validate(&self) -> ValidationReport {
        self.chain.validate()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            blocks: self.chain.len(),
            entries: self.chain.len() - 1,
            tip_hash: self.chain.tail().hash().to_string(),
            genesis_hash: self.chain.genesis_block().hash().to_string(),
            last_updated: self.chain.tail().timestamp().to_iso(),
        }
    }
}
