//! Database persistence layer using Sled
//!
//! Blocks are stored one record per key, keyed by big-endian chain position
//! so that tree iteration yields chain order. Records use the same JSON form
//! as the ledger file.

use sled::{Batch, Db, Tree};
use std::path::Path;

use super::store::decode_blocks;
use super::ChainStore;
use crate::chain::{Block, Chain};
use crate::error::{LedgerError, Result};

/// Database wrapper
#[derive(Debug, Clone)]
pub struct SledStore {
    db: Db,
    blocks_tree: Tree,
    metadata_tree: Tree,
}

const TIP_KEY: &str = "tip_hash";
const HEIGHT_KEY: &str = "height";

fn position_key(position: u64) -> [u8; 8] {
    position.to_be_bytes()
}

impl SledStore {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let db = sled::open(path)?;
        let blocks_tree = db.open_tree("blocks")?;
        let metadata_tree = db.open_tree("metadata")?;

        Ok(Self {
            db,
            blocks_tree,
            metadata_tree,
        })
    }

    /// Load chain metadata: tip hash and number of blocks
    pub fn load_metadata(&self) -> std::io::Result<Option<(String, u64)>> {
        let tip_bytes = self.metadata_tree.get(TIP_KEY)?;
        let height_bytes = self.metadata_tree.get(HEIGHT_KEY)?;

        if let (Some(tip), Some(height)) = (tip_bytes, height_bytes) {
            if height.len() != 8 {
                return Ok(None);
            }
            let mut h_bytes = [0u8; 8];
            h_bytes.copy_from_slice(&height);

            Ok(Some((
                String::from_utf8_lossy(&tip).into_owned(),
                u64::from_be_bytes(h_bytes),
            )))
        } else {
            Ok(None)
        }
    }
}

impl ChainStore for SledStore {
    fn load(&self) -> Result<Option<Chain>> {
        if self.blocks_tree.is_empty() {
            return Ok(None);
        }

        let mut blocks = Vec::with_capacity(self.blocks_tree.len());
        for item in self.blocks_tree.iter() {
            let (key, value) = item?;
            let block: Block = serde_json::from_slice(&value).map_err(|e| {
                LedgerError::Format(format!("record at key {}: {}", hex::encode(&key), e))
            })?;
            blocks.push(block);
        }

        decode_blocks(blocks).map(Some)
    }

    fn save(&mut self, chain: &Chain) -> Result<()> {
        let mut batch = Batch::default();

        for (position, block) in chain.blocks().iter().enumerate() {
            let value =
                serde_json::to_vec(block).map_err(|e| LedgerError::Serialization(e.to_string()))?;
            batch.insert(&position_key(position as u64)[..], value);
        }

        // Drop records beyond the new length so the stored chain is replaced, not merged
        let first_stale = position_key(chain.len() as u64);
        for item in self.blocks_tree.range(first_stale..) {
            let (key, _) = item?;
            batch.remove(key);
        }

        self.blocks_tree.apply_batch(batch)?;
        self.metadata_tree.insert(TIP_KEY, chain.tail().hash().as_bytes())?;
        self.metadata_tree
            .insert(HEIGHT_KEY, &(chain.len() as u64).to_be_bytes()[..])?;
        self.db.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        "sled database".to_string()
    }
}
