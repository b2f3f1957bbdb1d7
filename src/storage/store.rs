//! Persistence interface and the shared ledger encoding
//!
//! Every backend stores the chain as the same JSON record array, so a ledger
//! can move between backends without conversion.

use serde::Serialize;

use crate::chain::{Block, Chain};
use crate::error::{LedgerError, Result};

/// Durable owner of the chain between runs
pub trait ChainStore {
    /// Read the persisted chain.
    ///
    /// `Ok(None)` when nothing has been stored yet, [`LedgerError::Format`]
    /// when stored content is not a ledger. Hash linkage is not re-checked.
    fn load(&self) -> Result<Option<Chain>>;

    /// Replace the persisted chain with `chain`
    fn save(&mut self, chain: &Chain) -> Result<()>;

    /// Human-readable location for log lines
    fn describe(&self) -> String;
}

impl<S: ChainStore + ?Sized> ChainStore for Box<S> {
    fn load(&self) -> Result<Option<Chain>> {
        (**self).load()
    }

    fn save(&mut self, chain: &Chain) -> Result<()> {
        (**self).save(chain)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Serialize blocks as a pretty-printed JSON array with 4-space indentation
pub fn encode_chain(chain: &Chain) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    chain
        .blocks()
        .serialize(&mut serializer)
        .map_err(|e| LedgerError::Serialization(e.to_string()))?;
    Ok(buf)
}

/// Parse a JSON record array back into a chain, preserving array order
pub fn decode_chain(bytes: &[u8]) -> Result<Chain> {
    let blocks: Vec<Block> = serde_json::from_slice(bytes)?;
    decode_blocks(blocks)
}

pub(crate) fn decode_blocks(blocks: Vec<Block>) -> Result<Chain> {
    Chain::from_blocks(blocks)
        .map_err(|_| LedgerError::Format("ledger contains no blocks".to_string()))
}
