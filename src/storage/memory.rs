//! In-memory backend
//!
//! Keeps the encoded ledger bytes rather than the chain itself, so load and
//! save exercise the same encoding as the durable backends.

use super::{decode_chain, encode_chain, ChainStore};
use crate::chain::Chain;
use crate::error::Result;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    contents: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-existing raw content
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(bytes.into()),
        }
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }
}

impl ChainStore for MemoryStore {
    fn load(&self) -> Result<Option<Chain>> {
        self.contents.as_deref().map(decode_chain).transpose()
    }

    fn save(&mut self, chain: &Chain) -> Result<()> {
        self.contents = Some(encode_chain(chain)?);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
