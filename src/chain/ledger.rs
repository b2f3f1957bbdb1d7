//! In-memory chain
//!
//! Holds the ordered blocks and grows only by appending to the tail.

use super::{create_genesis_block, validate_chain, Block, Timestamp, ValidationReport};
use crate::error::{LedgerError, Result};
use crate::payload::Payload;

/// Ordered, hash-linked sequence of blocks; never empty
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// Fresh chain holding only a genesis block stamped now
    pub fn genesis() -> Self {
        Self::genesis_at(Timestamp::now())
    }

    pub fn genesis_at(timestamp: Timestamp) -> Self {
        Self {
            blocks: vec![create_genesis_block(timestamp)],
        }
    }

    /// Wrap previously persisted blocks as-is; linkage is not re-checked
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        if blocks.is_empty() {
            return Err(LedgerError::EmptyChain);
        }
        Ok(Self { blocks })
    }

    /// Append a block stamped now and return it
    pub fn append(&mut self, data: Payload) -> &Block {
        self.append_at(data, Timestamp::now())
    }

    /// Append a block with an explicit timestamp
    pub fn append_at(&mut self, data: Payload, timestamp: Timestamp) -> &Block {
        let tail = self.tail();
        let block = Block::new(tail.index() + 1, timestamp, data, tail.hash());
        tracing::debug!(index = block.index(), hash = %block.hash(), "Block appended");
        self.blocks.push(block);
        self.tail()
    }

    /// Last block in the chain
    pub fn tail(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn genesis_block(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn get(&self, position: usize) -> Option<&Block> {
        self.blocks.get(position)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Recompute every hash and check linkage
    pub fn validate(&self) -> ValidationReport {
        validate_chain(&self.blocks)
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}
