//! Block and chain validation
//!
//! Pure functions that recompute hashes and check linkage. Loading a ledger
//! never calls these; tamper detection happens only when a caller asks.

use serde::Serialize;
use thiserror::Error;

use super::Block;
use crate::constants::GENESIS_PREVIOUS_HASH;

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Genesis block has index {0}, expected 0")]
    InvalidGenesisIndex(u64),
    #[error("Genesis block previous hash is {0:?}, expected \"0\"")]
    InvalidGenesisPrevHash(String),
    #[error("Index discontinuity: expected {expected}, found {found}")]
    IndexDiscontinuity { expected: u64, found: u64 },
    #[error("Invalid previous hash: expected {expected}, found {found}")]
    InvalidPrevHash { expected: String, found: String },
    #[error("Stored hash {stored} does not match recomputed {computed}")]
    HashMismatch { stored: String, computed: String },
}

impl ValidationError {
    /// Short machine-readable tag
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidGenesisIndex(_) => "genesis_index",
            ValidationError::InvalidGenesisPrevHash(_) => "genesis_previous_hash",
            ValidationError::IndexDiscontinuity { .. } => "index_discontinuity",
            ValidationError::InvalidPrevHash { .. } => "previous_hash_mismatch",
            ValidationError::HashMismatch { .. } => "hash_mismatch",
        }
    }
}

/// A validation failure pinned to a chain position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainViolation {
    pub position: usize,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip)]
    pub error: ValidationError,
}

impl ChainViolation {
    fn new(position: usize, error: ValidationError) -> Self {
        Self {
            position,
            kind: error.kind(),
            message: error.to_string(),
            error,
        }
    }
}

/// Chain validation result
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Number of blocks inspected
    pub length: usize,
    /// Stored hash of the last block
    pub tip_hash: Option<String>,
    pub violations: Vec<ChainViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Positions that carry at least one violation, ascending
    pub fn flagged_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self.violations.iter().map(|v| v.position).collect();
        positions.dedup();
        positions
    }

    pub fn violations_at(&self, position: usize) -> impl Iterator<Item = &ChainViolation> {
        self.violations.iter().filter(move |v| v.position == position)
    }
}

/// Validate one block against its predecessor (`None` for the first block)
pub fn validate_block(block: &Block, previous: Option<&Block>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match previous {
        None => {
            if block.index() != 0 {
                errors.push(ValidationError::InvalidGenesisIndex(block.index()));
            }
            if block.previous_hash() != GENESIS_PREVIOUS_HASH {
                errors.push(ValidationError::InvalidGenesisPrevHash(
                    block.previous_hash().to_string(),
                ));
            }
        }
        Some(prev) => {
            let expected = prev.index().wrapping_add(1);
            if block.index() != expected {
                errors.push(ValidationError::IndexDiscontinuity {
                    expected,
                    found: block.index(),
                });
            }
            if block.previous_hash() != prev.hash() {
                errors.push(ValidationError::InvalidPrevHash {
                    expected: prev.hash().to_string(),
                    found: block.previous_hash().to_string(),
                });
            }
        }
    }

    let computed = block.recompute_hash();
    if computed != block.hash() {
        errors.push(ValidationError::HashMismatch {
            stored: block.hash().to_string(),
            computed,
        });
    }

    errors
}

/// Validate a whole chain, collecting every violation instead of stopping at the first
pub fn validate_chain(blocks: &[Block]) -> ValidationReport {
    let mut violations = Vec::new();

    for (position, block) in blocks.iter().enumerate() {
        let previous = position.checked_sub(1).map(|p| &blocks[p]);
        for error in validate_block(block, previous) {
            violations.push(ChainViolation::new(position, error));
        }
    }

    for v in &violations {
        tracing::warn!(position = v.position, "{}", v.message);
    }

    ValidationReport {
        length: blocks.len(),
        tip_hash: blocks.last().map(|b| b.hash().to_string()),
        violations,
    }
}
