//! Ledger error type
//!
//! Every fallible ledger operation reports one of these variants.

use thiserror::Error;

/// Errors raised by block construction, persistence and the entry workflow
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Payload cannot be represented as canonical JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Persisted record is missing fields or carries malformed values
    #[error("Malformed ledger record: {0}")]
    Format(String),
    /// Durable storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    /// Submitted entry is missing a required field
    #[error("Please fill all fields before submitting ({field} is empty)")]
    InvalidEntry { field: &'static str },
    /// A chain must always hold at least the genesis block
    #[error("Chain must contain at least one block")]
    EmptyChain,
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Format(err.to_string())
    }
}

impl From<sled::Error> for LedgerError {
    fn from(err: sled::Error) -> Self {
        LedgerError::Storage(err.into())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;
