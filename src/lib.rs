//! Report Card Chain Core Library
//!
//! An append-only, tamper-evident ledger of school report-card entries.
//! Every block commits to its predecessor's SHA-256 hash; recomputing the
//! hashes reveals any later edit to stored entries.

pub mod chain;
pub mod config;
pub mod crypto;
pub mod error;
pub mod explorer;
pub mod node;
pub mod payload;
pub mod rpc;
pub mod storage;

pub use chain::{Block, Chain, Timestamp, ValidationReport};
pub use error::{LedgerError, Result};
pub use node::{LedgerSession, ReportCardEntry};
pub use payload::{Payload, Value};
pub use storage::{ChainStore, JsonFileStore, MemoryStore, SledStore};

/// Ledger constants - fixed by the on-disk format
pub mod constants {
    /// Chain name shown by the node and explorer
    pub const CHAIN_NAME: &str = "School Report Card Chain";

    /// Previous hash carried by the genesis block
    pub const GENESIS_PREVIOUS_HASH: &str = "0";

    /// Genesis marker payload key
    pub const GENESIS_DATA_KEY: &str = "Genesis";

    /// Genesis marker payload value
    pub const GENESIS_DATA_VALUE: &str = "Block";

    /// Default ledger file name
    pub const DEFAULT_LEDGER_PATH: &str = "blockchain.json";

    /// Entry payload field names
    pub const FIELD_STUDENT: &str = "student";
    pub const FIELD_SUBJECT: &str = "subject";
    pub const FIELD_GRADE: &str = "grade";
    pub const FIELD_TIMESTAMP: &str = "timestamp";
}
