//! Genesis block generation
//!
//! The genesis block has no real predecessor: index 0, previous hash `"0"`
//! and a fixed marker payload. Its timestamp is the moment the ledger is
//! first created, so genesis hashes differ between ledgers.

use super::{Block, Timestamp};
use crate::constants::{GENESIS_DATA_KEY, GENESIS_DATA_VALUE, GENESIS_PREVIOUS_HASH};
use crate::payload::{payload_of, Payload};

/// Marker payload carried by every genesis block
pub fn genesis_payload() -> Payload {
    payload_of([(GENESIS_DATA_KEY, GENESIS_DATA_VALUE)])
}

/// Create the genesis block stamped with the given time
pub fn create_genesis_block(timestamp: Timestamp) -> Block {
    Block::new(0, timestamp, genesis_payload(), GENESIS_PREVIOUS_HASH)
}
