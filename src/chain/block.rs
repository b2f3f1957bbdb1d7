//! Block structure for the report-card ledger
//!
//! A block is immutable: its hash is computed once in [`Block::new`] and
//! never touched again. Persisted blocks come back through [`BlockRecord`],
//! which trusts the stored hash rather than recomputing it.

use serde::{Deserialize, Serialize};

use super::Timestamp;
use crate::constants::GENESIS_PREVIOUS_HASH;
use crate::crypto::{canonical_json, hash_parts};
use crate::error::{LedgerError, Result};
use crate::payload::Payload;

/// One ledger entry linked to its predecessor by hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BlockRecord", into = "BlockRecord")]
pub struct Block {
    index: u64,
    timestamp: Timestamp,
    data: Payload,
    previous_hash: String,
    hash: String,
}

/// Plain keyed form of a block as it appears on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub index: u64,
    /// ISO-8601 string
    pub timestamp: String,
    pub data: Payload,
    pub previous_hash: String,
    pub hash: String,
}

impl Block {
    /// Create a block and compute its hash
    pub fn new(index: u64, timestamp: Timestamp, data: Payload, previous_hash: impl Into<String>) -> Self {
        let previous_hash = previous_hash.into();
        let hash = Self::compute_hash(index, &timestamp, &data, &previous_hash);
        Self {
            index,
            timestamp,
            data,
            previous_hash,
            hash,
        }
    }

    /// SHA-256 over index, timestamp, canonical data and previous hash, hex encoded
    pub fn compute_hash(index: u64, timestamp: &Timestamp, data: &Payload, previous_hash: &str) -> String {
        let index = index.to_string();
        let timestamp = timestamp.hash_repr();
        let data = canonical_json(data);
        hash_parts(&[
            index.as_bytes(),
            timestamp.as_bytes(),
            data.as_bytes(),
            previous_hash.as_bytes(),
        ])
        .to_hex()
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn data(&self) -> &Payload {
        &self.data
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    /// Stored hash
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Hash the block's current fields would produce
    pub fn recompute_hash(&self) -> String {
        Self::compute_hash(self.index, &self.timestamp, &self.data, &self.previous_hash)
    }

    /// Check if the stored hash still matches the block contents
    pub fn has_valid_hash(&self) -> bool {
        self.recompute_hash() == self.hash
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }

    pub fn to_record(&self) -> BlockRecord {
        BlockRecord {
            index: self.index,
            timestamp: self.timestamp.to_iso(),
            data: self.data.clone(),
            previous_hash: self.previous_hash.clone(),
            hash: self.hash.clone(),
        }
    }

    /// Rebuild a block from its record without re-verifying the hash
    pub fn from_record(record: BlockRecord) -> Result<Self> {
        let timestamp = Timestamp::parse_iso(&record.timestamp)?;
        Ok(Self {
            index: record.index,
            timestamp,
            data: record.data,
            previous_hash: record.previous_hash,
            hash: record.hash,
        })
    }
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        BlockRecord {
            index: block.index,
            timestamp: block.timestamp.to_iso(),
            data: block.data,
            previous_hash: block.previous_hash,
            hash: block.hash,
        }
    }
}

impl TryFrom<BlockRecord> for Block {
    type Error = LedgerError;

    fn try_from(record: BlockRecord) -> Result<Self> {
        Block::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::payload_of;

    fn entry() -> Payload {
        payload_of([("student", "Ana"), ("subject", "Math"), ("grade", "A")])
    }

    fn ts() -> Timestamp {
        Timestamp::parse_iso("2024-01-01T00:00:00.000001").unwrap()
    }

    #[test]
    fn test_hash_matches_reference_digest() {
        // sha256("1" + "2024-01-01 00:00:00.000001" + canonical data + "0")
        let block = Block::new(1, ts(), entry(), "0");
        let expected = hash_parts(&[
            b"1",
            b"2024-01-01 00:00:00.000001",
            br#"{"grade": "A", "student": "Ana", "subject": "Math"}"#,
            b"0",
        ])
        .to_hex();
        assert_eq!(block.hash(), expected);
        assert_eq!(block.hash().len(), 64);
    }

    #[test]
    fn test_hash_covers_every_field() {
        let base = Block::new(1, ts(), entry(), "abc");
        let later = Timestamp::parse_iso("2024-01-01T00:00:01").unwrap();
        let mut other_data = entry();
        other_data.insert("grade".into(), "B".into());

        assert_ne!(base.hash(), Block::new(2, ts(), entry(), "abc").hash());
        assert_ne!(base.hash(), Block::new(1, later, entry(), "abc").hash());
        assert_ne!(base.hash(), Block::new(1, ts(), other_data, "abc").hash());
        assert_ne!(base.hash(), Block::new(1, ts(), entry(), "abd").hash());
    }

    #[test]
    fn test_record_roundtrip() {
        let block = Block::new(3, ts(), entry(), "f00d");
        let json = serde_json::to_string(&block).unwrap();
        let restored: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, block);
    }

    #[test]
    fn test_record_field_layout() {
        let block = Block::new(0, ts(), entry(), "0");
        let value = serde_json::to_value(&block).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert_eq!(obj["index"], 0);
        assert_eq!(obj["timestamp"], "2024-01-01T00:00:00.000001");
        assert_eq!(obj["previous_hash"], "0");
        assert_eq!(obj["hash"], block.hash());
    }

    #[test]
    fn test_deserialize_trusts_stored_hash() {
        let mut record = Block::new(1, ts(), entry(), "0").to_record();
        record.hash = "not-a-real-hash".into();
        let block = Block::from_record(record).unwrap();
        assert_eq!(block.hash(), "not-a-real-hash");
        assert!(!block.has_valid_hash());
    }

    #[test]
    fn test_deserialize_missing_field() {
        let json = r#"{"index": 1, "timestamp": "2024-01-01T00:00:00", "data": {}, "previous_hash": "0"}"#;
        assert!(serde_json::from_str::<Block>(json).is_err());
    }

    #[test]
    fn test_deserialize_bad_timestamp() {
        let mut record = Block::new(1, ts(), entry(), "0").to_record();
        record.timestamp = "01/01/2024".into();
        assert!(matches!(Block::from_record(record), Err(LedgerError::Format(_))));
    }

    #[test]
    fn test_deserialize_rejects_offset_timestamp() {
        let mut record = Block::new(1, ts(), entry(), "0").to_record();
        record.timestamp = "2024-01-01T02:00:00.000001+02:00".into();
        assert!(matches!(Block::from_record(record), Err(LedgerError::Format(_))));
    }

    #[test]
    fn test_genesis_detection() {
        assert!(Block::new(0, ts(), Payload::new(), "0").is_genesis());
        assert!(!Block::new(1, ts(), Payload::new(), "0").is_genesis());
    }
}
