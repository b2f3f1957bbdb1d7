//! Block timestamps
//!
//! Naive UTC instants at microsecond precision. Two textual forms exist: the
//! ISO-8601 form stored on disk (`2024-01-01T08:30:00.250000`) and the hash
//! form fed into the block digest (`2024-01-01 08:30:00.250000`). Both drop
//! the fraction entirely when it is zero.

use chrono::{NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{LedgerError, Result};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Creation instant of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Current wall-clock time
    pub fn now() -> Self {
        Self::from_naive(Utc::now().naive_utc())
    }

    /// Wrap a naive UTC datetime, dropping sub-microsecond precision
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        let nanos = datetime.nanosecond() / 1_000 * 1_000;
        Timestamp(datetime.with_nanosecond(nanos).unwrap_or(datetime))
    }

    /// Parse a naive ISO-8601 timestamp.
    ///
    /// Accepts `T` or space separators and an optional fraction. Offsets such
    /// as `+02:00` or `Z` are a format error.
    pub fn parse_iso(text: &str) -> Result<Self> {
        let text = text.trim();
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(Self::from_naive)
            .ok_or_else(|| LedgerError::Format(format!("invalid ISO-8601 timestamp {text:?}")))
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn micros(&self) -> u32 {
        self.0.nanosecond() / 1_000
    }

    /// ISO-8601 form used in persisted records
    pub fn to_iso(&self) -> String {
        self.render('T')
    }

    /// Form used as block hash input
    pub fn hash_repr(&self) -> String {
        self.render(' ')
    }

    fn render(&self, separator: char) -> String {
        let mut out = self.0.format("%Y-%m-%d").to_string();
        out.push(separator);
        out.push_str(&self.0.format("%H:%M:%S").to_string());
        let micros = self.micros();
        if micros != 0 {
            out.push_str(&format!(".{:06}", micros));
        }
        out
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse_iso(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, micro: u32) -> Timestamp {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap();
        Timestamp::from_naive(dt)
    }

    #[test]
    fn test_iso_and_hash_forms() {
        let ts = at(8, 30, 0, 250_000);
        assert_eq!(ts.to_iso(), "2024-01-01T08:30:00.250000");
        assert_eq!(ts.hash_repr(), "2024-01-01 08:30:00.250000");
    }

    #[test]
    fn test_zero_fraction_is_omitted() {
        let ts = at(0, 0, 0, 0);
        assert_eq!(ts.to_iso(), "2024-01-01T00:00:00");
        assert_eq!(ts.hash_repr(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_parse_variants() {
        let expected = at(8, 30, 0, 250_000);
        assert_eq!(Timestamp::parse_iso("2024-01-01T08:30:00.250000").unwrap(), expected);
        assert_eq!(Timestamp::parse_iso("2024-01-01 08:30:00.25").unwrap(), expected);
        assert_eq!(Timestamp::parse_iso("2024-01-01T00:00:00").unwrap(), at(0, 0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Timestamp::parse_iso("yesterday"), Err(LedgerError::Format(_))));
        assert!(Timestamp::parse_iso("2024-13-01T00:00:00").is_err());
    }

    #[test]
    fn test_parse_rejects_offsets() {
        for text in ["2024-01-01T10:30:00.25+02:00", "2024-01-01T08:30:00Z", "2024-01-01 08:30:00-05:00"] {
            assert!(
                matches!(Timestamp::parse_iso(text), Err(LedgerError::Format(_))),
                "accepted {}",
                text
            );
        }
    }

    #[test]
    fn test_now_has_microsecond_precision() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_naive().nanosecond() % 1_000, 0);
        assert_eq!(Timestamp::parse_iso(&ts.to_iso()).unwrap(), ts);
    }
}
