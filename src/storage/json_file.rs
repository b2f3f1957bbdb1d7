//! JSON file backend
//!
//! The whole chain lives in one file. Saves go to a sibling temporary file
//! that is synced and renamed over the target, so readers never observe a
//! half-written ledger.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{decode_chain, encode_chain, ChainStore};
use crate::chain::Chain;
use crate::error::Result;

/// Ledger stored as a single JSON array file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ChainStore for JsonFileStore {
    fn load(&self) -> Result<Option<Chain>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let chain = decode_chain(&bytes)?;
        tracing::debug!(path = %self.path.display(), blocks = chain.len(), "Ledger file read");
        Ok(Some(chain))
    }

    fn save(&mut self, chain: &Chain) -> Result<()> {
        let bytes = encode_chain(chain)?;
        write_atomic(&self.path, &self.temp_path(), &bytes)?;
        tracing::debug!(path = %self.path.display(), blocks = chain.len(), "Ledger file written");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

fn write_atomic(path: &Path, temp: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let result = (|| {
        let mut file = File::create(temp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(temp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(temp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::payload::payload_of;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("blockchain.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("blockchain.json"));

        let mut chain = Chain::genesis();
        chain.append(payload_of([("student", "Ana"), ("grade", "A")]));
        store.save(&chain).unwrap();

        assert_eq!(store.load().unwrap(), Some(chain));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("blockchain.json"));

        let mut chain = Chain::genesis();
        chain.append(payload_of([("n", 1i64)]));
        chain.append(payload_of([("n", 2i64)]));
        store.save(&chain).unwrap();

        let short = Chain::genesis();
        store.save(&short).unwrap();
        assert_eq!(store.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blockchain.json");
        fs::write(&path, "[{\"index\": 0,").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(LedgerError::Format(_))));
    }

    #[test]
    fn test_save_into_unwritable_location_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "plain file").unwrap();
        let mut store = JsonFileStore::new(blocker.join("blockchain.json"));
        assert!(matches!(store.save(&Chain::genesis()), Err(LedgerError::Storage(_))));
    }
}
