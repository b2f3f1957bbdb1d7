//! SHA-256 hashing
//!
//! Block hashes are SHA-256 digests. On disk and over RPC they travel as
//! lowercase hex strings; [`Digest`] is only the in-flight form.

use sha2::{Digest as _, Sha256};
use std::fmt;

/// 32-byte SHA-256 output
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Lowercase hex, 64 characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// SHA-256 of a single byte string
pub fn hash_bytes(data: &[u8]) -> Digest {
    hash_parts(&[data])
}

/// SHA-256 of the concatenation of `parts`, fed to the hasher piecewise
pub fn hash_parts(parts: &[&[u8]]) -> Digest {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    Digest(out)
}
