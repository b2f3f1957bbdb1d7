//! Cryptography module - SHA-256 hashing and canonical payload encoding

mod canonical;
mod hash;

pub use canonical::*;
pub use hash::*;
