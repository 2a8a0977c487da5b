//! # Hashing
//!
//! Keccak-256 helpers. Every digest in the wallet (credential id hashes,
//! namespace roots, signed messages, deployment addresses) goes through here.

use crate::value_objects::Hash;
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    Hash::new(Keccak256::digest(data).into())
}

/// Keccak-256 of the concatenation of `parts`, without an intermediate buffer.
#[must_use]
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    Hash::new(hasher.finalize().into())
}
