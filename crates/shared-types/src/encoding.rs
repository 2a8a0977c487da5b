//! # Word Encoding
//!
//! Builds messages as a flat sequence of 32-byte big-endian words, the same
//! layout a static ABI tuple encoding produces. Signed messages and challenges
//! are always built with this encoder so that every field occupies exactly
//! one word and no two field sequences can collide.

use crate::hashing::keccak256;
use crate::value_objects::{Address, Hash, Word, U256};

/// Incremental word encoder.
#[derive(Debug, Default, Clone)]
pub struct WordEncoder {
    buf: Vec<u8>,
}

impl WordEncoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with room for `words` words.
    #[must_use]
    pub fn with_capacity(words: usize) -> Self {
        Self {
            buf: Vec::with_capacity(words * 32),
        }
    }

    /// Appends a raw word.
    #[must_use]
    pub fn word(mut self, word: Word) -> Self {
        self.buf.extend_from_slice(word.as_bytes());
        self
    }

    /// Appends a hash.
    #[must_use]
    pub fn hash(self, hash: Hash) -> Self {
        self.word(hash.into())
    }

    /// Appends an integer.
    #[must_use]
    pub fn uint(self, value: U256) -> Self {
        self.word(Word::from_u256(value))
    }

    /// Appends a `u64` widened to 256 bits.
    #[must_use]
    pub fn u64(self, value: u64) -> Self {
        self.uint(U256::from(value))
    }

    /// Appends a left-padded address.
    #[must_use]
    pub fn address(self, address: Address) -> Self {
        self.word(Word::from_address(address))
    }

    /// Appends a dynamic byte string by its Keccak-256 digest.
    #[must_use]
    pub fn hashed_bytes(self, bytes: &[u8]) -> Self {
        self.hash(keccak256(bytes))
    }

    /// Returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Returns the Keccak-256 of the encoded bytes.
    #[must_use]
    pub fn digest(self) -> Hash {
        keccak256(&self.buf)
    }
}
