//! # Stored Records
//!
//! A record is a fixed number of consecutive words whose first word is its
//! key. A zero first word reads as "absent".

use shared_types::{Hash, Signer, Word};

/// A fixed-width record the credential store can hold.
pub trait StoredRecord: Sized {
    /// Number of words the record occupies.
    const WORDS: u8;

    /// The record key, stored as the first word.
    fn key(&self) -> Hash;

    /// Serializes into exactly `WORDS` words, key first.
    fn to_words(&self) -> Vec<Word>;

    /// Rebuilds from exactly `WORDS` words.
    fn from_words(words: &[Word]) -> Self;

    /// The all-zero sentinel.
    fn zero() -> Self;
}

impl StoredRecord for Signer {
    const WORDS: u8 = 3;

    fn key(&self) -> Hash {
        self.credential_id_hash
    }

    fn to_words(&self) -> Vec<Word> {
        Signer::to_words(self).to_vec()
    }

    fn from_words(words: &[Word]) -> Self {
        let mut fixed = [Word::ZERO; 3];
        for (dst, src) in fixed.iter_mut().zip(words) {
            *dst = *src;
        }
        Signer::from_words(&fixed)
    }

    fn zero() -> Self {
        Signer::ZERO
    }
}
