//! # Error Types

use thiserror::Error;

/// Errors from decoding or encoding an assertion blob.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The blob ends before the offsets its own length prefix implies.
    #[error("authenticator data too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum length required.
        expected: usize,
        /// Length provided.
        actual: usize,
    },

    /// The credential id does not fit the 16-bit length prefix.
    #[error("credential id too long: {len} > {max} bytes")]
    CredentialIdTooLong {
        /// Length provided.
        len: usize,
        /// Maximum length.
        max: usize,
    },
}
