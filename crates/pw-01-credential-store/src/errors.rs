//! # Error Types
//!
//! Errors raised by the state backends and by record admission.

use shared_types::Hash;
use thiserror::Error;

// =============================================================================
// STATE ERRORS
// =============================================================================

/// Errors from a state backend or its journal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The backend failed to read or write.
    #[error("state backend error: {message}")]
    Backend {
        /// Backend-provided description.
        message: String,
    },

    /// A stored value could not be interpreted as a word.
    #[error("corrupt word in storage: expected 32 bytes, found {len}")]
    CorruptWord {
        /// Length actually read.
        len: usize,
    },

    /// Commit or revert was called for a checkpoint that is not the innermost one.
    #[error("checkpoint {requested} is not the innermost checkpoint (depth {depth})")]
    CheckpointMismatch {
        /// Checkpoint the caller passed.
        requested: usize,
        /// Current nesting depth.
        depth: usize,
    },
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from credential record admission and lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record already occupies this key. Records are never updated in place.
    #[error("record already exists for key {key}")]
    OverrideNotAllowed {
        /// Occupied key.
        key: Hash,
    },

    /// No record exists for this key.
    #[error("no record for key {key}")]
    NotFound {
        /// Missing key.
        key: Hash,
    },

    /// The record cannot be stored (zero first word or mismatched key).
    #[error("invalid record: {reason}")]
    InvalidRecord {
        /// Why the record was rejected.
        reason: &'static str,
    },

    /// Underlying state failure.
    #[error("state error: {0}")]
    State(#[from] StateError),
}
