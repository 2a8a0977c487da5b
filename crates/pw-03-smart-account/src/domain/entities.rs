//! # Domain Entities
//!
//! Operations submitted for validation, validation results and the
//! immutable account configuration.

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

// =============================================================================
// SIGNATURE TAG
// =============================================================================

/// First byte of every signature payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureTag {
    /// One-time deployment authorization by the factory authority.
    Creation = 0,
    /// Passkey assertion.
    WebAuthn = 1,
}

impl SignatureTag {
    /// Parses a tag byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Creation),
            1 => Some(Self::WebAuthn),
            _ => None,
        }
    }

    /// The tag byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Result of `validate_signature`, consumed by the caller's admission logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ValidationCode {
    /// Signature is valid for this operation.
    Success = 0,
    /// Signature is not valid for this operation.
    Failure = 1,
}

impl ValidationCode {
    /// Maps a boolean check to a code.
    #[must_use]
    pub const fn from_bool(valid: bool) -> Self {
        if valid {
            Self::Success
        } else {
            Self::Failure
        }
    }

    /// Returns true for `Success`.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Returned by `is_valid_signature` for a valid signature (ERC-1271).
pub const ERC1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];

/// Returned by `is_valid_signature` for an invalid signature.
pub const ERC1271_INVALID: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// An operation submitted for validation and execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOperation {
    /// The account the operation acts for.
    pub sender: Address,
    /// Host-assigned nonce.
    pub nonce: U256,
    /// Call data passed to `execute` after validation.
    pub call_data: Vec<u8>,
    /// Opaque sponsorship payload, only hashed into the challenge.
    pub sponsor_payload: Vec<u8>,
    /// Tag byte followed by the tag-specific payload.
    pub signature: Vec<u8>,
}

impl UserOperation {
    /// Creates an operation with an empty sponsor payload and signature.
    #[must_use]
    pub fn new(sender: Address, nonce: U256, call_data: Vec<u8>) -> Self {
        Self {
            sender,
            nonce,
            call_data,
            sponsor_payload: Vec::new(),
            signature: Vec::new(),
        }
    }

    /// Sets the sponsor payload.
    #[must_use]
    pub fn with_sponsor_payload(mut self, sponsor_payload: Vec<u8>) -> Self {
        self.sponsor_payload = sponsor_payload;
        self
    }

    /// Sets the signature.
    #[must_use]
    pub fn with_signature(mut self, signature: Vec<u8>) -> Self {
        self.signature = signature;
        self
    }
}

// =============================================================================
// ACCOUNT
// =============================================================================

/// References fixed when the account is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountImmutables {
    /// Factory that deployed the account.
    pub factory: Address,
    /// WebAuthn verifier the account delegates curve checks to.
    pub verifier: Address,
    /// Entrypoint allowed to validate and execute operations.
    pub entrypoint: Address,
}
