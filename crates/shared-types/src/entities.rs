//! # Core Domain Entities
//!
//! Entities shared by the credential store, the account and the factory.
//!
//! ## Clusters
//!
//! - **Credentials**: `SignerKind`, `Signer`
//! - **Authorization**: `EcdsaSignature`
//! - **Host Records**: `Log`

use crate::value_objects::{Address, Hash, Word, U256};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

// =============================================================================
// CLUSTER A: CREDENTIALS
// =============================================================================

/// The kind of a registered signer. Each kind owns one storage namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignerKind {
    /// A passkey (WebAuthn) credential on the P-256 curve.
    WebAuthnP256,
}

impl SignerKind {
    /// Human-readable tag the namespace root of this kind is derived from.
    ///
    /// Changing a tag moves every stored signer of that kind. Never edit one.
    #[must_use]
    pub const fn namespace_tag(&self) -> &'static str {
        match self {
            Self::WebAuthnP256 => "passkeywallet.signer.webauthn-p256",
        }
    }

    /// Numeric discriminant used in log topics.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::WebAuthnP256 => 0,
        }
    }
}

/// A registered passkey credential.
///
/// The all-zero signer is the "absent" sentinel returned by lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signer {
    /// Keccak-256 of the raw credential id. Primary key of the record.
    pub credential_id_hash: Hash,
    /// Public key X coordinate.
    pub x: U256,
    /// Public key Y coordinate.
    pub y: U256,
}

impl Signer {
    /// The zero sentinel.
    pub const ZERO: Self = Self {
        credential_id_hash: Hash::ZERO,
        x: U256::zero(),
        y: U256::zero(),
    };

    /// Creates a signer record.
    #[must_use]
    pub const fn new(credential_id_hash: Hash, x: U256, y: U256) -> Self {
        Self {
            credential_id_hash,
            x,
            y,
        }
    }

    /// Returns true for the zero sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.credential_id_hash.is_zero() && self.x.is_zero() && self.y.is_zero()
    }

    /// The three storage words of this record, key first.
    #[must_use]
    pub fn to_words(&self) -> [Word; 3] {
        [
            Word::from(self.credential_id_hash),
            Word::from_u256(self.x),
            Word::from_u256(self.y),
        ]
    }

    /// Rebuilds a record from its storage words.
    #[must_use]
    pub fn from_words(words: &[Word; 3]) -> Self {
        Self {
            credential_id_hash: Hash::from(words[0]),
            x: words[1].to_u256(),
            y: words[2].to_u256(),
        }
    }
}

// =============================================================================
// CLUSTER B: AUTHORIZATION
// =============================================================================

/// A recoverable secp256k1 signature in `r ‖ s ‖ v` layout.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// The 65 raw bytes.
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 65],
}

impl EcdsaSignature {
    /// Length of the wire form.
    pub const LEN: usize = 65;

    /// Wraps raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 65]) -> Self {
        Self { bytes }
    }

    /// Parses a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 65]>::try_from(slice).ok().map(Self::new)
    }

    /// The r component.
    #[must_use]
    pub fn r(&self) -> &[u8] {
        &self.bytes[..32]
    }

    /// The s component.
    #[must_use]
    pub fn s(&self) -> &[u8] {
        &self.bytes[32..64]
    }

    /// The recovery byte (0, 1, 27 or 28).
    #[must_use]
    pub const fn v(&self) -> u8 {
        self.bytes[64]
    }
}

// =============================================================================
// CLUSTER C: HOST RECORDS
// =============================================================================

/// An observable log record appended by the execution host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Emitting account.
    pub address: Address,
    /// Indexed topics; the first is the event signature hash.
    pub topics: Vec<Hash>,
    /// Unindexed payload.
    pub data: Vec<u8>,
}

impl Log {
    /// Creates a new log.
    #[must_use]
    pub fn new(address: Address, topics: Vec<Hash>, data: Vec<u8>) -> Self {
        Self {
            address,
            topics,
            data,
        }
    }
}
