//! # Signature Payloads
//!
//! Wire formats of the bytes that follow the signature tag.
//!
//! ## CREATION (tag 0)
//!
//! Sliced by fixed offsets, never generically decoded:
//!
//! ```text
//! [0, 20)     originating factory address
//! [20, 24)    factory selector           (ignored)
//! [24, 56)    X
//! [56, 88)    Y
//! [88, 120)   usernameHash
//! [120, 152)  credIdHash
//! [152, 217)  authority signature r ‖ s ‖ v
//! ```
//!
//! ## WEBAUTHN (tag 1)
//!
//! Strict ABI encoding of
//! `(uint8 type, bytes authenticatorData, bytes clientData, uint256 r, uint256 s, bytes32 credIdHash)`.
//! Any shape, offset or length mismatch is a structural error.

use crate::errors::PayloadError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, EcdsaSignature, Hash, Word, U256, WordEncoder};

// =============================================================================
// CREATION PAYLOAD
// =============================================================================

/// Minimum length of a CREATION payload.
pub const CREATION_PAYLOAD_MIN_LEN: usize = 152;

/// Offset of the authority signature in a CREATION payload.
pub const CREATION_SIGNATURE_OFFSET: usize = CREATION_PAYLOAD_MIN_LEN;

/// Fields sliced from a CREATION payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationPayload {
    /// Factory the payload claims to originate from.
    pub factory: Address,
    /// Factory function selector, carried but not checked.
    pub selector: [u8; 4],
    /// Public key X coordinate.
    pub x: U256,
    /// Public key Y coordinate.
    pub y: U256,
    /// Hash of the account's username (the deployment seed).
    pub username_hash: Hash,
    /// Hash of the credential id.
    pub credential_id_hash: Hash,
    /// Factory authority signature over the creation message, when present.
    pub authority_signature: Option<EcdsaSignature>,
}

fn word_at(payload: &[u8], offset: usize) -> [u8; 32] {
    let mut word = [0u8; 32];
    word.copy_from_slice(&payload[offset..offset + 32]);
    word
}

impl CreationPayload {
    /// Slices a CREATION payload. Returns None below the minimum length.
    ///
    /// A missing or short authority signature yields
    /// `authority_signature: None`; bytes past it are ignored.
    #[must_use]
    pub fn slice(payload: &[u8]) -> Option<Self> {
        if payload.len() < CREATION_PAYLOAD_MIN_LEN {
            return None;
        }

        let mut factory = [0u8; 20];
        factory.copy_from_slice(&payload[..20]);
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&payload[20..24]);

        let authority_signature = payload
            .get(CREATION_SIGNATURE_OFFSET..CREATION_SIGNATURE_OFFSET + EcdsaSignature::LEN)
            .and_then(EcdsaSignature::from_slice);

        Some(Self {
            factory: Address::new(factory),
            selector,
            x: U256::from_big_endian(&word_at(payload, 24)),
            y: U256::from_big_endian(&word_at(payload, 56)),
            username_hash: Hash::new(word_at(payload, 88)),
            credential_id_hash: Hash::new(word_at(payload, 120)),
            authority_signature,
        })
    }

    /// Wire form of the payload (without the tag byte).
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CREATION_PAYLOAD_MIN_LEN + EcdsaSignature::LEN);
        out.extend_from_slice(self.factory.as_bytes());
        out.extend_from_slice(&self.selector);
        out.extend_from_slice(Word::from_u256(self.x).as_bytes());
        out.extend_from_slice(Word::from_u256(self.y).as_bytes());
        out.extend_from_slice(self.username_hash.as_bytes());
        out.extend_from_slice(self.credential_id_hash.as_bytes());
        if let Some(sig) = &self.authority_signature {
            out.extend_from_slice(&sig.bytes);
        }
        out
    }

    /// Full signature bytes: CREATION tag followed by the payload.
    #[must_use]
    pub fn to_signature(&self) -> Vec<u8> {
        let mut out = vec![super::entities::SignatureTag::Creation.as_byte()];
        out.extend_from_slice(&self.encode());
        out
    }
}

// =============================================================================
// WEBAUTHN PAYLOAD
// =============================================================================

/// Words in the static head of the WebAuthn tuple.
const HEAD_WORDS: usize = 6;

/// Byte length of the static head.
const HEAD_LEN: usize = HEAD_WORDS * 32;

/// A decoded passkey signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAuthnSignature {
    /// Assertion type discriminator (carried, not interpreted).
    pub kind: u8,
    /// Authenticator data the passkey signed over.
    pub authenticator_data: Vec<u8>,
    /// Client data JSON the passkey signed over.
    pub client_data: Vec<u8>,
    /// P-256 r.
    pub r: U256,
    /// P-256 s.
    pub s: U256,
    /// Credential that produced the signature.
    pub credential_id_hash: Hash,
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(32) * 32
}

fn to_usize(value: U256) -> Option<usize> {
    if value > U256::from(usize::MAX) {
        None
    } else {
        Some(value.as_usize())
    }
}

/// Reads one `bytes` tail whose offset is stored in head word `head_index`.
fn read_dynamic(payload: &[u8], head_index: usize, field: &'static str) -> Result<Vec<u8>, PayloadError> {
    let raw_offset = U256::from_big_endian(&word_at(payload, head_index * 32));
    let offset = to_usize(raw_offset)
        .filter(|o| *o >= HEAD_LEN && o % 32 == 0)
        .ok_or(PayloadError::InvalidOffset {
            field,
            offset: raw_offset,
        })?;

    let length_end = offset.checked_add(32).ok_or(PayloadError::InvalidOffset {
        field,
        offset: raw_offset,
    })?;
    if payload.len() < length_end {
        return Err(PayloadError::TooShort {
            expected: length_end,
            actual: payload.len(),
        });
    }

    let raw_length = U256::from_big_endian(&word_at(payload, offset));
    let data_end = to_usize(raw_length)
        .and_then(|len| length_end.checked_add(len))
        .ok_or(PayloadError::InvalidLength {
            field,
            length: raw_length,
        })?;
    if payload.len() < data_end {
        return Err(PayloadError::InvalidLength {
            field,
            length: raw_length,
        });
    }

    Ok(payload[length_end..data_end].to_vec())
}

impl WebAuthnSignature {
    /// Decodes the ABI tuple.
    ///
    /// # Errors
    ///
    /// Any structural mismatch: short head, out-of-range `type`, offsets into
    /// the head or past the end, lengths past the end.
    pub fn decode(payload: &[u8]) -> Result<Self, PayloadError> {
        if payload.len() < HEAD_LEN {
            return Err(PayloadError::TooShort {
                expected: HEAD_LEN,
                actual: payload.len(),
            });
        }

        let kind_word = U256::from_big_endian(&word_at(payload, 0));
        if kind_word > U256::from(u8::MAX) {
            return Err(PayloadError::ValueOutOfRange { field: "type" });
        }

        Ok(Self {
            kind: kind_word.low_u32() as u8,
            authenticator_data: read_dynamic(payload, 1, "authenticatorData")?,
            client_data: read_dynamic(payload, 2, "clientData")?,
            r: U256::from_big_endian(&word_at(payload, 96)),
            s: U256::from_big_endian(&word_at(payload, 128)),
            credential_id_hash: Hash::new(word_at(payload, 160)),
        })
    }

    /// Canonical ABI encoding of the tuple (without the tag byte).
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let auth_offset = HEAD_LEN;
        let client_offset = auth_offset + 32 + padded_len(self.authenticator_data.len());

        let mut out = WordEncoder::with_capacity(HEAD_WORDS)
            .u64(u64::from(self.kind))
            .u64(auth_offset as u64)
            .u64(client_offset as u64)
            .uint(self.r)
            .uint(self.s)
            .hash(self.credential_id_hash)
            .finish();

        for bytes in [&self.authenticator_data, &self.client_data] {
            out.extend_from_slice(Word::from_u256(U256::from(bytes.len())).as_bytes());
            out.extend_from_slice(bytes);
            out.resize(out.len() + padded_len(bytes.len()) - bytes.len(), 0);
        }
        out
    }

    /// Full signature bytes: WEBAUTHN tag followed by the tuple.
    #[must_use]
    pub fn to_signature(&self) -> Vec<u8> {
        let mut out = vec![super::entities::SignatureTag::WebAuthn.as_byte()];
        out.extend_from_slice(&self.encode());
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================
