//! # Assertion Codec
//!
//! Pure decoder and canonical encoder for passkey assertion blobs.
//! Bounds are checked against the computed offsets before any slice is
//! taken, so a short blob always yields `TooShort` and never panics.

use super::layout::{
    blob_len, x_offset, y_offset, COORDINATE_LEN, COSE_KEY_PREFIX, COSE_Y_SEPARATOR,
    CREDENTIAL_ID_LENGTH_OFFSET, CREDENTIAL_ID_OFFSET, MAX_CREDENTIAL_ID_LEN,
};
use crate::errors::CodecError;
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Hash, Signer, Word, U256};
use std::fmt;
use tracing::trace;

// =============================================================================
// DECODED ASSERTION
// =============================================================================

/// Signer material carried by an assertion blob.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatorData {
    /// Raw credential id.
    pub credential_id: Vec<u8>,
    /// Keccak-256 of `credential_id`.
    pub credential_id_hash: Hash,
    /// Public key X coordinate.
    pub x: U256,
    /// Public key Y coordinate.
    pub y: U256,
}

impl AuthenticatorData {
    /// The signer record this assertion describes.
    #[must_use]
    pub fn signer(&self) -> Signer {
        Signer::new(self.credential_id_hash, self.x, self.y)
    }
}

impl fmt::Debug for AuthenticatorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatorData")
            .field("credential_id", &hex::encode(&self.credential_id))
            .field("credential_id_hash", &self.credential_id_hash)
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Keccak-256 of a raw credential id.
#[must_use]
pub fn credential_id_hash(credential_id: &[u8]) -> Hash {
    keccak256(credential_id)
}

fn read_coordinate(blob: &[u8], offset: usize) -> U256 {
    U256::from_big_endian(&blob[offset..offset + COORDINATE_LEN])
}

/// Decodes an assertion blob.
///
/// # Errors
///
/// `TooShort` if the blob cannot hold the length prefix, or is shorter than
/// the layout implied by it.
pub fn decode(blob: &[u8]) -> Result<AuthenticatorData, CodecError> {
    if blob.len() < CREDENTIAL_ID_OFFSET {
        return Err(CodecError::TooShort {
            expected: CREDENTIAL_ID_OFFSET,
            actual: blob.len(),
        });
    }

    let id_len = usize::from(u16::from_be_bytes([
        blob[CREDENTIAL_ID_LENGTH_OFFSET],
        blob[CREDENTIAL_ID_LENGTH_OFFSET + 1],
    ]));

    let expected = blob_len(id_len);
    if blob.len() < expected {
        return Err(CodecError::TooShort {
            expected,
            actual: blob.len(),
        });
    }

    let credential_id = blob[CREDENTIAL_ID_OFFSET..CREDENTIAL_ID_OFFSET + id_len].to_vec();
    let x = read_coordinate(blob, x_offset(id_len));
    let y = read_coordinate(blob, y_offset(id_len));

    trace!(id_len, trailing = blob.len() - expected, "assertion decoded");

    Ok(AuthenticatorData {
        credential_id_hash: credential_id_hash(&credential_id),
        credential_id,
        x,
        y,
    })
}

/// Builds a canonical assertion blob with every ignored field zeroed.
///
/// # Errors
///
/// `CredentialIdTooLong` if `credential_id` exceeds 65535 bytes.
pub fn encode(credential_id: &[u8], x: U256, y: U256) -> Result<Vec<u8>, CodecError> {
    let id_len = u16::try_from(credential_id.len()).map_err(|_| CodecError::CredentialIdTooLong {
        len: credential_id.len(),
        max: MAX_CREDENTIAL_ID_LEN,
    })?;

    let mut blob = Vec::with_capacity(blob_len(credential_id.len()));
    blob.resize(CREDENTIAL_ID_LENGTH_OFFSET, 0);
    blob.extend_from_slice(&id_len.to_be_bytes());
    blob.extend_from_slice(credential_id);
    blob.extend_from_slice(&COSE_KEY_PREFIX);
    blob.extend_from_slice(Word::from_u256(x).as_bytes());
    blob.extend_from_slice(&COSE_Y_SEPARATOR);
    blob.extend_from_slice(Word::from_u256(y).as_bytes());
    Ok(blob)
}

// =============================================================================
// TESTS
// =============================================================================
