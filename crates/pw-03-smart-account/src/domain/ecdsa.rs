//! # ECDSA Recovery (secp256k1)
//!
//! Recovers the address that signed a prehashed message. The factory's
//! authority signs deployment and creation messages with this scheme; the
//! account only ever compares the recovered address against a configured one.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: s must be strictly below half the curve order
//! - **Scalar Range Validation**: r and s must be in [1, n-1]
//! - **Constant-Time Operations**: scalar comparisons use `subtle`
//! - Intermediate signature buffers are zeroized

use crate::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_types::{keccak256, Address, EcdsaSignature, Hash};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// secp256k1 curve order n
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n/2, upper bound (exclusive) for s.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// RECOVERY
// =============================================================================

/// Recovers the signer's address from a signature over `message_hash`.
///
/// # Errors
///
/// Any malformed, malleable or unrecoverable signature.
pub fn recover_address(message_hash: &Hash, signature: &EcdsaSignature) -> Result<Address, SignatureError> {
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(signature.r());
    s.copy_from_slice(signature.s());

    let checks = validate_scalars(&r, &s);
    r.zeroize();
    s.zeroize();
    checks?;

    let recovery_id = parse_recovery_id(signature.v())?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes.copy_from_slice(&signature.bytes[..64]);
    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| SignatureError::InvalidFormat)?;

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash.as_bytes(), &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Recovers the signer and checks it equals `expected`.
///
/// # Errors
///
/// `SignerMismatch` if recovery succeeds for a different address, or any
/// recovery error.
pub fn verify_signer(
    message_hash: &Hash,
    signature: &EcdsaSignature,
    expected: Address,
) -> Result<(), SignatureError> {
    let actual = recover_address(message_hash, signature)?;
    if actual != expected {
        return Err(SignatureError::SignerMismatch { expected, actual });
    }
    Ok(())
}

/// Derives the address of a public key: last 20 bytes of keccak256(X ‖ Y).
#[must_use]
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    // Skip the 0x04 uncompressed-point prefix
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash.as_bytes()[12..]);
    Address::new(address)
}

// =============================================================================
// HELPERS
// =============================================================================

fn validate_scalars(r: &[u8; 32], s: &[u8; 32]) -> Result<(), SignatureError> {
    if !is_valid_scalar(r) || !is_valid_scalar(s) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_low_s(s) {
        return Err(SignatureError::MalleableSignature);
    }
    Ok(())
}

/// Constant-time `a < b` over big-endian bytes.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for (a_byte, b_byte) in a.iter().zip(b) {
        let not_decided = !(less | greater);
        less |= not_decided & Choice::from(u8::from(a_byte < b_byte));
        greater |= not_decided & Choice::from(u8::from(a_byte > b_byte));
    }

    less
}

/// s strictly below n/2 (EIP-2).
fn is_low_s(s: &[u8; 32]) -> bool {
    ct_less_than(s, &SECP256K1_HALF_ORDER).into()
}

/// Scalar in [1, n-1].
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }
    (!is_zero & ct_less_than(scalar, &SECP256K1_ORDER)).into()
}

/// Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Computes n - s, the high-s twin of a signature.
#[must_use]
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i16 = 0;

    for i in (0..32).rev() {
        let diff = i16::from(SECP256K1_ORDER[i]) - i16::from(s[i]) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================

/// Key generation and signing for tests.
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use super::*;
    use k256::ecdsa::SigningKey;

    /// Generate a new ECDSA keypair.
    pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let verifying_key = *signing_key.verifying_key();
        (signing_key, verifying_key)
    }

    /// Address controlled by `signing_key`.
    pub fn address_of(signing_key: &SigningKey) -> Address {
        address_from_pubkey(signing_key.verifying_key())
    }

    /// Sign a message hash, returning a low-s `r ‖ s ‖ v` signature with v in {27, 28}.
    pub fn sign(message_hash: &Hash, private_key: &SigningKey) -> EcdsaSignature {
        let (sig, recid) = private_key
            .sign_prehash_recoverable(message_hash.as_bytes())
            .expect("signing failed");

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        // Normalize S to low value (EIP-2)
        let s_normalized = if is_low_s(&s) { s } else { invert_s(&s) };

        // Flip the recovery id if s was inverted
        let v = if s_normalized == s {
            recid.to_byte() + 27
        } else if recid.to_byte() == 0 {
            28
        } else {
            27
        };

        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&r);
        bytes[32..64].copy_from_slice(&s_normalized);
        bytes[64] = v;
        EcdsaSignature::new(bytes)
    }
}

// =============================================================================
// TESTS
// =============================================================================
