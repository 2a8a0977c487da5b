//! # Digest Verifier
//!
//! Deterministic stand-in for a P-256 WebAuthn verifier. It accepts `(r, s)`
//! iff both equal keyed Keccak-256 digests of every verifier input, so any
//! change to the authenticator data, client data, challenge or key flips the
//! result exactly like a real curve check would.
//!
//! Anyone holding the key can produce valid assertions. Use it only where no
//! curve verifier is available (simulation, tests).

use crate::ports::outbound::WebAuthnVerifier;
use shared_types::{keccak256, keccak256_concat, Hash, Word, U256};

/// Keyed-digest WebAuthn verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestVerifier {
    key: Hash,
}

impl DigestVerifier {
    const R_LABEL: u8 = b'r';
    const S_LABEL: u8 = b's';

    /// Verifier keyed by `key`.
    #[must_use]
    pub const fn new(key: Hash) -> Self {
        Self { key }
    }

    fn component(
        &self,
        label: u8,
        authenticator_data: &[u8],
        client_data: &[u8],
        challenge: &Hash,
        x: U256,
        y: U256,
    ) -> U256 {
        let digest = keccak256_concat(&[
            self.key.as_bytes(),
            &[label],
            keccak256(authenticator_data).as_bytes(),
            keccak256(client_data).as_bytes(),
            challenge.as_bytes(),
            Word::from_u256(x).as_bytes(),
            Word::from_u256(y).as_bytes(),
        ]);
        U256::from_big_endian(digest.as_bytes())
    }

    /// Produces the `(r, s)` this verifier accepts for the given inputs.
    #[must_use]
    pub fn sign(
        &self,
        authenticator_data: &[u8],
        client_data: &[u8],
        challenge: &Hash,
        x: U256,
        y: U256,
    ) -> (U256, U256) {
        (
            self.component(Self::R_LABEL, authenticator_data, client_data, challenge, x, y),
            self.component(Self::S_LABEL, authenticator_data, client_data, challenge, x, y),
        )
    }
}

impl WebAuthnVerifier for DigestVerifier {
    fn verify(
        &self,
        authenticator_data: &[u8],
        client_data: &[u8],
        challenge: &Hash,
        r: U256,
        s: U256,
        x: U256,
        y: U256,
    ) -> bool {
        let (expected_r, expected_s) = self.sign(authenticator_data, client_data, challenge, x, y);
        r == expected_r && s == expected_s
    }
}
