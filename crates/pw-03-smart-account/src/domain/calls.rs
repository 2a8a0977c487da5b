//! # Self-Calls
//!
//! Signer management is reachable only through `execute` with the account as
//! target. The call data is a 4-byte selector followed by static words.

use crate::errors::CallError;
use shared_types::{keccak256, Hash, U256, WordEncoder};

/// Signature of the signer registration self-call.
pub const ADD_WEBAUTHN_SIGNER: &str = "addWebAuthnSigner(uint256,uint256,bytes32)";

/// Signature of the signer removal self-call.
pub const REMOVE_WEBAUTHN_SIGNER: &str = "removeWebAuthnSigner(bytes32)";

/// First four bytes of keccak256 of a function signature.
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash.as_bytes()[..4]);
    out
}

/// A decoded self-call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfCall {
    /// Register a passkey signer.
    AddWebAuthnSigner {
        /// Public key X coordinate.
        x: U256,
        /// Public key Y coordinate.
        y: U256,
        /// Credential id hash.
        credential_id_hash: Hash,
    },
    /// Remove a passkey signer.
    RemoveWebAuthnSigner {
        /// Credential id hash.
        credential_id_hash: Hash,
    },
}

fn word(args: &[u8], index: usize) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&args[index * 32..(index + 1) * 32]);
    out
}

fn expect_args(args: &[u8], words: usize) -> Result<(), CallError> {
    if args.len() != words * 32 {
        return Err(CallError::MalformedArguments {
            expected: words * 32,
            actual: args.len(),
        });
    }
    Ok(())
}

impl SelfCall {
    /// Decodes call data addressed to the account itself.
    ///
    /// # Errors
    ///
    /// Unknown selector or argument bytes that do not match it exactly.
    pub fn decode(data: &[u8]) -> Result<Self, CallError> {
        if data.len() < 4 {
            return Err(CallError::MissingSelector);
        }
        let mut sel = [0u8; 4];
        sel.copy_from_slice(&data[..4]);
        let args = &data[4..];

        if sel == selector(ADD_WEBAUTHN_SIGNER) {
            expect_args(args, 3)?;
            Ok(Self::AddWebAuthnSigner {
                x: U256::from_big_endian(&word(args, 0)),
                y: U256::from_big_endian(&word(args, 1)),
                credential_id_hash: Hash::new(word(args, 2)),
            })
        } else if sel == selector(REMOVE_WEBAUTHN_SIGNER) {
            expect_args(args, 1)?;
            Ok(Self::RemoveWebAuthnSigner {
                credential_id_hash: Hash::new(word(args, 0)),
            })
        } else {
            Err(CallError::UnknownSelector(sel))
        }
    }

    /// Call data for this self-call.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let (sig, args) = match self {
            Self::AddWebAuthnSigner {
                x,
                y,
                credential_id_hash,
            } => (
                ADD_WEBAUTHN_SIGNER,
                WordEncoder::with_capacity(3).uint(*x).uint(*y).hash(*credential_id_hash).finish(),
            ),
            Self::RemoveWebAuthnSigner { credential_id_hash } => (
                REMOVE_WEBAUTHN_SIGNER,
                WordEncoder::with_capacity(1).hash(*credential_id_hash).finish(),
            ),
        };
        let mut out = selector(sig).to_vec();
        out.extend_from_slice(&args);
        out
    }
}
