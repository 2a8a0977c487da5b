//! # Account Events
//!
//! Log records appended to the host log on signer changes.
//!
//! | Event | Topics | Data |
//! |-------|--------|------|
//! | `SignerAdded` | signature, kind, credIdHash | X ‖ Y |
//! | `SignerRemoved` | signature, kind, credIdHash | (empty) |

use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Address, Hash, Log, Signer, SignerKind, Word, U256, WordEncoder};

/// Event signature of `SignerAdded`.
pub const SIGNER_ADDED_SIGNATURE: &str = "SignerAdded(uint8,bytes32,uint256,uint256)";

/// Event signature of `SignerRemoved`.
pub const SIGNER_REMOVED_SIGNATURE: &str = "SignerRemoved(uint8,bytes32)";

fn kind_topic(kind: SignerKind) -> Hash {
    Hash::from(Word::from_u256(U256::from(kind.as_u8())))
}

/// A signer was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerAdded {
    /// Signer kind.
    pub kind: SignerKind,
    /// Registered signer.
    pub signer: Signer,
}

impl SignerAdded {
    /// Topic 0 of the log.
    #[must_use]
    pub fn topic() -> Hash {
        keccak256(SIGNER_ADDED_SIGNATURE.as_bytes())
    }

    /// Host log record emitted by `account`.
    #[must_use]
    pub fn to_log(&self, account: Address) -> Log {
        Log::new(
            account,
            vec![Self::topic(), kind_topic(self.kind), self.signer.credential_id_hash],
            WordEncoder::with_capacity(2).uint(self.signer.x).uint(self.signer.y).finish(),
        )
    }

    /// Parses a log record, returning None for any other event.
    #[must_use]
    pub fn from_log(log: &Log) -> Option<Self> {
        if log.topics.len() != 3 || log.topics[0] != Self::topic() || log.data.len() != 64 {
            return None;
        }
        if log.topics[1] != kind_topic(SignerKind::WebAuthnP256) {
            return None;
        }
        Some(Self {
            kind: SignerKind::WebAuthnP256,
            signer: Signer::new(
                log.topics[2],
                U256::from_big_endian(&log.data[..32]),
                U256::from_big_endian(&log.data[32..]),
            ),
        })
    }
}

/// A signer was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerRemoved {
    /// Signer kind.
    pub kind: SignerKind,
    /// Removed credential.
    pub credential_id_hash: Hash,
}

impl SignerRemoved {
    /// Topic 0 of the log.
    #[must_use]
    pub fn topic() -> Hash {
        keccak256(SIGNER_REMOVED_SIGNATURE.as_bytes())
    }

    /// Host log record emitted by `account`.
    #[must_use]
    pub fn to_log(&self, account: Address) -> Log {
        Log::new(
            account,
            vec![Self::topic(), kind_topic(self.kind), self.credential_id_hash],
            Vec::new(),
        )
    }
}
