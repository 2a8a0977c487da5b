//! # Domain Layer
//!
//! Pure logic: ECDSA recovery, message construction, payload formats,
//! self-call encoding and events. Nothing here touches state.

pub mod calls;
pub mod ecdsa;
pub mod entities;
pub mod events;
pub mod payload;
pub mod replay_guard;

pub use calls::SelfCall;
pub use entities::{
    AccountImmutables, SignatureTag, UserOperation, ValidationCode, ERC1271_INVALID,
    ERC1271_MAGIC_VALUE,
};
pub use events::{SignerAdded, SignerRemoved};
pub use payload::{CreationPayload, WebAuthnSignature, CREATION_PAYLOAD_MIN_LEN};
