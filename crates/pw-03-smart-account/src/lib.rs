//! # PW-03 Smart Account - Passkey Signature Validation
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! A programmable account that authorizes operations with passkey (WebAuthn
//! P-256) signatures instead of a single externally owned key. The account
//! validates operations for the entrypoint, executes calls, and manages its
//! registered signers through the credential store.
//!
//! ## Security Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Creation signatures work only before the first operation | `validate_creation()` checks nonce 0 |
//! | Every signed message binds the network | `replay_guard` includes `chain_id` |
//! | WebAuthn challenges bind account, nonce, call data and entrypoint | `replay_guard::webauthn_challenge()` |
//! | First signer is set once, by the factory | fuse at `FIRST_SIGNER_FUSE_SLOT` |
//! | Signer mutations go through the self-call path | `ensure_self()` |
//! | Failed operations leave no writes, logs or calls | `atomically()` around every mutation |
//! | Authority signatures are low-s canonical | `ecdsa::recover_address()` |
//!
//! ## Error Model
//!
//! Bad cryptography and context mismatches are *soft*: `validate_signature`
//! returns `ValidationCode::Failure` so the caller can reject the operation
//! cleanly. Structurally malformed payloads and unauthorized callers are
//! *hard*: the call returns an `AccountError` and nothing is written.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  validate / execute   ┌──────────────────┐
//! │  Entrypoint  │ ────────────────────→ │   SmartAccount   │
//! └──────────────┘                       │   (service.rs)   │
//! ┌──────────────┐  add_first_signer     │                  │
//! │   Factory    │ ────────────────────→ │                  │
//! └──────────────┘                       └────────┬─────────┘
//!                                                 │
//!                 ┌───────────────────────────────┼──────────────────┐
//!                 ▼                               ▼                  ▼
//!        ┌─────────────────┐           ┌──────────────────┐  ┌──────────────┐
//!        │ CredentialStore │           │ WebAuthnVerifier │  │ AccountHost  │
//!        │    (pw-01)      │           │     (port)       │  │   (port)     │
//!        └─────────────────┘           └──────────────────┘  └──────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use pw_03_smart_account::prelude::*;
//!
//! let account = SmartAccount::new(address, immutables, verifier, factory);
//! account.add_first_signer(&mut host, factory_address, x, y, cred_hash)?;
//! let code = account.validate_signature(&host, entrypoint, &op)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::{DigestVerifier, HostConfig, SimulatedHost};
pub use domain::{
    AccountImmutables, CreationPayload, SelfCall, SignatureTag, SignerAdded, SignerRemoved, UserOperation,
    ValidationCode, WebAuthnSignature, ERC1271_INVALID, ERC1271_MAGIC_VALUE,
};
pub use errors::{AccountError, CallError, ConfigError, HostError, PayloadError, SignatureError};
pub use ports::{AccountHost, Execution, FactoryAuthority, SignatureValidation, SignerManagement, WebAuthnVerifier};
pub use service::{SmartAccount, FIRST_SIGNER_FUSE_SLOT};

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{DigestVerifier, HostConfig, SimulatedHost};
    pub use crate::domain::replay_guard;
    pub use crate::domain::{
        AccountImmutables, CreationPayload, SelfCall, SignatureTag, UserOperation, ValidationCode,
        WebAuthnSignature, ERC1271_INVALID, ERC1271_MAGIC_VALUE,
    };
    pub use crate::errors::{AccountError, PayloadError};
    pub use crate::ports::{
        AccountHost, Execution, FactoryAuthority, SignatureValidation, SignerManagement, WebAuthnVerifier,
    };
    pub use crate::service::SmartAccount;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Smart Account";
