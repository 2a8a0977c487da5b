//! # PW-02 Authenticator Codec - Passkey Assertion Decoder
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Extracts the credential id and P-256 public key from the binary
//! authenticator data a passkey produces at registration. The codec is pure:
//! it performs no I/O and holds no state, so it is used both for
//! introspection (`get_signer` by raw credential id) and on the validation
//! path (the factory's `create_and_init_account`).
//!
//! ## Wire Format
//!
//! See [`domain::layout`] for the byte-exact layout. Only the credential id
//! length, the credential id and the two coordinates are read; every other
//! field is skipped by offset.
//!
//! ## Usage Example
//!
//! ```ignore
//! use pw_02_authenticator_codec::prelude::*;
//!
//! let blob = encode(b"credential", x, y)?;
//! let data = decode(&blob)?;
//! assert_eq!(data.credential_id_hash, credential_id_hash(b"credential"));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod domain;
pub mod errors;

pub use domain::{credential_id_hash, decode, encode, AuthenticatorData};
pub use errors::CodecError;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::layout::{blob_len, MAX_CREDENTIAL_ID_LEN};
    pub use crate::domain::{credential_id_hash, decode, encode, AuthenticatorData};
    pub use crate::errors::CodecError;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Authenticator Codec";
