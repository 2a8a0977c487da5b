//! # Domain Layer
//!
//! Byte layout constants and the pure codec.

pub mod codec;
pub mod layout;

pub use codec::{credential_id_hash, decode, encode, AuthenticatorData};
