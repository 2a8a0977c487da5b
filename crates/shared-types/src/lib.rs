//! # Shared Types Crate
//!
//! Value objects and entities used across the Passkey Wallet subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `Hash`, `Word` and `Signer` are
//!   defined once here and re-exported by every subsystem.
//! - **Word-Oriented Encoding**: Every signed or stored value is a sequence of
//!   32-byte big-endian words. `WordEncoder` is the only way messages are built.

pub mod encoding;
pub mod entities;
pub mod hashing;
pub mod value_objects;

pub use encoding::WordEncoder;
pub use entities::*;
pub use hashing::{keccak256, keccak256_concat};
pub use value_objects::*;
