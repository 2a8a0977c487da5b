//! # Domain Layer
//!
//! Address derivation and the factory descriptor handed to accounts.

pub mod address;
pub mod entities;

pub use address::{compute_address, template_fingerprint, TEMPLATE_TAG};
pub use entities::FactoryDescriptor;
