//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the entrypoint, the factory and the account itself call
//! - **Outbound (Driven)**: Dependencies this subsystem needs

pub mod inbound;
pub mod outbound;

pub use inbound::{Execution, SignatureValidation, SignerManagement};
pub use outbound::{AccountHost, FactoryAuthority, WebAuthnVerifier};
