//! # Ports Layer
//!
//! The credential store has no inbound API beyond `CredentialStore`; its
//! driven ports are the state and journal traits.

pub mod outbound;

pub use outbound::{Journaled, StateAccess};
