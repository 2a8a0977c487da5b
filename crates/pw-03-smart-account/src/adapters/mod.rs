//! # Adapters Layer
//!
//! - `SimulatedHost`: in-process execution host over any journaled state
//! - `DigestVerifier`: deterministic WebAuthn verifier stand-in

pub mod digest_verifier;
pub mod simulated_host;

pub use digest_verifier::DigestVerifier;
pub use simulated_host::{CallRecord, HostCheckpoint, HostConfig, SimulatedHost};
