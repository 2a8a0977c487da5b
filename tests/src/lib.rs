//! # Passkey Wallet Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Shared wallet fixture
//! ├── integration/      # Cross-subsystem flows
//! │   └── flows.rs
//! └── exploits/         # Attack simulations
//!     ├── replay.rs     # Cross-chain, cross-account and nonce replay
//!     └── forgery.rs    # Forged authorizations and privilege escalation
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pw-tests
//!
//! # By category
//! cargo test -p pw-tests integration::
//! cargo test -p pw-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p pw-tests
//! ```

pub mod exploits;
pub mod harness;
