//! # PW-04 Account Factory - Deterministic Account Deployment
//!
//! **Subsystem ID:** 4
//!
//! ## Purpose
//!
//! Deploys passkey accounts at addresses that can be computed before
//! deployment, and atomically registers their first signer. A deployment
//! from raw passkey registration data is authorized by the factory
//! authority's ECDSA signature.
//!
//! ## Security Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | `compute_address(seed)` never changes | pure function of factory, seed and template fingerprint |
//! | One instance per address | `DeterministicDeployer::create_instance()` refuses occupied addresses |
//! | Unauthorized deployments write nothing | signature checked before `atomically` opens |
//! | Deployment signatures bind chain, call data and predicted address | `replay_guard::deployment_message()` |
//! | Deploy and first signer are one unit | both run inside one `atomically` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use pw_04_account_factory::prelude::*;
//!
//! let factory = AccountFactory::new(FactoryConfig::from_env()?, verifier)?;
//! let predicted = factory.compute_address(seed);
//! let account = factory.create_and_init_account(&mut host, seed, &auth_data, &sig, call_data_hash)?;
//! assert_eq!(account.address(), predicted);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use config::FactoryConfig;
pub use domain::{compute_address, template_fingerprint, FactoryDescriptor, TEMPLATE_TAG};
pub use errors::{ConfigError, FactoryError};
pub use ports::{AccountDeployment, DeterministicDeployer};
pub use service::{AccountFactory, FactoryAccount};

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::FactoryConfig;
    pub use crate::domain::FactoryDescriptor;
    pub use crate::errors::{ConfigError, FactoryError};
    pub use crate::ports::{AccountDeployment, DeterministicDeployer};
    pub use crate::service::{AccountFactory, FactoryAccount};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 4;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Account Factory";
