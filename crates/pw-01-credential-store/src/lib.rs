//! # PW-01 Credential Store - Namespace-Partitioned Signer Records
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Stores registered signing credentials in a collision-free address space.
//! Every signer kind owns one namespace whose root is derived once from a
//! human-readable tag. Records are content-addressed by key inside their
//! namespace and occupy consecutive storage words.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Distinct roots never share a slot | `domain/namespace.rs` - `StorageSlot::Namespaced` |
//! | No in-place update of a record | `service.rs` - `CredentialStore::set()` |
//! | Zero first word means "absent" | `domain/record.rs` - `StoredRecord` |
//! | All-or-nothing writes per call | `service.rs` - `atomically()` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `StateAccess` | Read/write words keyed by (account, slot) |
//! | `Journaled` | Checkpoint, commit and revert writes |
//!
//! ## Usage Example
//!
//! ```ignore
//! use pw_01_credential_store::prelude::*;
//!
//! let mut state = InMemoryState::new();
//! let store = CredentialStore::for_signers(account, SignerKind::WebAuthnP256);
//! store.set(&mut state, &signer)?;
//! assert_eq!(store.get(&state, signer.credential_id_hash)?, signer);
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

pub use adapters::InMemoryState;
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbState, RocksDbStateConfig};
pub use domain::{derive_slot, NamespaceRoot, SlotAddress, StorageSlot, StoredRecord};
pub use errors::{StateError, StoreError};
pub use ports::{Journaled, StateAccess};
pub use service::{atomically, CredentialStore};

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::namespace::{derive_slot, NamespaceRoot, SlotAddress, StorageSlot};
    pub use crate::domain::record::StoredRecord;

    // Ports
    pub use crate::ports::outbound::{Journaled, StateAccess};

    // Errors
    pub use crate::errors::{StateError, StoreError};

    // Adapters
    pub use crate::adapters::InMemoryState;
    #[cfg(feature = "rocksdb")]
    pub use crate::adapters::{RocksDbState, RocksDbStateConfig};

    // Service
    pub use crate::service::{atomically, CredentialStore};

    // Shared types used in signatures
    pub use shared_types::{Address, Hash, Signer, SignerKind, Word, U256};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Credential Store";
