//! # Domain Layer
//!
//! Namespace roots, slot derivation and the stored-record contract.

pub mod namespace;
pub mod record;

pub use namespace::{derive_slot, NamespaceRoot, SlotAddress, StorageSlot};
pub use record::StoredRecord;
