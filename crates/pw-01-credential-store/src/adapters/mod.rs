//! # Adapters Layer
//!
//! State backends implementing `StateAccess` and `Journaled`.

pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_state;

pub use memory::InMemoryState;
#[cfg(feature = "rocksdb")]
pub use rocksdb_state::{RocksDbState, RocksDbStateConfig};
