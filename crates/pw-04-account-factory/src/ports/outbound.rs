//! # Outbound Ports (Driven Ports / SPI)
//!
//! The deterministic-allocation substrate the factory deploys into.

use pw_03_smart_account::AccountHost;
use shared_types::{Address, Hash};

/// Host able to place an account instance at a precomputed address.
///
/// Instance creation must be journaled with the rest of the host state so
/// that a reverted deployment leaves no instance behind.
pub trait DeterministicDeployer: AccountHost {
    /// Template fingerprint of the instance at `address`, if any.
    fn instance_at(&self, address: Address) -> Option<Hash>;

    /// Places an instance of `fingerprint` at `address`.
    ///
    /// Returns false, changing nothing, if `address` is occupied.
    fn create_instance(&mut self, address: Address, fingerprint: Hash) -> bool;
}
