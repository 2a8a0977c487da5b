//! Deterministic deployment on the simulated host.
//!
//! The host journals instance creation itself, so a deployment inside a
//! reverted `atomically` block disappears with the rest of the writes.

use crate::ports::outbound::DeterministicDeployer;
use pw_01_credential_store::{Journaled, StateAccess};
use pw_03_smart_account::SimulatedHost;
use shared_types::{Address, Hash};

impl<S: StateAccess + Journaled> DeterministicDeployer for SimulatedHost<S> {
    fn instance_at(&self, address: Address) -> Option<Hash> {
        SimulatedHost::instance_at(self, address)
    }

    fn create_instance(&mut self, address: Address, fingerprint: Hash) -> bool {
        SimulatedHost::create_instance(self, address, fingerprint)
    }
}
