//! # Factory Entities

use pw_03_smart_account::FactoryAuthority;
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// The factory as seen by the accounts it deploys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryDescriptor {
    /// Factory address.
    pub address: Address,
    /// Key that authorizes deployments and CREATION signatures.
    pub authority: Address,
}

impl FactoryAuthority for FactoryDescriptor {
    fn address(&self) -> Address {
        self.address
    }

    fn authority(&self) -> Address {
        self.authority
    }
}
