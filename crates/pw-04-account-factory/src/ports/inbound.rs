//! # Inbound Ports (Driving Ports / API)
//!
//! Deployment API of the factory.

use crate::errors::FactoryError;
use crate::ports::outbound::DeterministicDeployer;
use shared_types::{Address, Hash, U256};

/// Account deployment.
///
/// `Account` is the handle type returned for a deployed instance.
pub trait AccountDeployment<H: DeterministicDeployer + ?Sized> {
    /// Handle on a deployed account.
    type Account;

    /// Address an account deployed under `seed` has or will have.
    fn compute_address(&self, seed: Hash) -> Address;

    /// Deploys an uninitialized account at `compute_address(seed)`.
    fn create_account(&self, host: &mut H, seed: Hash) -> Result<Self::Account, FactoryError>;

    /// Deploys at `compute_address(username_hash)` and registers the first
    /// signer in one atomic step.
    fn create_account_with_signer(
        &self,
        host: &mut H,
        username_hash: Hash,
        x: U256,
        y: U256,
        credential_id_hash: Hash,
    ) -> Result<Self::Account, FactoryError>;

    /// Deploys and initializes an account from passkey registration data,
    /// authorized by the factory authority's signature.
    ///
    /// Nothing is written unless the signature verifies.
    fn create_and_init_account(
        &self,
        host: &mut H,
        seed: Hash,
        authenticator_data: &[u8],
        authority_signature: &[u8],
        call_data_hash: Hash,
    ) -> Result<Self::Account, FactoryError>;

    /// Handle on an account this factory already deployed.
    fn attach(&self, host: &H, address: Address) -> Result<Self::Account, FactoryError>;
}
