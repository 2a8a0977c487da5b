//! # Account Factory Service
//!
//! Deploys accounts at deterministic addresses and registers their first
//! signer.
//!
//! ## Authorization Flow
//!
//! ```text
//! create_and_init_account(seed, authData, sig, callDataHash)
//!   1. decode authData              (CodecError aborts)
//!   2. predicted = compute_address(seed)
//!   3. recover(sig, deployment_message) == authority
//!                                   (InvalidAuthoritySignature aborts)
//!   4. atomically { deploy; add_first_signer }
//! ```
//!
//! Steps 1-3 read nothing but their inputs and write nothing, so a rejected
//! call leaves the host untouched.

use crate::config::FactoryConfig;
use crate::domain::{compute_address, template_fingerprint, FactoryDescriptor};
use crate::errors::{ConfigError, FactoryError};
use crate::ports::inbound::AccountDeployment;
use crate::ports::outbound::DeterministicDeployer;
use pw_01_credential_store::atomically;
use pw_02_authenticator_codec::decode;
use pw_03_smart_account::domain::{ecdsa, replay_guard};
use pw_03_smart_account::{AccountImmutables, SignerManagement, SmartAccount, WebAuthnVerifier};
use shared_types::{Address, EcdsaSignature, Hash, U256};
use tracing::{debug, info, instrument, warn};

/// Handle type of accounts deployed by [`AccountFactory`].
pub type FactoryAccount<V> = SmartAccount<V, FactoryDescriptor>;

/// Deterministic account factory.
#[derive(Debug, Clone)]
pub struct AccountFactory<V> {
    config: FactoryConfig,
    fingerprint: Hash,
    verifier: V,
}

impl<V: WebAuthnVerifier + Clone> AccountFactory<V> {
    /// Creates a factory. The template fingerprint is fixed here.
    ///
    /// # Errors
    ///
    /// `ConfigError` if `config` does not validate.
    pub fn new(config: FactoryConfig, verifier: V) -> Result<Self, ConfigError> {
        config.validate()?;
        let fingerprint = template_fingerprint(&config.immutables());
        info!(
            factory = %config.factory_address,
            authority = %config.authority,
            %fingerprint,
            "account factory initialized"
        );
        Ok(Self {
            config,
            fingerprint,
            verifier,
        })
    }

    /// Factory configuration.
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Fingerprint of the deployed template.
    pub fn template_fingerprint(&self) -> Hash {
        self.fingerprint
    }

    /// References baked into every deployed account.
    pub fn immutables(&self) -> AccountImmutables {
        self.config.immutables()
    }

    /// Address an account deployed under `seed` has or will have.
    pub fn compute_address(&self, seed: Hash) -> Address {
        compute_address(self.config.factory_address, seed, self.fingerprint)
    }

    /// The factory as seen by its accounts.
    pub fn descriptor(&self) -> FactoryDescriptor {
        FactoryDescriptor {
            address: self.config.factory_address,
            authority: self.config.authority,
        }
    }

    fn handle(&self, address: Address) -> FactoryAccount<V> {
        SmartAccount::new(address, self.immutables(), self.verifier.clone(), self.descriptor())
    }

    fn deploy<H: DeterministicDeployer + ?Sized>(&self, host: &mut H, seed: Hash) -> Result<FactoryAccount<V>, FactoryError> {
        let address = self.compute_address(seed);
        if !host.create_instance(address, self.fingerprint) {
            warn!(%address, "deployment address occupied");
            return Err(FactoryError::AccountAlreadyExists { address });
        }
        info!(%address, %seed, "account deployed");
        Ok(self.handle(address))
    }

    fn verify_authority(&self, message: &[u8], signature: &[u8]) -> Result<(), FactoryError> {
        let signature = EcdsaSignature::from_slice(signature).ok_or(FactoryError::InvalidAuthoritySignature)?;
        let hash = replay_guard::message_hash(message);
        match ecdsa::recover_address(&hash, &signature) {
            Ok(recovered) if recovered == self.config.authority => Ok(()),
            Ok(recovered) => {
                warn!(%recovered, "deployment signed by non-authority");
                Err(FactoryError::InvalidAuthoritySignature)
            }
            Err(err) => {
                warn!(error = %err, "deployment signature unrecoverable");
                Err(FactoryError::InvalidAuthoritySignature)
            }
        }
    }
}

impl<V, H> AccountDeployment<H> for AccountFactory<V>
where
    V: WebAuthnVerifier + Clone,
    H: DeterministicDeployer + ?Sized,
{
    type Account = FactoryAccount<V>;

    fn compute_address(&self, seed: Hash) -> Address {
        AccountFactory::compute_address(self, seed)
    }

    #[instrument(skip(self, host), fields(factory = %self.config.factory_address))]
    fn create_account(&self, host: &mut H, seed: Hash) -> Result<Self::Account, FactoryError> {
        self.deploy(host, seed)
    }

    #[instrument(skip(self, host), fields(factory = %self.config.factory_address))]
    fn create_account_with_signer(
        &self,
        host: &mut H,
        username_hash: Hash,
        x: U256,
        y: U256,
        credential_id_hash: Hash,
    ) -> Result<Self::Account, FactoryError> {
        atomically(host, |h| {
            let account = self.deploy(h, username_hash)?;
            account.add_first_signer(h, self.config.factory_address, x, y, credential_id_hash)?;
            Ok(account)
        })
    }

    #[instrument(
        skip(self, host, authenticator_data, authority_signature),
        fields(factory = %self.config.factory_address)
    )]
    fn create_and_init_account(
        &self,
        host: &mut H,
        seed: Hash,
        authenticator_data: &[u8],
        authority_signature: &[u8],
        call_data_hash: Hash,
    ) -> Result<Self::Account, FactoryError> {
        let signer = decode(authenticator_data)?.signer();
        debug!(credential = %signer.credential_id_hash, "authenticator data decoded");

        let predicted = AccountFactory::compute_address(self, seed);
        let message = replay_guard::deployment_message(
            seed,
            signer.x,
            signer.y,
            signer.credential_id_hash,
            call_data_hash,
            host.chain_id(),
            predicted,
        );
        self.verify_authority(&message, authority_signature)?;

        atomically(host, |h| {
            let account = self.deploy(h, seed)?;
            account.add_first_signer(h, self.config.factory_address, signer.x, signer.y, signer.credential_id_hash)?;
            Ok(account)
        })
    }

    fn attach(&self, host: &H, address: Address) -> Result<Self::Account, FactoryError> {
        match host.instance_at(address) {
            Some(fingerprint) if fingerprint == self.fingerprint => Ok(self.handle(address)),
            _ => Err(FactoryError::NotDeployed { address }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
