//! # Factory Configuration
//!
//! Addresses the factory is deployed with.
//!
//! ## Security Requirements
//!
//! - No address may be zero: a zero authority would make every recovered
//!   signature check meaningless, a zero entrypoint or verifier would bake an
//!   unusable reference into every account.
//! - Values come from code or from `PW_FACTORY_ADDRESS`,
//!   `PW_FACTORY_AUTHORITY`, `PW_ENTRYPOINT` and `PW_VERIFIER` (hex, optional
//!   `0x`).

use crate::errors::ConfigError;
use pw_03_smart_account::AccountImmutables;
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Factory configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Address of the factory itself.
    pub factory_address: Address,
    /// Key whose signatures authorize deployments.
    pub authority: Address,
    /// Entrypoint baked into every account.
    pub entrypoint: Address,
    /// WebAuthn verifier baked into every account.
    pub verifier: Address,
}

impl FactoryConfig {
    /// Factory address variable.
    pub const FACTORY_ADDRESS_VAR: &'static str = "PW_FACTORY_ADDRESS";
    /// Authority variable.
    pub const AUTHORITY_VAR: &'static str = "PW_FACTORY_AUTHORITY";
    /// Entrypoint variable.
    pub const ENTRYPOINT_VAR: &'static str = "PW_ENTRYPOINT";
    /// Verifier variable.
    pub const VERIFIER_VAR: &'static str = "PW_VERIFIER";

    /// Rejects zero addresses.
    ///
    /// # Errors
    ///
    /// `ZeroAddress` naming the first zero field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("factory_address", self.factory_address),
            ("authority", self.authority),
            ("entrypoint", self.entrypoint),
            ("verifier", self.verifier),
        ];
        match fields.iter().find(|(_, address)| address.is_zero()) {
            Some(&(field, _)) => Err(ConfigError::ZeroAddress { field }),
            None => Ok(()),
        }
    }

    /// Defaults overridden by the environment, then validated.
    ///
    /// # Errors
    ///
    /// `InvalidEnv` for an unparsable variable, `ZeroAddress` if a field
    /// is left unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`FactoryConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();
        let targets = [
            (Self::FACTORY_ADDRESS_VAR, &mut config.factory_address),
            (Self::AUTHORITY_VAR, &mut config.authority),
            (Self::ENTRYPOINT_VAR, &mut config.entrypoint),
            (Self::VERIFIER_VAR, &mut config.verifier),
        ];
        for (var, slot) in targets {
            if let Some(raw) = lookup(var) {
                *slot = Address::from_hex(raw.trim()).map_err(|_| ConfigError::InvalidEnv { var, value: raw })?;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Immutable references of every account this factory deploys.
    #[must_use]
    pub fn immutables(&self) -> AccountImmutables {
        AccountImmutables {
            factory: self.factory_address,
            verifier: self.verifier,
            entrypoint: self.entrypoint,
        }
    }
}
