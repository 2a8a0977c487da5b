//! # Error Types
//!
//! Error types for the account factory.

use pw_01_credential_store::StateError;
use pw_02_authenticator_codec::CodecError;
use pw_03_smart_account::AccountError;
use shared_types::Address;
use thiserror::Error;

/// Factory errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// An instance already exists at the derived address.
    #[error("Account already exists at {address:?}")]
    AccountAlreadyExists {
        /// Occupied address.
        address: Address,
    },

    /// Deployment was not signed by the factory authority.
    #[error("Invalid authority signature")]
    InvalidAuthoritySignature,

    /// No instance of this factory's template exists at the address.
    #[error("No account deployed at {address:?}")]
    NotDeployed {
        /// Queried address.
        address: Address,
    },

    /// Authenticator data could not be decoded.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// First-signer initialization failed.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// State backend failure.
    #[error("State error: {0}")]
    State(#[from] StateError),
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required address is zero.
    #[error("Configuration field `{field}` must not be the zero address")]
    ZeroAddress {
        /// Offending field.
        field: &'static str,
    },

    /// Environment variable set to an unparsable value.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}
