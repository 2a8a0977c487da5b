//! # Inbound Ports (Driving Ports / API)
//!
//! Entry points of one deployed account. Every method takes the calling
//! address explicitly; gated methods compare it against the account's
//! immutable references before doing anything else.

use crate::domain::entities::{UserOperation, ValidationCode};
use crate::errors::AccountError;
use crate::ports::outbound::AccountHost;
use shared_types::{Address, Hash, Signer, U256};

/// Signature validation entry points.
pub trait SignatureValidation<H: AccountHost + ?Sized> {
    /// Validates the signature of `op`. Callable only by the entrypoint.
    ///
    /// Cryptographic or context mismatches return `ValidationCode::Failure`;
    /// only structurally invalid payloads and authorization errors abort.
    fn validate_signature(
        &self,
        host: &H,
        caller: Address,
        op: &UserOperation,
    ) -> Result<ValidationCode, AccountError>;

    /// ERC-1271 check of a WebAuthn signature over `hash`.
    fn is_valid_signature(&self, host: &H, hash: Hash, signature: &[u8]) -> Result<[u8; 4], AccountError>;
}

/// Execution entry points.
pub trait Execution<H: AccountHost + ?Sized> {
    /// Executes one call. Callable by the entrypoint or the account itself.
    fn execute(
        &self,
        host: &mut H,
        caller: Address,
        target: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Vec<u8>, AccountError>;

    /// Executes calls in order, all or nothing.
    fn execute_batch(
        &self,
        host: &mut H,
        caller: Address,
        targets: &[Address],
        values: &[U256],
        datas: &[Vec<u8>],
    ) -> Result<Vec<Vec<u8>>, AccountError>;
}

/// Signer registration and lookup.
pub trait SignerManagement<H: AccountHost + ?Sized> {
    /// Registers the first signer. Factory only, nonce 0, once.
    fn add_first_signer(
        &self,
        host: &mut H,
        caller: Address,
        x: U256,
        y: U256,
        credential_id_hash: Hash,
    ) -> Result<(), AccountError>;

    /// Registers an additional signer. Self-call only.
    fn add_webauthn_signer(
        &self,
        host: &mut H,
        caller: Address,
        x: U256,
        y: U256,
        credential_id_hash: Hash,
    ) -> Result<(), AccountError>;

    /// Removes a signer. Self-call only.
    fn remove_webauthn_signer(
        &self,
        host: &mut H,
        caller: Address,
        credential_id_hash: Hash,
    ) -> Result<(), AccountError>;

    /// Looks up a signer by credential id hash; zero sentinel when absent.
    fn get_signer(&self, host: &H, credential_id_hash: Hash) -> Result<Signer, AccountError>;

    /// Looks up a signer by raw credential id; zero sentinel when absent.
    fn get_signer_by_credential_id(&self, host: &H, credential_id: &[u8]) -> Result<Signer, AccountError>;
}
