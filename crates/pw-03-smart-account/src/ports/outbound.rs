//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the account depends on:
//! - the execution host (state, journal, nonce, logs, external calls)
//! - the WebAuthn curve verifier
//! - the factory that deployed the account

use crate::errors::HostError;
use pw_01_credential_store::{Journaled, StateAccess};
use shared_types::{Address, Hash, Log, U256};
use std::sync::Arc;

// =============================================================================
// EXECUTION HOST
// =============================================================================

/// The runtime that serializes calls, owns nonces and commits state.
///
/// Logs and external calls are part of the journal: reverting a checkpoint
/// drops every log emitted and every call recorded since it.
pub trait AccountHost: StateAccess + Journaled {
    /// Identifier of the network.
    fn chain_id(&self) -> u64;

    /// Current nonce of `account`. Read-only here; the host advances it.
    fn nonce(&self, account: Address) -> U256;

    /// Appends a log record.
    fn emit(&mut self, log: Log);

    /// Performs an external call from `from`.
    ///
    /// # Errors
    ///
    /// `CallReverted` if the callee reverts.
    fn call(&mut self, from: Address, target: Address, value: U256, data: &[u8])
        -> Result<Vec<u8>, HostError>;
}

// =============================================================================
// WEBAUTHN VERIFIER
// =============================================================================

/// P-256 WebAuthn assertion verification, provided outside this crate.
pub trait WebAuthnVerifier {
    /// Returns true if `(r, s)` is a valid assertion by key `(x, y)` over
    /// `challenge`, given the signed authenticator and client data.
    #[allow(clippy::too_many_arguments)]
    fn verify(
        &self,
        authenticator_data: &[u8],
        client_data: &[u8],
        challenge: &Hash,
        r: U256,
        s: U256,
        x: U256,
        y: U256,
    ) -> bool;
}

impl<T: WebAuthnVerifier + ?Sized> WebAuthnVerifier for Arc<T> {
    fn verify(
        &self,
        authenticator_data: &[u8],
        client_data: &[u8],
        challenge: &Hash,
        r: U256,
        s: U256,
        x: U256,
        y: U256,
    ) -> bool {
        (**self).verify(authenticator_data, client_data, challenge, r, s, x, y)
    }
}

// =============================================================================
// FACTORY AUTHORITY
// =============================================================================

/// The deploying factory, as seen by the account.
pub trait FactoryAuthority {
    /// Address of the factory.
    fn address(&self) -> Address;

    /// Address whose signatures authorize deployments.
    fn authority(&self) -> Address;
}

impl<T: FactoryAuthority + ?Sized> FactoryAuthority for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn authority(&self) -> Address {
        (**self).authority()
    }
}
