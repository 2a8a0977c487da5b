//! # Replay Guard Encoder
//!
//! Builds the domain-separated messages every signature in the wallet is
//! checked against. Each message is a fixed sequence of 32-byte words and
//! always carries the chain id together with the address it is bound to, so
//! a signature produced for one account, network, operation or role never
//! verifies in another.
//!
//! | Message | Words |
//! |---------|-------|
//! | creation | tagCreation, usernameHash, X, Y, credIdHash, account, chainId |
//! | operation hash | account, nonce, keccak(callData), keccak(sponsorPayload) |
//! | WebAuthn challenge | operationHash, entrypoint, chainId |
//! | deployment | tagDeployment, seed, X, Y, credIdHash, callDataHash, chainId, predicted |
//!
//! Dynamic byte strings enter a message only through their hash.

use super::entities::SignatureTag;
use shared_types::{keccak256, Address, Hash, U256, WordEncoder};

/// Role word of factory deployment messages. Distinct from every signature tag.
pub const DEPLOYMENT_TAG: u64 = 2;

/// Message the factory authority signs to authorize a CREATION signature.
#[must_use]
pub fn creation_message(
    username_hash: Hash,
    x: U256,
    y: U256,
    credential_id_hash: Hash,
    account: Address,
    chain_id: u64,
) -> Vec<u8> {
    WordEncoder::with_capacity(7)
        .u64(u64::from(SignatureTag::Creation.as_byte()))
        .hash(username_hash)
        .uint(x)
        .uint(y)
        .hash(credential_id_hash)
        .address(account)
        .u64(chain_id)
        .finish()
}

/// Binds an operation to the account, its nonce and both payloads.
#[must_use]
pub fn operation_hash(account: Address, nonce: U256, call_data: &[u8], sponsor_payload: &[u8]) -> Hash {
    WordEncoder::with_capacity(4)
        .address(account)
        .uint(nonce)
        .hashed_bytes(call_data)
        .hashed_bytes(sponsor_payload)
        .digest()
}

/// Challenge a passkey must sign for an operation.
#[must_use]
pub fn webauthn_challenge(operation_hash: Hash, entrypoint: Address, chain_id: u64) -> Hash {
    WordEncoder::with_capacity(3)
        .hash(operation_hash)
        .address(entrypoint)
        .u64(chain_id)
        .digest()
}

/// Message the factory authority signs to authorize `create_and_init_account`.
#[must_use]
pub fn deployment_message(
    seed: Hash,
    x: U256,
    y: U256,
    credential_id_hash: Hash,
    call_data_hash: Hash,
    chain_id: u64,
    predicted: Address,
) -> Vec<u8> {
    WordEncoder::with_capacity(8)
        .u64(DEPLOYMENT_TAG)
        .hash(seed)
        .uint(x)
        .uint(y)
        .hash(credential_id_hash)
        .hash(call_data_hash)
        .u64(chain_id)
        .address(predicted)
        .finish()
}

/// Hash that is actually signed.
#[must_use]
pub fn message_hash(message: &[u8]) -> Hash {
    keccak256(message)
}
