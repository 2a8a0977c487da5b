//! # Deterministic Addressing
//!
//! Account addresses follow the CREATE2 scheme: the address is a function of
//! the factory, a caller-chosen seed and a fingerprint of the account
//! template, so it can be computed before anything is deployed and never
//! changes afterwards.
//!
//! ```text
//! fingerprint = keccak256(TEMPLATE_TAG ‖ factory ‖ verifier ‖ entrypoint)
//! address     = keccak256(0xff ‖ factory ‖ seed ‖ fingerprint)[12..]
//! ```

use pw_03_smart_account::AccountImmutables;
use shared_types::{keccak256_concat, Address, Hash};

/// Identifies the account template in every fingerprint.
pub const TEMPLATE_TAG: &[u8] = b"PasskeyWallet.SmartAccount.v1";

/// CREATE2 domain byte.
const CREATE2_PREFIX: u8 = 0xff;

/// Fingerprint of the template a factory deploys.
#[must_use]
pub fn template_fingerprint(immutables: &AccountImmutables) -> Hash {
    keccak256_concat(&[
        TEMPLATE_TAG,
        immutables.factory.as_bytes(),
        immutables.verifier.as_bytes(),
        immutables.entrypoint.as_bytes(),
    ])
}

/// Address of the account deployed by `factory` under `seed`.
#[must_use]
pub fn compute_address(factory: Address, seed: Hash, fingerprint: Hash) -> Address {
    let hash = keccak256_concat(&[
        &[CREATE2_PREFIX],
        factory.as_bytes(),
        seed.as_bytes(),
        fingerprint.as_bytes(),
    ]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash.as_bytes()[12..32]);
    Address::new(addr)
}
