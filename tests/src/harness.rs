//! # Test Harness
//!
//! A deployed-wallet fixture: simulated host, factory with a random
//! authority key, and the keyed digest verifier standing in for P-256.

use k256::ecdsa::SigningKey;
use pw_02_authenticator_codec::{credential_id_hash, decode, encode};
use pw_03_smart_account::domain::ecdsa::test_helpers::{address_of, generate_keypair, sign};
use pw_03_smart_account::prelude::*;
use pw_04_account_factory::prelude::*;
use shared_types::{keccak256, Address, Hash, U256};

/// Network the default wallet runs on.
pub const CHAIN_ID: u64 = 8453;

/// Entrypoint baked into every account.
pub const ENTRYPOINT: Address = Address::new([0xE0; 20]);

/// Factory address.
pub const FACTORY: Address = Address::new([0xFA; 20]);

/// Verifier address baked into every account.
pub const VERIFIER: Address = Address::new([0x5E; 20]);

/// Installs a test log subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A passkey: credential id plus public key.
#[derive(Debug, Clone)]
pub struct Passkey {
    /// Raw credential id.
    pub credential_id: Vec<u8>,
    /// Public key X.
    pub x: U256,
    /// Public key Y.
    pub y: U256,
}

impl Passkey {
    /// Passkey with the given id and coordinates.
    pub fn new(credential_id: &[u8], x: u64, y: u64) -> Self {
        Self {
            credential_id: credential_id.to_vec(),
            x: U256::from(x),
            y: U256::from(y),
        }
    }

    /// Hash of the credential id.
    pub fn id_hash(&self) -> Hash {
        credential_id_hash(&self.credential_id)
    }

    /// Registration authenticator data carrying this passkey.
    pub fn authenticator_data(&self) -> Vec<u8> {
        let blob = encode(&self.credential_id, self.x, self.y).expect("credential id fits");
        debug_assert_eq!(decode(&blob).expect("decodes").credential_id_hash, self.id_hash());
        blob
    }
}

/// Simulated network with one factory.
pub struct Wallet {
    /// Execution host.
    pub host: SimulatedHost,
    /// Account factory.
    pub factory: AccountFactory<DigestVerifier>,
    /// The verifier passkeys "sign" with.
    pub verifier: DigestVerifier,
    /// Factory authority key.
    pub authority: SigningKey,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::on_chain(CHAIN_ID)
    }
}

impl Wallet {
    /// Wallet on `chain_id`, with a fresh authority key.
    pub fn on_chain(chain_id: u64) -> Self {
        let (authority, _) = generate_keypair();
        Self::with_authority(chain_id, authority)
    }

    /// Wallet on `chain_id` sharing `authority` (same factory on another network).
    pub fn with_authority(chain_id: u64, authority: SigningKey) -> Self {
        init_tracing();
        let verifier = DigestVerifier::new(keccak256(b"passkey-wallet test verifier"));
        let config = FactoryConfig {
            factory_address: FACTORY,
            authority: address_of(&authority),
            entrypoint: ENTRYPOINT,
            verifier: VERIFIER,
        };
        Self {
            host: SimulatedHost::new(HostConfig { chain_id }),
            factory: AccountFactory::new(config, verifier).expect("valid config"),
            verifier,
            authority,
        }
    }

    /// Network of this wallet.
    pub fn chain_id(&self) -> u64 {
        self.host.config().chain_id
    }

    /// Authority signature over a `create_and_init_account` call.
    pub fn authorize_deployment(&self, key: &SigningKey, seed: Hash, passkey: &Passkey, call_data_hash: Hash) -> Vec<u8> {
        let message = replay_guard::deployment_message(
            seed,
            passkey.x,
            passkey.y,
            passkey.id_hash(),
            call_data_hash,
            self.chain_id(),
            self.factory.compute_address(seed),
        );
        sign(&replay_guard::message_hash(&message), key).bytes.to_vec()
    }

    /// Deploys `username`'s account through the authorized path.
    pub fn onboard(&mut self, username: &str, passkey: &Passkey) -> anyhow::Result<FactoryAccount<DigestVerifier>> {
        let seed = keccak256(username.as_bytes());
        let sig = self.authorize_deployment(&self.authority, seed, passkey, Hash::ZERO);
        Ok(self
            .factory
            .create_and_init_account(&mut self.host, seed, &passkey.authenticator_data(), &sig, Hash::ZERO)?)
    }

    /// CREATION signature authorizing `account`'s first operation.
    pub fn creation_signature(&self, key: &SigningKey, account: Address, username: &str, passkey: &Passkey) -> Vec<u8> {
        let username_hash = keccak256(username.as_bytes());
        let message = replay_guard::creation_message(
            username_hash,
            passkey.x,
            passkey.y,
            passkey.id_hash(),
            account,
            self.chain_id(),
        );
        CreationPayload {
            factory: FACTORY,
            selector: [0; 4],
            x: passkey.x,
            y: passkey.y,
            username_hash,
            credential_id_hash: passkey.id_hash(),
            authority_signature: Some(sign(&replay_guard::message_hash(&message), key)),
        }
        .to_signature()
    }

    /// WebAuthn assertion for `op` made with `passkey` through `verifier`.
    pub fn assert_with(&self, verifier: &DigestVerifier, op: &UserOperation, passkey: &Passkey) -> WebAuthnSignature {
        let op_hash = replay_guard::operation_hash(op.sender, op.nonce, &op.call_data, &op.sponsor_payload);
        let challenge = replay_guard::webauthn_challenge(op_hash, ENTRYPOINT, self.chain_id());
        let authenticator_data = b"\x49\x96\x0d\xe5authenticator".to_vec();
        let client_data = br#"{"type":"webauthn.get","origin":"https://wallet.example"}"#.to_vec();
        let (r, s) = verifier.sign(&authenticator_data, &client_data, &challenge, passkey.x, passkey.y);
        WebAuthnSignature {
            kind: 1,
            authenticator_data,
            client_data,
            r,
            s,
            credential_id_hash: passkey.id_hash(),
        }
    }

    /// `op` for `account` at its current nonce, signed with `passkey`.
    pub fn signed_op(&self, account: Address, call_data: &[u8], passkey: &Passkey) -> UserOperation {
        let op = UserOperation::new(account, self.host.nonce(account), call_data.to_vec());
        let sig = self.assert_with(&self.verifier, &op, passkey);
        op.with_signature(sig.to_signature())
    }

    /// Runs the entrypoint cycle: check the nonce, validate, execute on
    /// success, bump the nonce.
    ///
    /// An operation whose nonce is not the sender's current host nonce is
    /// rejected before validation, like the entrypoint does.
    pub fn submit(
        &mut self,
        account: &FactoryAccount<DigestVerifier>,
        op: &UserOperation,
        target: Address,
    ) -> anyhow::Result<ValidationCode> {
        if op.nonce != self.host.nonce(op.sender) {
            return Ok(ValidationCode::Failure);
        }
        let code = account.validate_signature(&self.host, ENTRYPOINT, op)?;
        if code.is_success() {
            account.execute(&mut self.host, ENTRYPOINT, target, U256::zero(), &op.call_data)?;
            self.host.increment_nonce(account.address());
        }
        Ok(code)
    }
}
