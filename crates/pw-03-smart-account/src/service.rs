//! # Smart Account Service
//!
//! Application service implementing the inbound ports for one deployed
//! account.
//!
//! ## Validation State Machine
//!
//! ```text
//! validate_signature(op)
//!   ├─ caller != entrypoint            → NotEntryPoint (abort)
//!   ├─ empty / unknown tag             → Failure
//!   ├─ tag 0 CREATION
//!   │    ├─ nonce != 0                 → Failure
//!   │    ├─ payload < 152 bytes        → Failure
//!   │    ├─ factory mismatch           → Failure
//!   │    ├─ authority mismatch         → Failure
//!   │    ├─ stored signer mismatch     → Failure
//!   │    └─                            → Success
//!   └─ tag 1 WEBAUTHN
//!        ├─ malformed tuple            → Payload (abort)
//!        ├─ unknown credential         → Failure
//!        └─ verifier(challenge)        → Success | Failure
//! ```
//!
//! Every mutating entry point runs inside `atomically`, so an abort leaves
//! no partial writes, logs or calls behind.

use crate::domain::calls::SelfCall;
use crate::domain::ecdsa;
use crate::domain::entities::{
    AccountImmutables, SignatureTag, UserOperation, ValidationCode, ERC1271_INVALID, ERC1271_MAGIC_VALUE,
};
use crate::domain::events::{SignerAdded, SignerRemoved};
use crate::domain::payload::{CreationPayload, WebAuthnSignature};
use crate::domain::replay_guard;
use crate::errors::AccountError;
use crate::ports::inbound::{Execution, SignatureValidation, SignerManagement};
use crate::ports::outbound::{AccountHost, FactoryAuthority, WebAuthnVerifier};
use pw_01_credential_store::{atomically, CredentialStore, StateAccess, StorageSlot};
use pw_02_authenticator_codec::credential_id_hash;
use shared_types::{Address, Hash, Signer, SignerKind, Word, U256};
use tracing::{debug, info, instrument, warn};

/// Slot of the one-time first-signer fuse.
pub const FIRST_SIGNER_FUSE_SLOT: StorageSlot = StorageSlot::Sequential(0);

/// The only signer kind this account registers.
const SIGNER_KIND: SignerKind = SignerKind::WebAuthnP256;

// =============================================================================
// SMART ACCOUNT
// =============================================================================

/// Handle on one deployed account.
///
/// Holds only immutable configuration; all mutable state lives in the host.
#[derive(Debug, Clone)]
pub struct SmartAccount<V, F> {
    address: Address,
    immutables: AccountImmutables,
    verifier: V,
    factory: F,
}

impl<V: WebAuthnVerifier, F: FactoryAuthority> SmartAccount<V, F> {
    /// Creates a handle on the account at `address`.
    pub fn new(address: Address, immutables: AccountImmutables, verifier: V, factory: F) -> Self {
        Self {
            address,
            immutables,
            verifier,
            factory,
        }
    }

    /// Address of the account.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Immutable references fixed at creation.
    pub fn immutables(&self) -> &AccountImmutables {
        &self.immutables
    }

    /// Returns true once the first signer has been registered.
    pub fn first_signer_set<H: StateAccess + ?Sized>(&self, host: &H) -> Result<bool, AccountError> {
        Ok(!host.load(self.address, &FIRST_SIGNER_FUSE_SLOT)?.is_zero())
    }

    fn signers(&self) -> CredentialStore<Signer> {
        CredentialStore::for_signers(self.address, SIGNER_KIND)
    }

    fn reject(&self, reason: &'static str) -> ValidationCode {
        warn!(account = %self.address, reason, "signature rejected");
        ValidationCode::Failure
    }

    // =========================================================================
    // CREATION
    // =========================================================================

    fn validate_creation<H: AccountHost + ?Sized>(
        &self,
        host: &H,
        payload: &[u8],
    ) -> Result<ValidationCode, AccountError> {
        if !host.nonce(self.address).is_zero() {
            return Ok(self.reject("creation signature after first operation"));
        }

        let Some(creation) = CreationPayload::slice(payload) else {
            return Ok(self.reject("creation payload too short"));
        };

        if creation.factory != self.immutables.factory {
            return Ok(self.reject("creation payload from foreign factory"));
        }

        let Some(authority_signature) = creation.authority_signature else {
            return Ok(self.reject("creation payload without authority signature"));
        };
        let message = replay_guard::creation_message(
            creation.username_hash,
            creation.x,
            creation.y,
            creation.credential_id_hash,
            self.address,
            host.chain_id(),
        );
        let hash = replay_guard::message_hash(&message);
        match ecdsa::recover_address(&hash, &authority_signature) {
            Ok(recovered) if recovered == self.factory.authority() => {}
            Ok(_) => return Ok(self.reject("creation signed by non-authority")),
            Err(err) => {
                debug!(error = %err, "authority signature unrecoverable");
                return Ok(self.reject("creation authority signature malformed"));
            }
        }

        let stored = self.signers().get(host, creation.credential_id_hash)?;
        let claimed = Signer::new(creation.credential_id_hash, creation.x, creation.y);
        if stored.is_zero() || stored != claimed {
            return Ok(self.reject("creation signer does not match stored signer"));
        }

        Ok(ValidationCode::Success)
    }

    // =========================================================================
    // WEBAUTHN
    // =========================================================================

    fn verify_webauthn<H: AccountHost + ?Sized>(
        &self,
        host: &H,
        signature: &WebAuthnSignature,
        challenge: &Hash,
    ) -> Result<ValidationCode, AccountError> {
        let signer = self.signers().get(host, signature.credential_id_hash)?;
        if signer.is_zero() {
            return Ok(self.reject("unknown credential"));
        }

        let valid = self.verifier.verify(
            &signature.authenticator_data,
            &signature.client_data,
            challenge,
            signature.r,
            signature.s,
            signer.x,
            signer.y,
        );
        if !valid {
            return Ok(self.reject("webauthn assertion invalid"));
        }
        Ok(ValidationCode::Success)
    }

    fn validate_webauthn<H: AccountHost + ?Sized>(
        &self,
        host: &H,
        op: &UserOperation,
        payload: &[u8],
    ) -> Result<ValidationCode, AccountError> {
        let signature = WebAuthnSignature::decode(payload)?;

        if op.sender != self.address {
            return Ok(self.reject("operation addressed to another account"));
        }

        let operation_hash =
            replay_guard::operation_hash(self.address, op.nonce, &op.call_data, &op.sponsor_payload);
        let challenge =
            replay_guard::webauthn_challenge(operation_hash, self.immutables.entrypoint, host.chain_id());

        self.verify_webauthn(host, &signature, &challenge)
    }

    // =========================================================================
    // MUTATION HELPERS
    // =========================================================================

    fn register_signer<H: AccountHost + ?Sized>(&self, host: &mut H, signer: Signer) -> Result<(), AccountError> {
        self.signers().set(host, &signer)?;
        host.emit(
            SignerAdded {
                kind: SIGNER_KIND,
                signer,
            }
            .to_log(self.address),
        );
        info!(account = %self.address, credential = %signer.credential_id_hash, "signer added");
        Ok(())
    }

    fn dispatch<H: AccountHost + ?Sized>(
        &self,
        host: &mut H,
        target: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Vec<u8>, AccountError> {
        if target != self.address {
            return Ok(host.call(self.address, target, value, data)?);
        }

        match SelfCall::decode(data)? {
            SelfCall::AddWebAuthnSigner {
                x,
                y,
                credential_id_hash,
            } => self.add_webauthn_signer(host, self.address, x, y, credential_id_hash)?,
            SelfCall::RemoveWebAuthnSigner { credential_id_hash } => {
                self.remove_webauthn_signer(host, self.address, credential_id_hash)?;
            }
        }
        Ok(Vec::new())
    }

    fn ensure_executor(&self, caller: Address) -> Result<(), AccountError> {
        if caller != self.immutables.entrypoint && caller != self.address {
            warn!(account = %self.address, %caller, "execute from unauthorized caller");
            return Err(AccountError::NotEntryPoint { caller });
        }
        Ok(())
    }

    fn ensure_self(&self, caller: Address) -> Result<(), AccountError> {
        if caller != self.address {
            warn!(account = %self.address, %caller, "self-only entry point called externally");
            return Err(AccountError::NotSelf { caller });
        }
        Ok(())
    }
}

// =============================================================================
// INBOUND PORTS
// =============================================================================

impl<V, F, H> SignatureValidation<H> for SmartAccount<V, F>
where
    V: WebAuthnVerifier,
    F: FactoryAuthority,
    H: AccountHost + ?Sized,
{
    #[instrument(skip(self, host, op), fields(account = %self.address, nonce = %op.nonce))]
    fn validate_signature(
        &self,
        host: &H,
        caller: Address,
        op: &UserOperation,
    ) -> Result<ValidationCode, AccountError> {
        if caller != self.immutables.entrypoint {
            warn!(%caller, "validation requested by non-entrypoint");
            return Err(AccountError::NotEntryPoint { caller });
        }

        let Some((&tag, payload)) = op.signature.split_first() else {
            return Ok(self.reject("empty signature"));
        };

        match SignatureTag::from_byte(tag) {
            Some(SignatureTag::Creation) => self.validate_creation(host, payload),
            Some(SignatureTag::WebAuthn) => self.validate_webauthn(host, op, payload),
            None => {
                debug!(tag, "unknown signature tag");
                Ok(self.reject("unknown signature tag"))
            }
        }
    }

    #[instrument(skip(self, host, signature), fields(account = %self.address))]
    fn is_valid_signature(&self, host: &H, hash: Hash, signature: &[u8]) -> Result<[u8; 4], AccountError> {
        let Some((&tag, payload)) = signature.split_first() else {
            return Ok(ERC1271_INVALID);
        };
        if SignatureTag::from_byte(tag) != Some(SignatureTag::WebAuthn) {
            return Ok(ERC1271_INVALID);
        }

        let signature = WebAuthnSignature::decode(payload)?;
        let code = self.verify_webauthn(host, &signature, &hash)?;
        Ok(if code.is_success() {
            ERC1271_MAGIC_VALUE
        } else {
            ERC1271_INVALID
        })
    }
}

impl<V, F, H> Execution<H> for SmartAccount<V, F>
where
    V: WebAuthnVerifier,
    F: FactoryAuthority,
    H: AccountHost + ?Sized,
{
    #[instrument(skip(self, host, data), fields(account = %self.address, %target))]
    fn execute(
        &self,
        host: &mut H,
        caller: Address,
        target: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Vec<u8>, AccountError> {
        self.ensure_executor(caller)?;
        atomically(host, |h| self.dispatch(h, target, value, data))
    }

    #[instrument(skip_all, fields(account = %self.address, calls = targets.len()))]
    fn execute_batch(
        &self,
        host: &mut H,
        caller: Address,
        targets: &[Address],
        values: &[U256],
        datas: &[Vec<u8>],
    ) -> Result<Vec<Vec<u8>>, AccountError> {
        self.ensure_executor(caller)?;
        if targets.len() != values.len() || targets.len() != datas.len() {
            return Err(AccountError::BatchLengthMismatch {
                targets: targets.len(),
                values: values.len(),
                datas: datas.len(),
            });
        }

        atomically(host, |h| {
            targets
                .iter()
                .zip(values)
                .zip(datas)
                .map(|((target, value), data)| self.dispatch(h, *target, *value, data))
                .collect()
        })
    }
}

impl<V, F, H> SignerManagement<H> for SmartAccount<V, F>
where
    V: WebAuthnVerifier,
    F: FactoryAuthority,
    H: AccountHost + ?Sized,
{
    #[instrument(skip(self, host), fields(account = %self.address))]
    fn add_first_signer(
        &self,
        host: &mut H,
        caller: Address,
        x: U256,
        y: U256,
        credential_id_hash: Hash,
    ) -> Result<(), AccountError> {
        if caller != self.immutables.factory {
            warn!(%caller, "first signer from non-factory caller");
            return Err(AccountError::NotFactory { caller });
        }

        let nonce = host.nonce(self.address);
        if !nonce.is_zero() {
            return Err(AccountError::NonceNotZero { nonce });
        }

        atomically(host, |h| {
            if self.first_signer_set(h)? {
                return Err(AccountError::FirstSignerAlreadySet);
            }
            h.store(self.address, FIRST_SIGNER_FUSE_SLOT, Word::from_bool(true))?;
            self.register_signer(h, Signer::new(credential_id_hash, x, y))
        })
    }

    #[instrument(skip(self, host), fields(account = %self.address))]
    fn add_webauthn_signer(
        &self,
        host: &mut H,
        caller: Address,
        x: U256,
        y: U256,
        credential_id_hash: Hash,
    ) -> Result<(), AccountError> {
        self.ensure_self(caller)?;
        atomically(host, |h| self.register_signer(h, Signer::new(credential_id_hash, x, y)))
    }

    #[instrument(skip(self, host), fields(account = %self.address))]
    fn remove_webauthn_signer(
        &self,
        host: &mut H,
        caller: Address,
        credential_id_hash: Hash,
    ) -> Result<(), AccountError> {
        self.ensure_self(caller)?;
        atomically(host, |h| {
            self.signers().remove(h, credential_id_hash)?;
            h.emit(
                SignerRemoved {
                    kind: SIGNER_KIND,
                    credential_id_hash,
                }
                .to_log(self.address),
            );
            info!(credential = %credential_id_hash, "signer removed");
            Ok(())
        })
    }

    fn get_signer(&self, host: &H, credential_id_hash: Hash) -> Result<Signer, AccountError> {
        Ok(self.signers().get(host, credential_id_hash)?)
    }

    fn get_signer_by_credential_id(&self, host: &H, credential_id: &[u8]) -> Result<Signer, AccountError> {
        self.get_signer(host, credential_id_hash(credential_id))
    }
}

// =============================================================================
// TESTS
// =============================================================================
