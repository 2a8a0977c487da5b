//! # Error Types
//!
//! All error types for the smart account.
//!
//! Soft validation failures are not errors: they surface as
//! `ValidationCode::Failure`. Everything here aborts the calling entry point.

use pw_01_credential_store::{StateError, StoreError};
use pw_02_authenticator_codec::CodecError;
use shared_types::{Address, U256};
use thiserror::Error;

// =============================================================================
// SIGNATURE ERRORS
// =============================================================================

/// Errors from ECDSA recovery.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// r or s is zero or not below the curve order.
    #[error("invalid signature format")]
    InvalidFormat,

    /// s is in the upper half of the curve order (EIP-2).
    #[error("malleable signature: s is in upper half of curve order")]
    MalleableSignature,

    /// v is not one of 0, 1, 27, 28.
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery failed.
    #[error("public key recovery failed")]
    RecoveryFailed,

    /// Recovered signer differs from the expected one.
    #[error("signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch {
        /// Expected signer.
        expected: Address,
        /// Recovered signer.
        actual: Address,
    },
}

// =============================================================================
// PAYLOAD ERRORS
// =============================================================================

/// Structural errors in a WebAuthn signature tuple.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The tuple is shorter than its static head or a referenced tail.
    #[error("payload too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum length required.
        expected: usize,
        /// Length provided.
        actual: usize,
    },

    /// A dynamic field offset points outside the payload or into the head.
    #[error("invalid offset for {field}: {offset}")]
    InvalidOffset {
        /// Field name.
        field: &'static str,
        /// Offset found.
        offset: U256,
    },

    /// A dynamic field length runs past the end of the payload.
    #[error("invalid length for {field}: {length}")]
    InvalidLength {
        /// Field name.
        field: &'static str,
        /// Length found.
        length: U256,
    },

    /// A static field does not fit its declared type.
    #[error("value out of range for {field}")]
    ValueOutOfRange {
        /// Field name.
        field: &'static str,
    },
}

// =============================================================================
// CALL ERRORS
// =============================================================================

/// Errors decoding a self-call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Call data shorter than a selector.
    #[error("call data too short for a selector")]
    MissingSelector,

    /// Selector does not name a self-call.
    #[error("unknown selector: 0x{}", hex_selector(.0))]
    UnknownSelector([u8; 4]),

    /// Arguments do not match the selector's signature.
    #[error("malformed arguments: expected {expected} bytes, got {actual}")]
    MalformedArguments {
        /// Argument bytes required.
        expected: usize,
        /// Argument bytes provided.
        actual: usize,
    },
}

fn hex_selector(selector: &[u8; 4]) -> String {
    selector.iter().map(|b| format!("{b:02x}")).collect()
}

// =============================================================================
// HOST ERRORS
// =============================================================================

/// Errors raised by the execution host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// An external call reverted.
    #[error("call to {target:?} reverted: {reason}")]
    CallReverted {
        /// Call target.
        target: Address,
        /// Revert reason.
        reason: String,
    },

    /// State failure inside the host.
    #[error("state error: {0}")]
    State(#[from] StateError),
}

/// Errors loading host configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

// =============================================================================
// ACCOUNT ERRORS
// =============================================================================

/// Errors that abort an account entry point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Caller is not the account's entrypoint.
    #[error("caller {caller:?} is not the entrypoint")]
    NotEntryPoint {
        /// Rejected caller.
        caller: Address,
    },

    /// Caller is not the account's factory.
    #[error("caller {caller:?} is not the factory")]
    NotFactory {
        /// Rejected caller.
        caller: Address,
    },

    /// Caller is not the account itself.
    #[error("caller {caller:?} is not the account")]
    NotSelf {
        /// Rejected caller.
        caller: Address,
    },

    /// The first-signer fuse is already blown.
    #[error("first signer already set")]
    FirstSignerAlreadySet,

    /// First-signer registration attempted after the first operation.
    #[error("nonce is {nonce}, first signer requires nonce 0")]
    NonceNotZero {
        /// Current nonce.
        nonce: U256,
    },

    /// `execute_batch` argument arrays differ in length.
    #[error("batch length mismatch: {targets} targets, {values} values, {datas} call datas")]
    BatchLengthMismatch {
        /// Number of targets.
        targets: usize,
        /// Number of values.
        values: usize,
        /// Number of call datas.
        datas: usize,
    },

    /// Malformed signature payload.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Malformed authenticator data.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Credential store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Malformed self-call.
    #[error("call error: {0}")]
    Call(#[from] CallError),

    /// Host failure.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// State failure.
    #[error("state error: {0}")]
    State(#[from] StateError),
}
