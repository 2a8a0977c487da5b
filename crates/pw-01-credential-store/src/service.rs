//! # Credential Store Service
//!
//! Record admission over the `StateAccess` port. One `CredentialStore` value
//! addresses one namespace of one account; it holds no state itself.

use crate::domain::namespace::{NamespaceRoot, StorageSlot};
use crate::domain::record::StoredRecord;
use crate::errors::{StateError, StoreError};
use crate::ports::outbound::{Journaled, StateAccess};
use shared_types::{Address, Hash, Signer, SignerKind, Word};
use std::marker::PhantomData;
use tracing::{debug, warn};

// =============================================================================
// CREDENTIAL STORE
// =============================================================================

/// Typed view over one namespace of one account.
#[derive(Debug)]
pub struct CredentialStore<R> {
    account: Address,
    root: NamespaceRoot,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for CredentialStore<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for CredentialStore<R> {}

impl CredentialStore<Signer> {
    /// Store holding `kind` signers for `account`.
    #[must_use]
    pub fn for_signers(account: Address, kind: SignerKind) -> Self {
        Self::new(account, NamespaceRoot::for_kind(kind))
    }
}

impl<R: StoredRecord> CredentialStore<R> {
    /// Store for records of type `R` under `root`.
    #[must_use]
    pub fn new(account: Address, root: NamespaceRoot) -> Self {
        Self {
            account,
            root,
            _record: PhantomData,
        }
    }

    /// The owning account.
    #[must_use]
    pub const fn account(&self) -> Address {
        self.account
    }

    /// The namespace root.
    #[must_use]
    pub const fn root(&self) -> NamespaceRoot {
        self.root
    }

    fn slot(&self, key: Hash, offset: u8) -> StorageSlot {
        StorageSlot::namespaced(self.root, key, offset)
    }

    fn head<S: StateAccess + ?Sized>(&self, state: &S, key: Hash) -> Result<Word, StateError> {
        state.load(self.account, &self.slot(key, 0))
    }

    /// Inserts a record.
    ///
    /// # Errors
    ///
    /// - `InvalidRecord` if the record's first word is zero.
    /// - `OverrideNotAllowed` if a record already exists under its key.
    pub fn set<S: StateAccess + ?Sized>(&self, state: &mut S, record: &R) -> Result<(), StoreError> {
        let key = record.key();
        let words = record.to_words();

        if words.len() != usize::from(R::WORDS) {
            return Err(StoreError::InvalidRecord {
                reason: "word count does not match record width",
            });
        }
        if words[0].is_zero() {
            return Err(StoreError::InvalidRecord {
                reason: "zero first word is indistinguishable from absence",
            });
        }
        if Hash::from(words[0]) != key {
            return Err(StoreError::InvalidRecord {
                reason: "first word must be the record key",
            });
        }
        if !self.head(state, key)?.is_zero() {
            warn!(%key, account = %self.account, "refusing to override existing record");
            return Err(StoreError::OverrideNotAllowed { key });
        }

        for (offset, word) in (0u8..).zip(words) {
            state.store(self.account, self.slot(key, offset), word)?;
        }

        debug!(%key, account = %self.account, slot = %self.slot(key, 0).address(), "record stored");
        Ok(())
    }

    /// Reads a record, returning the zero sentinel when absent.
    pub fn get<S: StateAccess + ?Sized>(&self, state: &S, key: Hash) -> Result<R, StoreError> {
        let mut words = Vec::with_capacity(usize::from(R::WORDS));
        for offset in 0..R::WORDS {
            words.push(state.load(self.account, &self.slot(key, offset))?);
        }
        if words[0].is_zero() {
            return Ok(R::zero());
        }
        Ok(R::from_words(&words))
    }

    /// Reads a record.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record exists under `key`.
    pub fn try_get<S: StateAccess + ?Sized>(&self, state: &S, key: Hash) -> Result<R, StoreError> {
        if !self.has(state, key)? {
            return Err(StoreError::NotFound { key });
        }
        self.get(state, key)
    }

    /// Returns true if a record exists under `key`.
    pub fn has<S: StateAccess + ?Sized>(&self, state: &S, key: Hash) -> Result<bool, StoreError> {
        Ok(!self.head(state, key)?.is_zero())
    }

    /// Zeroes every word of the record under `key` and returns what was removed.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record exists under `key`.
    pub fn remove<S: StateAccess + ?Sized>(&self, state: &mut S, key: Hash) -> Result<R, StoreError> {
        let removed = self.try_get(state, key)?;
        for offset in 0..R::WORDS {
            state.store(self.account, self.slot(key, offset), Word::ZERO)?;
        }
        debug!(%key, account = %self.account, "record removed");
        Ok(removed)
    }
}

// =============================================================================
// ATOMIC SECTIONS
// =============================================================================

/// Runs `f` inside a checkpoint: commit on `Ok`, revert on `Err`.
///
/// Sections nest; an inner commit is undone if an outer section reverts.
///
/// # Errors
///
/// Returns the error of `f`, or the journal error if committing fails.
pub fn atomically<H, T, E, F>(host: &mut H, f: F) -> Result<T, E>
where
    H: Journaled + ?Sized,
    E: From<StateError>,
    F: FnOnce(&mut H) -> Result<T, E>,
{
    let checkpoint = host.checkpoint();
    match f(host) {
        Ok(value) => {
            host.commit(checkpoint)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(revert_err) = host.revert(checkpoint) {
                warn!(?checkpoint, error = %revert_err, "revert failed after aborted section");
            }
            Err(err)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
