//! # In-Memory State
//!
//! Journaled in-memory backend. Every write made while a checkpoint is open
//! records the previous value so it can be undone.

use crate::domain::namespace::StorageSlot;
use crate::errors::StateError;
use crate::ports::outbound::{Journaled, StateAccess};
use shared_types::{Address, Word};
use std::collections::HashMap;

/// Previous value of one slot, captured before a write.
#[derive(Debug, Clone)]
struct JournalEntry {
    account: Address,
    slot: StorageSlot,
    previous: Word,
}

/// Checkpoint handle: the nesting depth at which it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCheckpoint(usize);

/// In-memory state for tests and simulation.
#[derive(Debug, Default)]
pub struct InMemoryState {
    storage: HashMap<(Address, StorageSlot), Word>,
    journal: Vec<JournalEntry>,
    /// Journal length at each open checkpoint.
    checkpoints: Vec<usize>,
}

impl InMemoryState {
    /// Create a new empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-zero words held for `account`.
    #[must_use]
    pub fn occupied_slots(&self, account: Address) -> usize {
        self.storage.keys().filter(|(a, _)| *a == account).count()
    }

    /// Current checkpoint nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    fn check_innermost(&self, checkpoint: MemoryCheckpoint) -> Result<usize, StateError> {
        match self.checkpoints.len().checked_sub(1) {
            Some(top) if top == checkpoint.0 => Ok(self.checkpoints[top]),
            _ => Err(StateError::CheckpointMismatch {
                requested: checkpoint.0,
                depth: self.checkpoints.len(),
            }),
        }
    }

    fn write_raw(&mut self, account: Address, slot: StorageSlot, value: Word) {
        if value.is_zero() {
            self.storage.remove(&(account, slot));
        } else {
            self.storage.insert((account, slot), value);
        }
    }
}

impl StateAccess for InMemoryState {
    fn load(&self, account: Address, slot: &StorageSlot) -> Result<Word, StateError> {
        Ok(self
            .storage
            .get(&(account, *slot))
            .copied()
            .unwrap_or(Word::ZERO))
    }

    fn store(&mut self, account: Address, slot: StorageSlot, value: Word) -> Result<(), StateError> {
        if !self.checkpoints.is_empty() {
            let previous = self.load(account, &slot)?;
            self.journal.push(JournalEntry {
                account,
                slot,
                previous,
            });
        }
        self.write_raw(account, slot, value);
        Ok(())
    }
}

impl Journaled for InMemoryState {
    type Checkpoint = MemoryCheckpoint;

    fn checkpoint(&mut self) -> MemoryCheckpoint {
        self.checkpoints.push(self.journal.len());
        MemoryCheckpoint(self.checkpoints.len() - 1)
    }

    fn commit(&mut self, checkpoint: MemoryCheckpoint) -> Result<(), StateError> {
        self.check_innermost(checkpoint)?;
        self.checkpoints.pop();
        if self.checkpoints.is_empty() {
            self.journal.clear();
        }
        Ok(())
    }

    fn revert(&mut self, checkpoint: MemoryCheckpoint) -> Result<(), StateError> {
        let mark = self.check_innermost(checkpoint)?;
        self.checkpoints.pop();
        while self.journal.len() > mark {
            if let Some(entry) = self.journal.pop() {
                self.write_raw(entry.account, entry.slot, entry.previous);
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
