//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the credential store depends on. The execution host (or a
//! test double) implements them.

use crate::domain::namespace::StorageSlot;
use crate::errors::StateError;
use shared_types::{Address, Word};

// =============================================================================
// STATE ACCESS
// =============================================================================

/// Word-granular storage, partitioned per account.
///
/// A slot that was never written reads as `Word::ZERO`.
pub trait StateAccess {
    /// Reads one word.
    fn load(&self, account: Address, slot: &StorageSlot) -> Result<Word, StateError>;

    /// Writes one word. Writing `Word::ZERO` clears the slot.
    fn store(&mut self, account: Address, slot: StorageSlot, value: Word)
        -> Result<(), StateError>;
}

// =============================================================================
// JOURNAL
// =============================================================================

/// All-or-nothing write grouping.
///
/// Checkpoints nest. `commit` and `revert` must be called for the innermost
/// open checkpoint. Committing the outermost checkpoint makes every write
/// since it final; reverting any checkpoint undoes every write made since it
/// was taken, including writes committed by inner checkpoints.
pub trait Journaled {
    /// Opaque handle for one checkpoint.
    type Checkpoint: Copy + std::fmt::Debug;

    /// Opens a checkpoint.
    fn checkpoint(&mut self) -> Self::Checkpoint;

    /// Closes a checkpoint, keeping its writes.
    fn commit(&mut self, checkpoint: Self::Checkpoint) -> Result<(), StateError>;

    /// Closes a checkpoint, undoing its writes.
    fn revert(&mut self, checkpoint: Self::Checkpoint) -> Result<(), StateError>;
}
