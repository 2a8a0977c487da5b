//! # RocksDB State
//!
//! Persistent backend. Writes made while a checkpoint is open go to an
//! in-memory overlay; committing the outermost checkpoint flushes the overlay
//! as one atomic `WriteBatch`. Reverting drops the overlay entries written
//! since the checkpoint. Writes outside any checkpoint go straight to disk.
//!
//! ## Key Layout
//!
//! `account (20 bytes) ‖ StorageSlot::encode()`. Zero words are deleted
//! rather than stored.

use crate::domain::namespace::StorageSlot;
use crate::errors::StateError;
use crate::ports::outbound::{Journaled, StateAccess};
use rocksdb::{Options, WriteBatch, WriteOptions, DB};
use shared_types::{Address, Word};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// RocksDB backend configuration.
#[derive(Debug, Clone)]
pub struct RocksDbStateConfig {
    /// Database directory.
    pub path: PathBuf,
    /// fsync every batch (default: true for durability).
    pub sync_writes: bool,
    /// Write buffer size in bytes (default: 16MB).
    pub write_buffer_size: usize,
    /// Open an existing database for inspection only. Every write fails.
    pub read_only: bool,
}

impl Default for RocksDbStateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/credentials"),
            sync_writes: true,
            write_buffer_size: 16 * 1024 * 1024, // 16MB
            read_only: false,
        }
    }
}

impl RocksDbStateConfig {
    /// Config for testing (small buffers, no sync).
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sync_writes: false,
            write_buffer_size: 1024 * 1024, // 1MB
            read_only: false,
        }
    }
}

/// Overlay value captured before a journaled write.
#[derive(Debug, Clone)]
struct JournalEntry {
    key: Vec<u8>,
    previous: Option<Word>,
}

/// Checkpoint handle: the nesting depth at which it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RocksDbCheckpoint(usize);

/// RocksDB-backed journaled state.
pub struct RocksDbState {
    db: DB,
    config: RocksDbStateConfig,
    overlay: HashMap<Vec<u8>, Word>,
    journal: Vec<JournalEntry>,
    checkpoints: Vec<usize>,
}

impl std::fmt::Debug for RocksDbState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksDbState")
            .field("path", &self.config.path)
            .field("pending", &self.overlay.len())
            .field("depth", &self.checkpoints.len())
            .finish()
    }
}

fn backend(context: &str, err: &rocksdb::Error) -> StateError {
    StateError::Backend {
        message: format!("{context}: {err}"),
    }
}

fn db_key(account: Address, slot: &StorageSlot) -> Vec<u8> {
    let encoded = slot.encode();
    let mut key = Vec::with_capacity(20 + encoded.len());
    key.extend_from_slice(account.as_bytes());
    key.extend_from_slice(&encoded);
    key
}

impl RocksDbState {
    /// Open or create the database.
    pub fn open(config: RocksDbStateConfig) -> Result<Self, StateError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let db = if config.read_only {
            DB::open_for_read_only(&opts, &config.path, false)
        } else {
            DB::open(&opts, &config.path)
        }
        .map_err(|e| backend("failed to open RocksDB", &e))?;
        info!(path = %config.path.display(), read_only = config.read_only, "credential state opened");

        Ok(Self {
            db,
            config,
            overlay: HashMap::new(),
            journal: Vec::new(),
            checkpoints: Vec::new(),
        })
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }

    fn read_disk(&self, key: &[u8]) -> Result<Word, StateError> {
        match self.db.get(key).map_err(|e| backend("RocksDB get failed", &e))? {
            None => Ok(Word::ZERO),
            Some(bytes) => <[u8; 32]>::try_from(bytes.as_slice())
                .map(Word::new)
                .map_err(|_| StateError::CorruptWord { len: bytes.len() }),
        }
    }

    fn check_innermost(&self, checkpoint: RocksDbCheckpoint) -> Result<usize, StateError> {
        match self.checkpoints.len().checked_sub(1) {
            Some(top) if top == checkpoint.0 => Ok(self.checkpoints[top]),
            _ => Err(StateError::CheckpointMismatch {
                requested: checkpoint.0,
                depth: self.checkpoints.len(),
            }),
        }
    }

    fn flush_overlay(&mut self) -> Result<(), StateError> {
        if self.overlay.is_empty() {
            return Ok(());
        }
        let mut batch = WriteBatch::default();
        for (key, value) in &self.overlay {
            if value.is_zero() {
                batch.delete(key);
            } else {
                batch.put(key, value.as_bytes());
            }
        }
        let pending = self.overlay.len();
        self.db
            .write_opt(batch, &self.write_options())
            .map_err(|e| backend("RocksDB batch write failed", &e))?;
        self.overlay.clear();
        debug!(pending, "overlay flushed");
        Ok(())
    }
}

impl StateAccess for RocksDbState {
    fn load(&self, account: Address, slot: &StorageSlot) -> Result<Word, StateError> {
        let key = db_key(account, slot);
        match self.overlay.get(&key) {
            Some(word) => Ok(*word),
            None => self.read_disk(&key),
        }
    }

    fn store(&mut self, account: Address, slot: StorageSlot, value: Word) -> Result<(), StateError> {
        let key = db_key(account, &slot);

        if self.checkpoints.is_empty() {
            let result = if value.is_zero() {
                self.db.delete_opt(&key, &self.write_options())
            } else {
                self.db.put_opt(&key, value.as_bytes(), &self.write_options())
            };
            return result.map_err(|e| backend("RocksDB write failed", &e));
        }

        let previous = self.overlay.insert(key.clone(), value);
        self.journal.push(JournalEntry { key, previous });
        Ok(())
    }
}

impl Journaled for RocksDbState {
    type Checkpoint = RocksDbCheckpoint;

    fn checkpoint(&mut self) -> RocksDbCheckpoint {
        self.checkpoints.push(self.journal.len());
        RocksDbCheckpoint(self.checkpoints.len() - 1)
    }

    fn commit(&mut self, checkpoint: RocksDbCheckpoint) -> Result<(), StateError> {
        self.check_innermost(checkpoint)?;
        self.checkpoints.pop();
        if !self.checkpoints.is_empty() {
            return Ok(());
        }

        // Outermost section: the checkpoint is closed and the journal dropped
        // whether or not the batch lands, so a failed flush discards the section.
        self.journal.clear();
        let flushed = self.flush_overlay();
        if let Err(err) = &flushed {
            warn!(pending = self.overlay.len(), error = %err, "overlay flush failed, section discarded");
            self.overlay.clear();
        }
        flushed
    }

    fn revert(&mut self, checkpoint: RocksDbCheckpoint) -> Result<(), StateError> {
        let mark = self.check_innermost(checkpoint)?;
        self.checkpoints.pop();
        while self.journal.len() > mark {
            if let Some(entry) = self.journal.pop() {
                match entry.previous {
                    Some(word) => self.overlay.insert(entry.key, word),
                    None => self.overlay.remove(&entry.key),
                };
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
