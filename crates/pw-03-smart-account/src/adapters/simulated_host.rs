//! # Simulated Host
//!
//! In-process execution host for tests and simulation. Wraps any journaled
//! state backend and journals its own side effects (logs, external calls and
//! deployed instances) alongside it, so reverting a checkpoint unwinds all of
//! them together.
//!
//! Deployed instances are tracked by address with the fingerprint of the
//! template they were created from. This is the deterministic-allocation
//! substrate the factory deploys into.

use crate::errors::{ConfigError, HostError};
use crate::ports::outbound::AccountHost;
use pw_01_credential_store::{InMemoryState, Journaled, StateAccess, StateError, StorageSlot};
use shared_types::{Address, Hash, Log, Word, U256};
use std::collections::{HashMap, HashSet};
use tracing::debug;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    /// Network identifier bound into every signed message.
    pub chain_id: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { chain_id: 1 }
    }
}

impl HostConfig {
    /// Environment variable overriding the chain id.
    pub const CHAIN_ID_VAR: &'static str = "PW_CHAIN_ID";

    /// Defaults overridden by `PW_CHAIN_ID` when set.
    ///
    /// # Errors
    ///
    /// `InvalidEnv` if the variable is set but not a decimal `u64`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(Self::CHAIN_ID_VAR) {
            config.chain_id = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: Self::CHAIN_ID_VAR,
                value: raw.clone(),
            })?;
        }
        Ok(config)
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// An external call performed through the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    /// Calling account.
    pub from: Address,
    /// Call target.
    pub target: Address,
    /// Value transferred.
    pub value: U256,
    /// Call data.
    pub data: Vec<u8>,
}

/// Side effect to undo on revert.
#[derive(Debug, Clone)]
enum Undo {
    Log,
    Call,
    Instance(Address),
}

/// Checkpoint of the host and its state backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCheckpoint<C> {
    state: C,
    depth: usize,
}

// =============================================================================
// SIMULATED HOST
// =============================================================================

/// In-process execution host.
#[derive(Debug)]
pub struct SimulatedHost<S = InMemoryState> {
    state: S,
    config: HostConfig,
    nonces: HashMap<Address, U256>,
    logs: Vec<Log>,
    calls: Vec<CallRecord>,
    instances: HashMap<Address, Hash>,
    reverting: HashSet<Address>,
    undo: Vec<Undo>,
    /// Undo-log length at each open checkpoint.
    marks: Vec<usize>,
}

impl SimulatedHost<InMemoryState> {
    /// Host over a fresh in-memory state.
    #[must_use]
    pub fn new(config: HostConfig) -> Self {
        Self::with_state(InMemoryState::new(), config)
    }
}

impl Default for SimulatedHost<InMemoryState> {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

impl<S> SimulatedHost<S> {
    /// Host over an existing state backend.
    pub fn with_state(state: S, config: HostConfig) -> Self {
        Self {
            state,
            config,
            nonces: HashMap::new(),
            logs: Vec::new(),
            calls: Vec::new(),
            instances: HashMap::new(),
            reverting: HashSet::new(),
            undo: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// The wrapped state backend.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Host configuration.
    pub fn config(&self) -> HostConfig {
        self.config
    }

    /// Every log emitted and not reverted.
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Every external call performed and not reverted.
    pub fn calls(&self) -> &[CallRecord] {
        &self.calls
    }

    /// Advances `account`'s nonce, as the host does after each operation.
    pub fn increment_nonce(&mut self, account: Address) -> U256 {
        let nonce = self.nonces.entry(account).or_insert_with(U256::zero);
        *nonce = nonce.saturating_add(U256::one());
        *nonce
    }

    /// Makes every call to `target` revert.
    pub fn set_reverting(&mut self, target: Address) {
        self.reverting.insert(target);
    }

    /// Template fingerprint of the instance at `address`, if one exists.
    pub fn instance_at(&self, address: Address) -> Option<Hash> {
        self.instances.get(&address).copied()
    }

    /// Records a new instance. Returns false if `address` is occupied.
    pub fn create_instance(&mut self, address: Address, fingerprint: Hash) -> bool {
        if self.instances.contains_key(&address) {
            return false;
        }
        self.instances.insert(address, fingerprint);
        self.record(Undo::Instance(address));
        debug!(%address, %fingerprint, "instance created");
        true
    }

    fn record(&mut self, undo: Undo) {
        if !self.marks.is_empty() {
            self.undo.push(undo);
        }
    }

    fn check_innermost(&self, depth: usize) -> Result<usize, StateError> {
        match self.marks.len().checked_sub(1) {
            Some(top) if top == depth => Ok(self.marks[top]),
            _ => Err(StateError::CheckpointMismatch {
                requested: depth,
                depth: self.marks.len(),
            }),
        }
    }
}

impl<S: StateAccess> StateAccess for SimulatedHost<S> {
    fn load(&self, account: Address, slot: &StorageSlot) -> Result<Word, StateError> {
        self.state.load(account, slot)
    }

    fn store(&mut self, account: Address, slot: StorageSlot, value: Word) -> Result<(), StateError> {
        self.state.store(account, slot, value)
    }
}

impl<S: Journaled> Journaled for SimulatedHost<S> {
    type Checkpoint = HostCheckpoint<S::Checkpoint>;

    fn checkpoint(&mut self) -> Self::Checkpoint {
        self.marks.push(self.undo.len());
        HostCheckpoint {
            state: self.state.checkpoint(),
            depth: self.marks.len() - 1,
        }
    }

    fn commit(&mut self, checkpoint: Self::Checkpoint) -> Result<(), StateError> {
        self.check_innermost(checkpoint.depth)?;
        self.state.commit(checkpoint.state)?;
        self.marks.pop();
        if self.marks.is_empty() {
            self.undo.clear();
        }
        Ok(())
    }

    fn revert(&mut self, checkpoint: Self::Checkpoint) -> Result<(), StateError> {
        let mark = self.check_innermost(checkpoint.depth)?;
        self.state.revert(checkpoint.state)?;
        self.marks.pop();
        while self.undo.len() > mark {
            match self.undo.pop() {
                Some(Undo::Log) => {
                    self.logs.pop();
                }
                Some(Undo::Call) => {
                    self.calls.pop();
                }
                Some(Undo::Instance(address)) => {
                    self.instances.remove(&address);
                }
                None => break,
            }
        }
        Ok(())
    }
}

impl<S: StateAccess + Journaled> AccountHost for SimulatedHost<S> {
    fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    fn nonce(&self, account: Address) -> U256 {
        self.nonces.get(&account).copied().unwrap_or_default()
    }

    fn emit(&mut self, log: Log) {
        self.logs.push(log);
        self.record(Undo::Log);
    }

    fn call(&mut self, from: Address, target: Address, value: U256, data: &[u8]) -> Result<Vec<u8>, HostError> {
        if self.reverting.contains(&target) {
            return Err(HostError::CallReverted {
                target,
                reason: "target reverted".to_string(),
            });
        }
        self.calls.push(CallRecord {
            from,
            target,
            value,
            data: data.to_vec(),
        });
        self.record(Undo::Call);
        Ok(Vec::new())
    }
}

// =============================================================================
// TESTS
// =============================================================================
