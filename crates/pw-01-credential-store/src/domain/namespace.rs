//! # Namespaces and Slots
//!
//! A namespace root is derived once per signer kind:
//!
//! ```text
//! root = keccak256(be32(uint(keccak256(tag)) - 1)) & !0xff
//! ```
//!
//! The subtraction removes the known preimage and the masked low byte leaves
//! room for 256 consecutive words below any slot derived from the root.
//! Records are then addressed by `keccak256(key ‖ root)`, the same layout a
//! mapping declared at `root` uses.
//!
//! The state port never sees raw addresses. It sees `StorageSlot`, a tagged
//! key that keeps namespaced and sequential slots structurally apart.

use shared_types::{keccak256, keccak256_concat, Hash, SignerKind, Word, U256};

// =============================================================================
// NAMESPACE ROOT
// =============================================================================

/// Root of one storage namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceRoot(pub Hash);

impl NamespaceRoot {
    /// Derives the root for a human-readable tag.
    #[must_use]
    pub fn derive(tag: &str) -> Self {
        let outer = keccak256(tag.as_bytes());
        let shifted = U256::from_big_endian(outer.as_bytes()).overflowing_sub(U256::one()).0;
        let mut root = keccak256(Word::from_u256(shifted).as_bytes()).0;
        root[31] = 0;
        Self(Hash::new(root))
    }

    /// Root for a signer kind.
    #[must_use]
    pub fn for_kind(kind: SignerKind) -> Self {
        Self::derive(kind.namespace_tag())
    }

    /// Returns the root bytes.
    #[must_use]
    pub const fn as_hash(&self) -> &Hash {
        &self.0
    }
}

// =============================================================================
// SLOT ADDRESS
// =============================================================================

/// Flat 256-bit address of the first word of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotAddress(pub Hash);

impl SlotAddress {
    /// Address of the `offset`-th word of the record, wrapping at 2^256.
    #[must_use]
    pub fn word(&self, offset: u8) -> Hash {
        let base = U256::from_big_endian(self.0.as_bytes());
        let (addr, _) = base.overflowing_add(U256::from(offset));
        Hash::from(Word::from_u256(addr))
    }
}

/// Derives the address of the record stored under `key` in `root`.
///
/// Deterministic and one-way: `(root, key)` always maps to the same address.
#[must_use]
pub fn derive_slot(root: &NamespaceRoot, key: &Hash) -> SlotAddress {
    SlotAddress(keccak256_concat(&[key.as_bytes(), root.0.as_bytes()]))
}

// =============================================================================
// STORAGE SLOT
// =============================================================================

/// Key of one storage word inside an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageSlot {
    /// Plain state assigned in declaration order (fuse flags, counters).
    Sequential(u64),
    /// A word of a record inside a namespace.
    Namespaced {
        /// Namespace the record lives in.
        root: NamespaceRoot,
        /// Record key.
        key: Hash,
        /// Word index within the record.
        offset: u8,
    },
}

impl StorageSlot {
    const SEQUENTIAL_TAG: u8 = 0x00;
    const NAMESPACED_TAG: u8 = 0x01;

    /// Slot of the `offset`-th word of the record under `key`.
    #[must_use]
    pub const fn namespaced(root: NamespaceRoot, key: Hash, offset: u8) -> Self {
        Self::Namespaced { root, key, offset }
    }

    /// Flat 256-bit address of this word.
    #[must_use]
    pub fn address(&self) -> Hash {
        match self {
            Self::Sequential(index) => Hash::from(Word::from_u256(U256::from(*index))),
            Self::Namespaced { root, key, offset } => derive_slot(root, key).word(*offset),
        }
    }

    /// Byte key used by persistent backends.
    ///
    /// The leading tag byte keeps the two variants in disjoint key ranges.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Sequential(index) => {
                let mut out = Vec::with_capacity(9);
                out.push(Self::SEQUENTIAL_TAG);
                out.extend_from_slice(&index.to_be_bytes());
                out
            }
            Self::Namespaced { root, key, offset } => {
                let mut out = Vec::with_capacity(66);
                out.push(Self::NAMESPACED_TAG);
                out.extend_from_slice(root.0.as_bytes());
                out.extend_from_slice(key.as_bytes());
                out.push(*offset);
                out
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
