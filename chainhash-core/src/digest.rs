//! Order-independent content fingerprint for tables
//!
//! Provides:
//! - BLAKE3 hash per (key, value) entry
//! - XOR fold across entries, so bucket layout and capacity don't matter
//! - O(1) equality check between two fingerprints

use crate::key::TableKey;
use blake3::Hasher;

/// 32-byte BLAKE3 fingerprint
pub type DigestBytes = [u8; 32];

/// Fingerprint of a table's entries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    /// XOR of all entry hashes
    root: DigestBytes,

    /// Number of entries folded in
    count: usize,
}

impl ContentDigest {
    /// Fingerprint of a table with no entries
    pub fn empty() -> Self {
        ContentDigest {
            root: [0u8; 32],
            count: 0,
        }
    }

    /// Fold entry hashes together (XOR is commutative, order is irrelevant)
    pub fn from_hashes<I>(hashes: I) -> Self
    where
        I: IntoIterator<Item = DigestBytes>,
    {
        let mut root = [0u8; 32];
        let mut count = 0;

        for hash in hashes {
            for (acc, byte) in root.iter_mut().zip(hash.iter()) {
                *acc ^= byte;
            }
            count += 1;
        }

        ContentDigest { root, count }
    }

    /// Hash a single entry
    ///
    /// The key is length-prefixed so that `("ab", "c")` and `("a", "bc")`
    /// produce different hashes.
    pub fn hash_entry<K: TableKey + ?Sized>(key: &K, value: &[u8]) -> DigestBytes {
        let mut hasher = Hasher::new();

        let units: Vec<u32> = key.code_units().collect();
        hasher.update(&(units.len() as u64).to_le_bytes());
        for unit in units {
            hasher.update(&unit.to_le_bytes());
        }
        hasher.update(value);

        *hasher.finalize().as_bytes()
    }

    /// Fingerprint a sequence of entries
    pub fn from_entries<'a, K, I>(entries: I) -> Self
    where
        K: TableKey + ?Sized + 'a,
        I: IntoIterator<Item = (&'a K, &'a [u8])>,
    {
        Self::from_hashes(
            entries
                .into_iter()
                .map(|(key, value)| Self::hash_entry(key, value)),
        )
    }

    pub fn root(&self) -> &DigestBytes {
        &self.root
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Check if two fingerprints describe the same content (O(1))
    pub fn is_identical(&self, other: &Self) -> bool {
        self.root == other.root && self.count == other.count
    }
}

impl Default for ContentDigest {
    fn default() -> Self {
        Self::empty()
    }
}
