//! Set built on the chained hash table
//!
//! Every key is stored with a unit value, which the set never exposes.

use crate::config::TableConfig;
use crate::digest::ContentDigest;
use crate::error::Result;
use crate::hashtable::HashTable;
use crate::key::TableKey;
use std::borrow::Borrow;
use std::fmt;

/// Set of keys backed by one owned [`HashTable`]
#[derive(Clone)]
pub struct HashSet<K> {
    pub(crate) map: HashTable<K, ()>,
}

impl<K> HashSet<K>
where
    K: TableKey,
{
    /// Create new set, forwarding both parameters to the inner table
    ///
    /// # Panics
    /// Same as [`HashTable::new`].
    pub fn new(capacity: usize, load_factor: f64) -> Self {
        HashSet {
            map: HashTable::new(capacity, load_factor),
        }
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Ok(HashSet {
            map: HashTable::with_config(config)?,
        })
    }

    /// Insert `key`; adding a present key changes nothing
    pub fn add(&mut self, key: K) {
        self.map.set(key, ());
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        self.map.has(key)
    }

    /// Remove `key`, returning whether it was present
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        self.map.remove(key)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Order-independent fingerprint of the members
    pub fn digest(&self) -> ContentDigest {
        ContentDigest::from_entries(self.map.keys().into_iter().map(|key| (key, &[] as &[u8])))
    }
}

impl<K> HashSet<K> {
    #[doc(alias = "length")]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Snapshot of all members, in the inner table's key order
    pub fn keys(&self) -> Vec<&K> {
        self.map.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.iter().map(|(key, _)| key)
    }

    /// The table holding the members
    pub fn table(&self) -> &HashTable<K, ()> {
        &self.map
    }
}

impl<K> Default for HashSet<K>
where
    K: TableKey,
{
    fn default() -> Self {
        HashSet {
            map: HashTable::default(),
        }
    }
}

impl<K> fmt::Debug for HashSet<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Extend<K> for HashSet<K>
where
    K: TableKey,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K> FromIterator<K> for HashSet<K>
where
    K: TableKey,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}
