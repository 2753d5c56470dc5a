//! Separate-chaining hash table
//!
//! Provides:
//! - Polynomial rolling hash reduced modulo the current capacity
//! - One ordered bucket per slot, colliding keys appended in insertion order
//! - Doubling growth once entries / capacity exceeds the load factor
//! - Full rehash on growth, every index recomputed under the new capacity

use crate::config::TableConfig;
use crate::digest::ContentDigest;
use crate::error::{Result, TableError};
use crate::key::{polynomial_hash, TableKey};
use log::{debug, trace};
use std::borrow::Borrow;
use std::fmt;
use std::iter::Flatten;

/// Entry in a bucket
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

/// Entries that hashed to the same slot, in insertion order
pub type Bucket<K, V> = Vec<Entry<K, V>>;

/// Hash table with separate chaining and load-factor driven growth
///
/// Not synchronized: every mutation takes `&mut self`.
#[derive(Clone)]
pub struct HashTable<K, V> {
    /// One bucket per slot, `buckets.len() == capacity`
    pub(crate) buckets: Vec<Bucket<K, V>>,

    /// Number of distinct keys stored
    pub(crate) size: usize,

    /// Current bucket count (only ever doubles)
    pub(crate) capacity: usize,

    /// Growth threshold on `size / capacity`
    pub(crate) load_factor: f64,
}

impl<K, V> HashTable<K, V>
where
    K: TableKey,
{
    /// Create new hash table
    ///
    /// # Arguments
    /// * `capacity` - Initial bucket count (must be positive)
    /// * `load_factor` - Growth threshold (positive and finite)
    ///
    /// # Panics
    /// If either argument is out of range. Use [`HashTable::with_config`] to
    /// get an error instead.
    pub fn new(capacity: usize, load_factor: f64) -> Self {
        let config = TableConfig::new(capacity, load_factor);
        if let Err(err) = config.validate() {
            panic!("{}", err);
        }
        Self::from_valid_config(config)
    }

    /// Create a table from a configuration, validating it first
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TableConfig) -> Self {
        HashTable {
            buckets: Self::empty_buckets(config.initial_capacity),
            size: 0,
            capacity: config.initial_capacity,
            load_factor: config.load_factor,
        }
    }

    fn empty_buckets(capacity: usize) -> Vec<Bucket<K, V>> {
        (0..capacity).map(|_| Vec::new()).collect()
    }

    /// Verify that `index` addresses an existing bucket
    pub(crate) fn check_index(&self, index: usize) -> Result<usize> {
        if index < self.buckets.len() {
            Ok(index)
        } else {
            Err(TableError::IndexOutOfBounds {
                index,
                capacity: self.buckets.len(),
            })
        }
    }

    /// Bucket index of `key` under the current capacity
    ///
    /// # Panics
    /// If the computed index is out of bounds, which means the bucket array
    /// and the recorded capacity have diverged.
    pub fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: TableKey + ?Sized,
    {
        match self.check_index(polynomial_hash(key, self.capacity)) {
            Ok(index) => index,
            Err(err) => panic!("{}", err),
        }
    }

    fn find<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.bucket_of(key);
        self.buckets[index]
            .iter()
            .find(|entry| Borrow::<Q>::borrow(&entry.key) == key)
    }

    fn exceeds_load_factor(&self) -> bool {
        self.size as f64 / self.capacity as f64 > self.load_factor
    }

    /// Insert or overwrite a key-value pair
    ///
    /// Overwriting keeps the entry's position and never triggers growth.
    /// A new key is appended to its bucket, and the table grows if the load
    /// factor is now exceeded.
    pub fn set(&mut self, key: K, value: V) {
        let index = self.bucket_of(&key);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            entry.value = value;
            return;
        }

        bucket.push(Entry { key, value });
        self.size += 1;

        // One doubling is enough unless the load factor is tiny
        while self.exceeds_load_factor() {
            self.resize();
        }
    }

    /// Get value by key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        self.find(key).map(|entry| &entry.value)
    }

    /// Get mutable value by key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.bucket_of(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| Borrow::<Q>::borrow(&entry.key) == key)
            .map(|entry| &mut entry.value)
    }

    /// Check whether `key` is stored, whatever its value
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Remove `key`, returning whether it was present
    ///
    /// Remaining entries of the bucket keep their relative order. Capacity
    /// never shrinks.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        let index = self.bucket_of(key);
        let bucket = &mut self.buckets[index];

        match bucket.iter().position(|entry| Borrow::<Q>::borrow(&entry.key) == key) {
            Some(position) => {
                bucket.remove(position);
                self.size -= 1;
                true
            }
            None => false,
        }
    }

    /// Drop every entry, keeping the current capacity
    pub fn clear(&mut self) {
        trace!("clearing {} entries at capacity {}", self.size, self.capacity);
        self.buckets = Self::empty_buckets(self.capacity);
        self.size = 0;
    }

    /// Double the capacity and rehash every entry
    ///
    /// Each entry's bucket is recomputed from its key under the new
    /// capacity. Keys are already distinct, so entries are appended without
    /// a duplicate scan and `size` is unchanged.
    pub fn resize(&mut self) {
        let old_capacity = self.capacity;
        assert!(old_capacity <= usize::MAX / 2, "capacity overflow");
        let new_capacity = old_capacity * 2;

        debug!(
            "resizing hash table: {} entries, capacity {} -> {}",
            self.size, old_capacity, new_capacity
        );

        let old_buckets = std::mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        self.capacity = new_capacity;

        for entry in old_buckets.into_iter().flatten() {
            let index = self.bucket_of(&entry.key);
            self.buckets[index].push(entry);
        }

        debug_assert_eq!(
            self.buckets.iter().map(Vec::len).sum::<usize>(),
            self.size,
            "rehash changed the entry count"
        );
    }

    /// Order-independent fingerprint of the stored pairs
    pub fn digest(&self) -> ContentDigest
    where
        V: AsRef<[u8]>,
    {
        ContentDigest::from_entries(self.iter().map(|(key, value)| (key, value.as_ref())))
    }

    /// Check if another table stores exactly the same pairs
    pub fn is_identical(&self, other: &Self) -> bool
    where
        V: AsRef<[u8]>,
    {
        self.digest().is_identical(&other.digest())
    }
}

impl<K, V> HashTable<K, V> {
    /// Number of stored keys (O(1))
    #[doc(alias = "length")]
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current bucket count
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Growth threshold
    pub fn max_load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Current entries per bucket
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }

    /// Entry count of every bucket, in index order
    pub fn bucket_loads(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Iterate over all entries in bucket order, then insertion order
    ///
    /// The order depends on capacity and changes after growth.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.buckets.iter().flatten(),
        }
    }

    /// Snapshot of all keys
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Snapshot of all values
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// Snapshot of all pairs
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: TableKey,
{
    fn default() -> Self {
        Self::from_valid_config(TableConfig::default())
    }
}

impl<K, V> fmt::Debug for HashTable<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for HashTable<K, V>
where
    K: TableKey,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable<K, V>
where
    K: TableKey,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

/// Borrowing iterator over a table's entries
pub struct Iter<'a, K, V> {
    inner: Flatten<std::slice::Iter<'a, Bucket<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }
}

/// Owning iterator over a table's entries
pub struct IntoIter<K, V> {
    inner: Flatten<std::vec::IntoIter<Bucket<K, V>>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (entry.key, entry.value))
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for HashTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.buckets.into_iter().flatten(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every key sits in the bucket its hash selects under the current capacity
    fn assert_bucket_invariant<K: TableKey, V>(table: &HashTable<K, V>) {
        assert_eq!(table.buckets.len(), table.capacity());
        for (index, bucket) in table.buckets.iter().enumerate() {
            for entry in bucket {
                assert_eq!(polynomial_hash(&entry.key, table.capacity()), index);
            }
        }
        assert_eq!(table.bucket_loads().iter().sum::<usize>(), table.len());
    }

    #[test]
    fn test_new() {
        let table: HashTable<String, String> = HashTable::new(16, 0.75);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.max_load_factor(), 0.75);
        assert_eq!(table.bucket_loads(), vec![0; 16]);
    }

    #[test]
    fn test_default_matches_reference_parameters() {
        let table: HashTable<String, u32> = HashTable::default();
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.max_load_factor(), 0.75);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let result: Result<HashTable<String, u32>> = HashTable::with_config(TableConfig::new(0, 0.75));
        assert_eq!(result.err(), Some(TableError::InvalidCapacity(0)));

        let result: Result<HashTable<String, u32>> = HashTable::with_config(TableConfig::new(8, -1.0));
        assert_eq!(result.err(), Some(TableError::InvalidLoadFactor(-1.0)));
    }

    #[test]
    #[should_panic(expected = "initial capacity must be positive")]
    fn test_new_panics_on_zero_capacity() {
        let _table: HashTable<String, u32> = HashTable::new(0, 0.75);
    }

    #[test]
    fn test_set_and_get() {
        let mut table = HashTable::new(16, 0.75);
        table.set("apple".to_string(), "red".to_string());

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("apple"), Some(&"red".to_string()));
        assert_eq!(table.get("pear"), None);
        assert!(table.has("apple"));
        assert!(!table.has("pear"));
    }

    #[test]
    fn test_overwrite() {
        let mut table = HashTable::new(16, 0.75);
        table.set("key".to_string(), 1);
        table.set("key".to_string(), 2);

        assert_eq!(table.len(), 1);  // Size shouldn't increase
        assert_eq!(table.get("key"), Some(&2));
    }

    #[test]
    fn test_has_does_not_depend_on_value() {
        let mut table: HashTable<String, Option<u32>> = HashTable::new(16, 0.75);
        table.set("nothing".to_string(), None);

        assert!(table.has("nothing"));
        assert_eq!(table.get("nothing"), Some(&None));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn test_get_mut() {
        let mut table = HashTable::new(16, 0.75);
        table.set("counter".to_string(), 1);

        if let Some(value) = table.get_mut("counter") {
            *value += 41;
        }

        assert_eq!(table.get("counter"), Some(&42));
        assert!(table.get_mut("absent").is_none());
    }

    #[test]
    fn test_collisions_share_a_bucket() {
        // Capacity 1 forces every key into bucket 0
        let mut table = HashTable::new(1, 100.0);
        for key in ["a", "b", "c", "d"] {
            table.set(key, key.len());
        }

        assert_eq!(table.capacity(), 1);
        assert_eq!(table.bucket_loads(), vec![4]);
        assert_eq!(table.keys(), vec![&"a", &"b", &"c", &"d"]);
    }

    #[test]
    fn test_remove_preserves_bucket_order() {
        let mut table = HashTable::new(1, 100.0);
        for key in ["a", "b", "c", "d"] {
            table.set(key, ());
        }

        assert!(table.remove("b"));
        assert_eq!(table.keys(), vec![&"a", &"c", &"d"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_remove_exactly_once() {
        let mut table = HashTable::new(16, 0.75);
        table.set("dog".to_string(), "brown");

        assert!(table.remove("dog"));
        assert!(!table.remove("dog"));
        assert!(!table.remove("never"));
        assert!(!table.has("dog"));
        assert_eq!(table.get("dog"), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_remove_does_not_shrink() {
        let mut table = HashTable::new(2, 0.75);
        for i in 0..10 {
            table.set(format!("key{}", i), i);
        }
        let grown = table.capacity();

        for i in 0..10 {
            assert!(table.remove(format!("key{}", i).as_str()));
        }

        assert_eq!(table.capacity(), grown);
        assert!(table.is_empty());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut table = HashTable::new(4, 0.75);
        for i in 0..20 {
            table.set(format!("key{}", i), i);
        }
        let capacity = table.capacity();
        assert!(capacity > 4);

        table.clear();

        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), capacity);
        assert!(table.keys().is_empty());
        assert!(!table.has("key3"));
        assert_bucket_invariant(&table);
    }

    #[test]
    fn test_resize_triggers_on_crossing_insert() {
        let mut table = HashTable::new(4, 0.75);
        table.set("a", 1);
        table.set("b", 2);
        table.set("c", 3);
        // 3 / 4 == 0.75 is not above the threshold
        assert_eq!(table.capacity(), 4);

        // Overwrites never grow
        table.set("c", 30);
        assert_eq!(table.capacity(), 4);

        table.set("d", 4);
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.len(), 4);
        assert_bucket_invariant(&table);
    }

    #[test]
    fn test_resize_preserves_content() {
        let mut table = HashTable::new(16, 0.75);
        for i in 0..12 {
            table.set(format!("key{}", i), format!("value{}", i));
        }
        let before = table.digest();
        assert_eq!(table.capacity(), 16);

        table.resize();

        assert_eq!(table.capacity(), 32);
        assert_eq!(table.len(), 12);
        assert!(table.digest().is_identical(&before));
        for i in 0..12 {
            assert_eq!(table.get(format!("key{}", i).as_str()), Some(&format!("value{}", i)));
        }
        assert_bucket_invariant(&table);
    }

    #[test]
    fn test_tiny_load_factor_grows_until_under_threshold() {
        let mut table = HashTable::new(16, 0.01);
        table.set("only", 1);

        // 1 / 128 <= 0.01 < 1 / 64
        assert_eq!(table.capacity(), 128);
        assert_eq!(table.len(), 1);
        assert_bucket_invariant(&table);
    }

    #[test]
    fn test_large_load_factor_allows_long_chains() {
        let mut table = HashTable::new(2, 2.0);
        for key in ["a", "b", "c", "d"] {
            table.set(key, 0);
        }
        assert_eq!(table.capacity(), 2);

        table.set("e", 0);
        assert_eq!(table.capacity(), 4);
        assert_bucket_invariant(&table);
    }

    #[test]
    fn test_check_index() {
        let table: HashTable<String, u32> = HashTable::new(16, 0.75);
        assert_eq!(table.check_index(15), Ok(15));
        assert_eq!(
            table.check_index(16),
            Err(TableError::IndexOutOfBounds { index: 16, capacity: 16 })
        );
    }

    #[test]
    fn test_bucket_of_follows_capacity() {
        let mut table = HashTable::new(16, 0.75);
        table.set("carrot".to_string(), 0);
        assert_eq!(table.bucket_of("carrot"), polynomial_hash("carrot", 16));

        table.resize();
        assert_eq!(table.bucket_of("carrot"), polynomial_hash("carrot", 32));
    }

    #[test]
    fn test_snapshots_are_detached() {
        let mut table = HashTable::new(16, 0.75);
        table.set("a".to_string(), 1);
        table.set("b".to_string(), 2);

        let mut keys: Vec<String> = table.keys().into_iter().cloned().collect();
        keys.push("c".to_string());
        keys.clear();

        assert_eq!(table.len(), 2);
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.values().len(), 2);
    }

    #[test]
    fn test_snapshot_order_is_bucket_order() {
        let mut table = HashTable::new(16, 0.75);
        // "b" (98 mod 16 = 2) lands before "c" (99 mod 16 = 3) whatever the insert order
        table.set("c", 3);
        table.set("b", 2);

        assert_eq!(table.keys(), vec![&"b", &"c"]);
        assert_eq!(table.values(), vec![&2, &3]);
        assert_eq!(table.entries(), vec![(&"b", &2), (&"c", &3)]);
    }

    #[test]
    fn test_byte_keys() {
        let mut table: HashTable<Vec<u8>, u32> = HashTable::new(16, 0.75);
        table.set(b"raw".to_vec(), 7);

        assert_eq!(table.get(&b"raw"[..]), Some(&7));
        assert!(table.remove(&b"raw"[..]));
    }

    #[test]
    fn test_collect_and_into_iter() {
        let table: HashTable<String, u32> = (0..30).map(|i| (format!("k{}", i), i)).collect();
        assert_eq!(table.len(), 30);
        assert_bucket_invariant(&table);

        let mut pairs: Vec<(String, u32)> = table.into_iter().collect();
        pairs.sort_by_key(|(_, value)| *value);
        assert_eq!(pairs.len(), 30);
        assert_eq!(pairs[0], ("k0".to_string(), 0));
    }

    #[test]
    fn test_debug_renders_map() {
        let mut table = HashTable::new(16, 0.75);
        table.set("a", 1);
        assert_eq!(format!("{:?}", table), r#"{"a": 1}"#);
    }
}
