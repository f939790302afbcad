//! Separate-chaining hash map.
//!
//! Entries live in a fixed number of buckets; the bucket of a key is
//! `hash(key) mod bucket_count`. After an insertion pushes the load factor
//! (`size / bucket_count`) above the configured maximum, the bucket count
//! doubles and every entry is rehashed once. Removals never shrink the table.

use std::collections::hash_map::RandomState;
use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use log::debug;
use smallvec::SmallVec;

use crate::error::{Error, Result};

const DEFAULT_INITIAL_SIZE: usize = 16;
const DEFAULT_MAX_LOAD: f64 = 0.75;

/// Sizing parameters for [`MyHashMap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashMapConfig {
    /// Number of buckets allocated up front and restored by `clear`.
    pub initial_size: usize,
    /// Largest allowed `size / bucket_count` after an insertion.
    pub max_load: f64,
}

impl Default for HashMapConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_SIZE,
            max_load: DEFAULT_MAX_LOAD,
        }
    }
}

impl HashMapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.initial_size == 0 {
            return Err(Error::InvalidArgument(
                "initial size must be at least one bucket".into(),
            ));
        }
        if !self.max_load.is_finite() || self.max_load <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "max load must be a positive number, got {}",
                self.max_load
            )));
        }
        Ok(())
    }
}

struct Entry<K, V> {
    key: K,
    value: V,
}

type Bucket<K, V> = SmallVec<[Entry<K, V>; 2]>;

fn create_table<K, V>(size: usize) -> Vec<Bucket<K, V>> {
    let mut table = Vec::with_capacity(size);
    table.resize_with(size, SmallVec::new);
    table
}

/// A hash table backed map with amortized constant time `get`, `put` and
/// `remove`.
pub struct MyHashMap<K, V, S = RandomState> {
    buckets: Vec<Bucket<K, V>>,
    size: usize,
    config: HashMapConfig,
    hash_builder: S,
}

impl<K: Hash + Eq, V> MyHashMap<K, V, RandomState> {
    /// 16 buckets, maximum load factor 0.75.
    pub fn new() -> Self {
        Self::with_parts(HashMapConfig::default(), RandomState::new())
    }

    /// Starts with `initial_size` buckets and the default load factor.
    pub fn with_initial_size(initial_size: usize) -> Result<Self> {
        Self::with_config(HashMapConfig {
            initial_size,
            ..HashMapConfig::default()
        })
    }

    pub fn with_config(config: HashMapConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, RandomState::new())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> MyHashMap<K, V, S> {
    pub fn with_config_and_hasher(config: HashMapConfig, hash_builder: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_parts(config, hash_builder))
    }

    fn with_parts(config: HashMapConfig, hash_builder: S) -> Self {
        Self {
            buckets: create_table(config.initial_size),
            size: 0,
            config,
            hash_builder,
        }
    }

    #[inline]
    fn bucket_index(&self, key: &K) -> usize {
        index_for(&self.hash_builder, key, self.buckets.len())
    }

    fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|e| e.key == *key)
    }

    /// Doubles the bucket count until the load factor is back under the
    /// maximum, then rehashes every entry once into the final table.
    fn grow_if_overloaded(&mut self) {
        if self.load_factor() <= self.config.max_load {
            return;
        }

        let mut new_size = self.buckets.len() * 2;
        while self.size as f64 / new_size as f64 > self.config.max_load {
            new_size *= 2;
        }
        debug!(
            "hashmap resize: {} -> {} buckets ({} entries)",
            self.buckets.len(),
            new_size,
            self.size
        );
        let mut fresh = create_table(new_size);
        for entry in std::mem::take(&mut self.buckets).into_iter().flatten() {
            let idx = index_for(&self.hash_builder, &entry.key, new_size);
            fresh[idx].push(entry);
        }
        self.buckets = fresh;
    }

    /// Removes every mapping and restores the initial bucket count.
    pub fn clear(&mut self) {
        self.buckets = create_table(self.config.initial_size);
        self.size = 0;
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the value mapped to `key`, or `None` if absent.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter_mut()
            .find(|e| e.key == *key)
            .map(|e| &mut e.value)
    }

    /// Number of key-value mappings.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    #[inline]
    pub fn max_load(&self) -> f64 {
        self.config.max_load
    }

    /// Associates `value` with `key`, returning the value it replaced.
    ///
    /// Replacing a value never resizes. A new key is appended to its bucket and
    /// may trigger a resize.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.bucket_index(&key);
        let bucket = &mut self.buckets[idx];
        if let Some(existing) = bucket.iter_mut().find(|e| e.key == key) {
            return Some(std::mem::replace(&mut existing.value, value));
        }

        bucket.push(Entry { key, value });
        self.size += 1;
        self.grow_if_overloaded();
        None
    }

    /// Removes the mapping for `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_where(key, |_| true)
    }

    /// Removes the mapping for `key` only if it currently maps to `value`.
    pub fn remove_entry(&mut self, key: &K, value: &V) -> Option<V>
    where
        V: PartialEq,
    {
        self.remove_where(key, |v| v == value)
    }

    fn remove_where(&mut self, key: &K, accept: impl FnOnce(&V) -> bool) -> Option<V> {
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];
        let pos = bucket.iter().position(|e| e.key == *key)?;
        if !accept(&bucket[pos].value) {
            return None;
        }
        let entry = bucket.remove(pos);
        self.size -= 1;
        Some(entry.value)
    }

    /// Collects every key into a set.
    pub fn key_set(&self) -> HashSet<K>
    where
        K: Clone,
    {
        self.keys().cloned().collect()
    }

    /// Iterates over `(key, value)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|b| b.iter().map(|e| (&e.key, &e.value)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }
}

/// Bucket for `key` in a table of `buckets` buckets.
///
/// The hash is unsigned, so the remainder is already in `[0, buckets)`.
fn index_for<K: Hash, S: BuildHasher>(hash_builder: &S, key: &K, buckets: usize) -> usize {
    (hash_builder.hash_one(key) % buckets as u64) as usize
}

impl<K: Hash + Eq, V> Default for MyHashMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + fmt::Debug, V: fmt::Debug, S: BuildHasher> fmt::Debug for MyHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
