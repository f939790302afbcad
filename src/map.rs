//! The interface shared by [`BSTMap`] and [`MyHashMap`].
//!
//! `remove` and `remove_entry` are optional: an implementation that does not
//! support them inherits defaults that return [`Error::Unsupported`].

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use crate::bst::BSTMap;
use crate::error::{Error, Result};
use crate::hashmap::MyHashMap;

pub trait Map<K, V> {
    /// Associates `value` with `key`, returning the replaced value.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    fn get(&self, key: &K) -> Option<&V>;

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn clear(&mut self);

    /// Every key, in an implementation-defined order.
    fn keys(&self) -> Box<dyn Iterator<Item = &K> + '_>;

    fn remove(&mut self, _key: &K) -> Result<Option<V>> {
        Err(Error::Unsupported("remove"))
    }

    fn remove_entry(&mut self, _key: &K, _value: &V) -> Result<Option<V>>
    where
        V: PartialEq,
    {
        Err(Error::Unsupported("remove_entry"))
    }
}

impl<K: Ord, V> Map<K, V> for BSTMap<K, V> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        BSTMap::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BSTMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        BSTMap::contains_key(self, key)
    }

    fn size(&self) -> usize {
        BSTMap::size(self)
    }

    fn clear(&mut self) {
        BSTMap::clear(self)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &K> + '_> {
        Box::new(BSTMap::keys(self))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(BSTMap::remove(self, key))
    }

    fn remove_entry(&mut self, key: &K, value: &V) -> Result<Option<V>>
    where
        V: PartialEq,
    {
        Ok(BSTMap::remove_entry(self, key, value))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Map<K, V> for MyHashMap<K, V, S> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        MyHashMap::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        MyHashMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        MyHashMap::contains_key(self, key)
    }

    fn size(&self) -> usize {
        MyHashMap::size(self)
    }

    fn clear(&mut self) {
        MyHashMap::clear(self)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &K> + '_> {
        Box::new(MyHashMap::keys(self))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(MyHashMap::remove(self, key))
    }

    fn remove_entry(&mut self, key: &K, value: &V) -> Result<Option<V>>
    where
        V: PartialEq,
    {
        Ok(MyHashMap::remove_entry(self, key, value))
    }
}

/// A map backed by either a search tree or a hash table.
///
/// Both variants honor the same contract; only iteration order differs.
pub enum AnyMap<K, V, S = RandomState> {
    TreeBacked(BSTMap<K, V>),
    HashBacked(MyHashMap<K, V, S>),
}

impl<K: Ord + Hash, V> AnyMap<K, V> {
    pub fn tree() -> Self {
        AnyMap::TreeBacked(BSTMap::new())
    }

    pub fn hash() -> Self {
        AnyMap::HashBacked(MyHashMap::new())
    }
}

macro_rules! delegate {
    ($self:expr, $m:ident => $e:expr) => {
        match $self {
            AnyMap::TreeBacked($m) => $e,
            AnyMap::HashBacked($m) => $e,
        }
    };
}

impl<K: Ord + Hash, V, S: BuildHasher> Map<K, V> for AnyMap<K, V, S> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        delegate!(self, m => Map::put(m, key, value))
    }

    fn get(&self, key: &K) -> Option<&V> {
        delegate!(self, m => Map::get(m, key))
    }

    fn contains_key(&self, key: &K) -> bool {
        delegate!(self, m => Map::contains_key(m, key))
    }

    fn size(&self) -> usize {
        delegate!(self, m => Map::size(m))
    }

    fn clear(&mut self) {
        delegate!(self, m => Map::clear(m))
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &K> + '_> {
        delegate!(self, m => Map::keys(m))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        delegate!(self, m => Map::remove(m, key))
    }

    fn remove_entry(&mut self, key: &K, value: &V) -> Result<Option<V>>
    where
        V: PartialEq,
    {
        delegate!(self, m => Map::remove_entry(m, key, value))
    }
}
