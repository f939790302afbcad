//! Ordered map backed by an unbalanced binary search tree.
//!
//! Insertion and lookup descend by key comparison. Nothing rebalances the
//! tree, so inserting keys in sorted order degrades it into a list and every
//! operation becomes O(n). Removal uses Hibbard deletion.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

/// A map from totally ordered keys to values, stored as a binary search tree.
///
/// For every node, all keys in its left subtree are smaller than its key and
/// all keys in its right subtree are larger.
pub struct BSTMap<K, V> {
    root: Link<K, V>,
    size: usize,
}

impl<K: Ord, V> BSTMap<K, V> {
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Removes every mapping.
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    fn node(&self, key: &K) -> Option<&Node<K, V>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.node(key).is_some()
    }

    /// Returns the value mapped to `key`, or `None` if absent.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.node(key).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            };
        }
        None
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

    /// Associates `value` with `key`.
    ///
    /// An existing key keeps its node and has its value replaced; the previous
    /// value is returned and the size does not change.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let old = Self::put_at(&mut self.root, key, value);
        if old.is_none() {
            self.size += 1;
        }
        old
    }

    fn put_at(link: &mut Link<K, V>, key: K, value: V) -> Option<V> {
        match link {
            None => {
                *link = Some(Node::leaf(key, value));
                None
            }
            Some(node) => match key.cmp(&node.key) {
                Ordering::Less => Self::put_at(&mut node.left, key, value),
                Ordering::Greater => Self::put_at(&mut node.right, key, value),
                Ordering::Equal => Some(std::mem::replace(&mut node.value, value)),
            },
        }
    }

    /// Removes the mapping for `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = Self::remove_at(&mut self.root, key)?;
        self.size -= 1;
        Some(removed)
    }

    /// Removes the mapping for `key` only if it currently maps to `value`.
    pub fn remove_entry(&mut self, key: &K, value: &V) -> Option<V>
    where
        V: PartialEq,
    {
        match self.get(key) {
            Some(current) if current == value => self.remove(key),
            _ => None,
        }
    }

    fn remove_at(link: &mut Link<K, V>, key: &K) -> Option<V> {
        let node = link.as_mut()?;
        match key.cmp(&node.key) {
            Ordering::Less => Self::remove_at(&mut node.left, key),
            Ordering::Greater => Self::remove_at(&mut node.right, key),
            Ordering::Equal => {
                let mut node = link.take()?;
                match (node.left.take(), node.right.take()) {
                    (None, right) => *link = right,
                    (left, None) => *link = left,
                    (left, Some(right)) => {
                        // Two children: the in-order successor takes this
                        // node's place.
                        let mut right = Some(right);
                        let (succ_key, succ_value) = Self::take_min(&mut right)?;
                        let value = std::mem::replace(&mut node.value, succ_value);
                        node.key = succ_key;
                        node.left = left;
                        node.right = right;
                        *link = Some(node);
                        return Some(value);
                    }
                }
                Some(node.value)
            }
        }
    }

    /// Unlinks the leftmost node of a subtree, splicing in its right child.
    fn take_min(link: &mut Link<K, V>) -> Option<(K, V)> {
        if link.as_ref()?.left.is_some() {
            return Self::take_min(&mut link.as_mut()?.left);
        }
        let mut min = link.take()?;
        *link = min.right.take();
        Some((min.key, min.value))
    }

    /// Collects every key.
    pub fn key_set(&self) -> BTreeSet<K>
    where
        K: Clone,
    {
        self.keys().cloned().collect()
    }

    /// Iterates over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Renders the map in increasing key order as `k=v ` pairs.
    pub fn print_in_order(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let mut out = String::new();
        for (k, v) in self.iter() {
            let _ = write!(out, "{k}={v} ");
        }
        out
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        fn height<K, V>(link: &Link<K, V>) -> usize {
            match link {
                None => 0,
                Some(n) => 1 + height(&n.left).max(height(&n.right)),
            }
        }
        height(&self.root)
    }
}

impl<K: Ord, V> Default for BSTMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for BSTMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a BSTMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`BSTMap`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some((&node.key, &node.value))
    }
}
