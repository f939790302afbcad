//! # ds-labs
//!
//! Small data-structure exercises, each self-contained:
//!
//! - [`BuggyAList`]: an array list whose shrink policy is deliberately too
//!   eager, kept as a target for differential testing.
//! - [`BSTMap`]: an unbalanced binary search tree map with Hibbard deletion.
//! - [`MyHashMap`]: a separate-chaining hash map that doubles its bucket count
//!   when the load factor exceeds a configured maximum.
//! - [`game2048`]: the 2048 board with tilt, merge and game-over rules.
//!
//! Both maps implement [`Map`], and [`AnyMap`] picks one at runtime.
//!
//! ## Example
//!
//! ```rust
//! use ds_labs::{BSTMap, MyHashMap};
//!
//! let mut tree: BSTMap<&str, u64> = BSTMap::new();
//! tree.put("hello", 1);
//! tree.put("world", 2);
//! assert_eq!(tree.get(&"hello"), Some(&1));
//!
//! let mut table: MyHashMap<&str, u64> = MyHashMap::new();
//! table.put("hello", 1);
//! assert_eq!(table.remove(&"hello"), Some(1));
//! assert_eq!(table.get(&"hello"), None);
//! ```

#![warn(clippy::all)]

pub mod alist;
pub mod bst;
pub mod error;
pub mod game2048;
pub mod hashmap;
pub mod map;

pub use alist::BuggyAList;
pub use bst::BSTMap;
pub use error::{Error, Result};
pub use hashmap::{HashMapConfig, MyHashMap};
pub use map::{AnyMap, Map};

#[cfg(test)]
mod proptests;
