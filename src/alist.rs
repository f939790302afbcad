//! Array-backed list with an aggressive shrink policy.
//!
//! `BuggyAList` grows by doubling like any amortized array list, but
//! `remove_last` halves the buffer as soon as utilization reaches one quarter.
//! Alternating appends and removals around that boundary make the buffer
//! oscillate between growing and shrinking. The policy is kept exactly as is:
//! the list exists to be compared against a trusted reference under the same
//! operation sequence.

use log::debug;

use crate::error::{Error, Result};

//         0 1  2 3 4 5 6 7
// items: [6 9 -1 2 _ _ _ _ ...]
// size: 4
//
// The next appended item lands at `size`; the last item lives at `size - 1`.

/// An array list that doubles its buffer when full and halves it once no
/// more than a quarter of it is in use, even when that leaves no headroom.
///
/// ```rust
/// use ds_labs::BuggyAList;
///
/// let mut l = BuggyAList::new();
/// for x in 1..=4 {
///     l.add_last(x);
/// }
/// assert_eq!(l.capacity(), 4);
/// l.remove_last().unwrap();
/// l.remove_last().unwrap();
/// l.remove_last().unwrap();
/// // One item left in four slots: the buffer halves.
/// assert_eq!((l.size(), l.capacity()), (1, 2));
/// ```
pub struct BuggyAList<T> {
    items: Box<[Option<T>]>,
    size: usize,
}

impl<T> BuggyAList<T> {
    /// Creates an empty list with capacity 1.
    pub fn new() -> Self {
        Self {
            items: empty_slots(1),
            size: 0,
        }
    }

    /// Moves the live items into a fresh buffer of `capacity` slots.
    fn resize(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.size);
        debug!(
            "alist resize: capacity {} -> {} (size {})",
            self.items.len(),
            capacity,
            self.size
        );
        let mut fresh = empty_slots(capacity);
        for (dst, src) in fresh.iter_mut().zip(self.items[..self.size].iter_mut()) {
            *dst = src.take();
        }
        self.items = fresh;
    }

    /// Appends `x` to the back of the list.
    pub fn add_last(&mut self, x: T) {
        if self.size == self.items.len() {
            let grown = if self.size == 0 { 1 } else { self.size * 2 };
            self.resize(grown);
        }
        self.items[self.size] = Some(x);
        self.size += 1;
    }

    /// Returns the item at the back of the list.
    pub fn get_last(&self) -> Result<&T> {
        if self.size == 0 {
            return Err(Error::Empty);
        }
        self.slot(self.size - 1)
    }

    /// Returns the `i`th item (0 is the front).
    pub fn get(&self, i: usize) -> Result<&T> {
        if i >= self.size {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.size,
            });
        }
        self.slot(i)
    }

    fn slot(&self, i: usize) -> Result<&T> {
        self.items[i].as_ref().ok_or(Error::IndexOutOfBounds {
            index: i,
            size: self.size,
        })
    }

    /// Removes and returns the item at the back of the list.
    ///
    /// After the removal the buffer is halved (never below one slot) whenever
    /// `size <= capacity / 4`.
    pub fn remove_last(&mut self) -> Result<T> {
        if self.size == 0 {
            return Err(Error::Empty);
        }

        let x = self.items[self.size - 1].take().ok_or(Error::Empty)?;
        self.size -= 1;

        let capacity = self.items.len();
        if self.size <= capacity / 4 {
            self.resize((capacity / 2).max(1));
        }

        Ok(x)
    }

    /// Number of items in the list.
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

    /// Length of the backing buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items[..self.size].iter().filter_map(Option::as_ref)
    }
}

fn empty_slots<T>(n: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(n).collect()
}

impl<T> Default for BuggyAList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for BuggyAList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
