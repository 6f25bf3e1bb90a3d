//! Layer holds the pending changes of a single open transaction.
//!
//! A layer records, per key, either a pending write or a pending delete
//! (a tombstone). Nothing in a layer is visible outside the transaction
//! that owns it until the layer is folded into the committed map.
//!
//! # Example
//!
//! ```
//! use nestkv::layer::{Entry, Layer};
//!
//! let mut layer = Layer::new();
//! layer.set("a", 10);
//! layer.unset("b");
//!
//! assert_eq!(layer.get("a"), Some(Entry::Value(10)));
//! assert_eq!(layer.get("b"), Some(Entry::Tombstone));
//! assert_eq!(layer.get("c"), None);
//! ```

use std::collections::BTreeMap;

/// A pending change recorded for one key in a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Pending write of a value
    Value(i64),
    /// Pending delete
    Tombstone,
}

impl Entry {
    /// Returns the value carried by this entry, or `None` for a tombstone.
    pub fn value(self) -> Option<i64> {
        match self {
            Entry::Value(v) => Some(v),
            Entry::Tombstone => None,
        }
    }
}

/// The pending writes and deletes of one transaction.
///
/// Each key appears at most once; a later `set` or `unset` for the same key
/// replaces the earlier entry in this layer only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    entries: BTreeMap<String, Entry>,
}

impl Layer {
    /// Creates a new empty layer.
    ///
    /// # Example
    ///
    /// ```
    /// use nestkv::layer::Layer;
    ///
    /// let layer = Layer::new();
    /// assert!(layer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Records a pending write, overwriting any prior value or tombstone for `key`.
    pub fn set(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_owned(), Entry::Value(value));
    }

    /// Records a tombstone for `key`, overwriting any prior pending write.
    pub fn unset(&mut self, key: &str) {
        self.entries.insert(key.to_owned(), Entry::Tombstone);
    }

    /// Returns the entry for `key` if this layer mentions it.
    ///
    /// `None` means the layer has nothing to say about the key, which is
    /// different from `Some(Entry::Tombstone)`.
    pub fn get(&self, key: &str) -> Option<Entry> {
        self.entries.get(key).copied()
    }

    /// Returns the number of keys mentioned by this layer.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the layer records no changes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies this layer onto `dest`, consuming it.
    ///
    /// Tombstones remove the key from `dest`; values overwrite it. Returns
    /// the number of entries applied.
    pub fn fold_into(self, dest: &mut BTreeMap<String, i64>) -> usize {
        let applied = self.entries.len();
        for (key, entry) in self.entries {
            match entry {
                Entry::Value(v) => {
                    dest.insert(key, v);
                }
                Entry::Tombstone => {
                    dest.remove(&key);
                }
            }
        }
        applied
    }
}
