//! Snapshot of the committed map.
//!
//! A snapshot is a point-in-time copy of what has been committed. Pending
//! layers are never part of it, so a snapshot taken in the middle of an
//! open transaction still shows the state before that transaction.

use std::collections::BTreeMap;

/// A point-in-time copy of the committed map.
///
/// # Example
///
/// ```
/// use nestkv::KvStore;
///
/// let store = KvStore::new();
/// store.set("a", 1);
///
/// store.begin();
/// store.set("a", 2);
///
/// let snapshot = store.snapshot();
/// assert_eq!(snapshot.get("a"), Some(1));
/// assert_eq!(store.get("a"), Some(2));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<String, i64>,
}

impl Snapshot {
    pub(crate) fn new(entries: BTreeMap<String, i64>) -> Self {
        Self { entries }
    }

    /// Returns the committed value of `key` at snapshot time.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries.get(key).copied()
    }

    /// Returns the number of committed keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was committed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over committed entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Consumes the snapshot, returning the underlying map.
    pub fn into_map(self) -> BTreeMap<String, i64> {
        self.entries
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot").field("len", &self.entries.len()).finish()
    }
}
