//! # ScopeStack - Committed Map Plus Pending Layers
//!
//! The transactional engine. It owns the committed map and an ordered stack
//! of [`Layer`]s, one per open transaction, oldest at index 0.
//!
//! ## Visibility
//!
//! A read scans layers from the top of the stack down. The first layer that
//! mentions the key decides the answer: a value is returned, a tombstone
//! hides everything beneath it. Keys no layer mentions fall through to the
//! committed map.
//!
//! ## Thread Safety
//!
//! `ScopeStack` is plain data and takes `&mut self` for writes. Shared use
//! goes through [`crate::KvStore`], which wraps the whole stack in one lock.

use std::collections::BTreeMap;

use crate::layer::Layer;
use crate::{Error, Result};

/// The committed map and the stack of open transactions.
///
/// # Example
///
/// ```
/// use nestkv::scope::ScopeStack;
///
/// let mut scopes = ScopeStack::new();
/// scopes.set("a", 10);
/// scopes.begin();
/// scopes.set("a", 20);
/// assert_eq!(scopes.get("a"), Some(20));
///
/// scopes.rollback().unwrap();
/// assert_eq!(scopes.get("a"), Some(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    /// Ground truth when no transaction is open
    committed: BTreeMap<String, i64>,

    /// Pending layers, oldest first
    layers: Vec<Layer>,
}

impl ScopeStack {
    /// Creates an empty store with no open transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value` in the innermost scope.
    ///
    /// With a transaction open this writes into the top layer only;
    /// otherwise it writes straight into the committed map.
    pub fn set(&mut self, key: &str, value: i64) {
        match self.layers.last_mut() {
            Some(top) => top.set(key, value),
            None => {
                self.committed.insert(key.to_owned(), value);
            }
        }
    }

    /// Returns the value of `key` visible from the innermost scope.
    pub fn get(&self, key: &str) -> Option<i64> {
        for layer in self.layers.iter().rev() {
            if let Some(entry) = layer.get(key) {
                return entry.value();
            }
        }
        self.committed.get(key).copied()
    }

    /// Deletes `key` in the innermost scope.
    ///
    /// With a transaction open this records a tombstone in the top layer;
    /// otherwise the key is removed from the committed map (a no-op if it is
    /// absent).
    pub fn unset(&mut self, key: &str) {
        match self.layers.last_mut() {
            Some(top) => top.unset(key),
            None => {
                self.committed.remove(key);
            }
        }
    }

    /// Opens a new, empty transaction on top of the stack.
    pub fn begin(&mut self) {
        self.layers.push(Layer::new());
        log::debug!("begin: depth {}", self.layers.len());
    }

    /// Discards the innermost transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTransaction`] when no transaction is open; nothing
    /// is changed in that case.
    pub fn rollback(&mut self) -> Result<()> {
        let Some(layer) = self.layers.pop() else {
            log::warn!("rollback requested with no open transaction");
            return Err(Error::NoTransaction);
        };
        log::debug!(
            "rollback: discarded {} pending entries, depth {}",
            layer.len(),
            self.layers.len()
        );
        Ok(())
    }

    /// Folds every open transaction into the committed map, oldest first.
    ///
    /// All open transactions are resolved by one call; the depth is zero
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTransaction`] when no transaction is open; nothing
    /// is changed in that case.
    pub fn commit(&mut self) -> Result<()> {
        if self.layers.is_empty() {
            log::warn!("commit requested with no open transaction");
            return Err(Error::NoTransaction);
        }

        let depth = self.layers.len();
        let mut applied = 0;
        // Oldest first, so the newest layer's entry for a key wins.
        for layer in self.layers.drain(..) {
            applied += layer.fold_into(&mut self.committed);
        }
        log::debug!("commit: folded {} layers ({} entries)", depth, applied);
        Ok(())
    }

    /// Returns the number of open transactions.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Returns the committed map.
    pub fn committed(&self) -> &BTreeMap<String, i64> {
        &self.committed
    }
}
