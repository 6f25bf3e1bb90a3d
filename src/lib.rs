//! # nestkv - An In-Memory Key-Value Store with Nested Transactions
//!
//! nestkv keeps integer values under string keys and lets clients stage
//! writes inside transactions that nest arbitrarily deep. A transaction can
//! be rolled back (discarding only the innermost one) or committed (folding
//! every open transaction into the committed state at once).
//!
//! ## Architecture
//!
//! - **Layer**: the pending writes and tombstones of one transaction
//! - **ScopeStack**: the committed map plus the stack of layers; decides
//!   what every read sees
//! - **KvStore**: the thread-safe handle, one lock around the whole stack
//! - **Command / dispatch**: typed requests and their mapping onto the store
//! - **Shell**: the line-oriented session loop used by the `nestkv` binary
//!
//! ## Example Usage
//!
//! ```rust
//! use nestkv::KvStore;
//!
//! # fn main() -> Result<(), nestkv::Error> {
//! let store = KvStore::new();
//!
//! store.set("a", 10);
//! store.begin();
//! store.set("a", 20);
//! assert_eq!(store.get("a"), Some(20));
//!
//! // Discard the inner write
//! store.rollback()?;
//! assert_eq!(store.get("a"), Some(10));
//!
//! // Nested transactions are committed together
//! store.begin();
//! store.unset("a");
//! store.begin();
//! store.set("b", 1);
//! store.commit()?;
//! assert_eq!(store.get("a"), None);
//! assert_eq!(store.depth(), 0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod layer;
pub mod scope;
pub mod shell;
pub mod snapshot;

// Re-exports
pub use command::Command;
pub use config::ShellOptions;
pub use dispatch::Response;
pub use error::{Error, Result};
pub use shell::Shell;
pub use snapshot::Snapshot;

use parking_lot::Mutex;
use scope::ScopeStack;

/// The main store handle.
///
/// Wraps a [`ScopeStack`] in a single lock. Every operation, reads
/// included, holds the lock for its whole duration, so operations from
/// different threads are linearizable and nobody observes a half-applied
/// `commit` or `rollback`.
///
/// # Thread Safety
///
/// `KvStore` is `Send + Sync` and can be shared across threads using
/// `Arc<KvStore>`. There is a single transaction stack per store, shared by
/// every caller.
#[derive(Default)]
pub struct KvStore {
    inner: Mutex<ScopeStack>,
}

impl KvStore {
    /// Creates an empty store with no open transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value` in the innermost open transaction, or directly
    /// in the committed map when none is open.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use nestkv::KvStore;
    /// let store = KvStore::new();
    /// store.set("key", 42);
    /// assert_eq!(store.get("key"), Some(42));
    /// ```
    pub fn set(&self, key: &str, value: i64) {
        self.inner.lock().set(key, value);
    }

    /// Returns the value of `key` as seen from the innermost transaction.
    ///
    /// Returns `None` if the key was never set, or if the nearest scope that
    /// mentions it deleted it.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.inner.lock().get(key)
    }

    /// Deletes `key` in the innermost open transaction, or directly from
    /// the committed map when none is open.
    pub fn unset(&self, key: &str) {
        self.inner.lock().unset(key);
    }

    /// Opens a new nested transaction.
    pub fn begin(&self) {
        self.inner.lock().begin();
    }

    /// Discards the innermost transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTransaction`] if no transaction is open. The store
    /// is unchanged in that case.
    pub fn rollback(&self) -> Result<()> {
        self.inner.lock().rollback()
    }

    /// Commits every open transaction, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTransaction`] if no transaction is open. The store
    /// is unchanged in that case.
    pub fn commit(&self) -> Result<()> {
        self.inner.lock().commit()
    }

    /// Returns the number of open transactions.
    pub fn depth(&self) -> usize {
        self.inner.lock().depth()
    }

    /// Returns true if at least one transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.depth() > 0
    }

    /// Takes a copy of the committed map.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.inner.lock().committed().clone())
    }

    /// Executes a parsed command. See [`dispatch::execute`].
    ///
    /// # Errors
    ///
    /// Returns any store error other than [`Error::NoTransaction`], which is
    /// reported as [`Response::NoTransaction`].
    pub fn execute(&self, command: &Command) -> Result<Response> {
        dispatch::execute(self, command)
    }

    /// Runs `f` with exclusive access to the whole scope stack.
    ///
    /// Lets a caller group several operations into one atomic step, such as
    /// a read-modify-write inside a transaction.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use nestkv::KvStore;
    /// let store = KvStore::new();
    /// store.with_scopes(|scopes| {
    ///     let next = scopes.get("counter").unwrap_or(0) + 1;
    ///     scopes.set("counter", next);
    /// });
    /// assert_eq!(store.get("counter"), Some(1));
    /// ```
    pub fn with_scopes<T>(&self, f: impl FnOnce(&mut ScopeStack) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scopes = self.inner.lock();
        f.debug_struct("KvStore")
            .field("committed", &scopes.committed().len())
            .field("depth", &scopes.depth())
            .finish()
    }
}
