//! Persistence collaborator for the vault.
//!
//! The vault never touches the filesystem directly.  It is handed a
//! `KeyValueStore` at construction and stores its whole record as one
//! string value under a single key.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::Result;

/// A string key-value blob store.
///
/// `set` must replace the previous value atomically: a reader sees
/// either the complete old value or the complete new one.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error only for real storage failures (I/O, permissions).
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`.  Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Returns `true` if a value is stored under `key`.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        (**self).contains(key)
    }
}
