//! Local key-value storage contract.
//!
//! Mirrors browser-local storage: string keys, string values, one document
//! per profile. Implementations without a storage context must behave as an
//! empty store and accept writes as no-ops instead of failing.

use crate::error::Result;

/// A read-modify-write step for [`KeyValueStore::update`].
///
/// Receives the current value and returns the new one; `None` removes the key.
pub type UpdateFn<'a> = Box<dyn FnOnce(Option<String>) -> Option<String> + Send + 'a>;

pub trait KeyValueStore: Send + Sync {
    /// Whether writes will actually be persisted.
    fn is_available(&self) -> bool;

    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys starting with `prefix`, sorted.
    fn list_keys(&self, prefix: &str) -> Vec<String>;

    /// Applies `f` to the current value of `key` and stores the result.
    ///
    /// Implementations that can lock should hold the lock across the read
    /// and the write. The default does a plain get followed by set/remove.
    fn update(&self, key: &str, f: UpdateFn<'_>) -> Result<()> {
        match f(self.get(key)) {
            Some(value) => self.set(key, &value),
            None => self.remove(key),
        }
    }
}
