//! In-process key-value store.

use itinera_core::Result;
use itinera_core::storage::{KeyValueStore, UpdateFn};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// A [`KeyValueStore`] that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn is_available(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn update(&self, key: &str, f: UpdateFn<'_>) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let current = entries.remove(key);
        if let Some(value) = f(current) {
            entries.insert(key.to_string(), value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let store = MemoryStore::new();
        store.set("itinera/x", "1").unwrap();
        store.set("other", "2").unwrap();

        assert_eq!(store.get("itinera/x").as_deref(), Some("1"));
        assert_eq!(store.list_keys("itinera/"), vec!["itinera/x"]);

        store.remove("itinera/x").unwrap();
        assert_eq!(store.get("itinera/x"), None);
    }

    #[test]
    fn test_update_holds_single_lock() {
        let store = MemoryStore::new();
        store
            .update("k", Box::new(|current: Option<String>| Some(current.unwrap_or_default() + "a")))
            .unwrap();
        store
            .update("k", Box::new(|current: Option<String>| Some(current.unwrap_or_default() + "b")))
            .unwrap();
        assert_eq!(store.get("k").as_deref(), Some("ab"));
    }
}
