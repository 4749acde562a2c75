//! Store used when there is no persistent storage context.

use itinera_core::Result;
use itinera_core::storage::KeyValueStore;

/// Reads as empty and silently drops writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn is_available(&self) -> bool {
        false
    }

    fn get(&self, key: &str) -> Option<String> {
        tracing::debug!(key, "No storage context, read returns nothing");
        None
    }

    fn set(&self, key: &str, _value: &str) -> Result<()> {
        tracing::warn!(key, "No storage context, write dropped");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        tracing::debug!(key, "No storage context, remove ignored");
        Ok(())
    }

    fn list_keys(&self, _prefix: &str) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_is_a_no_op() {
        let store = UnavailableStore;
        assert!(!store.is_available());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k"), None);
        store.remove("k").unwrap();
        assert!(store.list_keys("").is_empty());
        store.update("k", Box::new(|_: Option<String>| Some("v".to_string()))).unwrap();
        assert_eq!(store.get("k"), None);
    }
}
