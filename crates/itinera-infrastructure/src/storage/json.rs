//! Typed JSON values on top of a [`KeyValueStore`].
//!
//! A value that fails to parse is logged and treated as absent; it never
//! surfaces as an error.

use itinera_core::Result;
use itinera_core::storage::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    parse_logged(key, &raw)
}

pub fn write_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Reads the list stored at `key`, applies `f`, and writes it back, all in
/// one [`KeyValueStore::update`] call. An empty list removes the key.
///
/// Returns whatever `f` returns.
pub fn modify_json_list<T, R, F>(store: &dyn KeyValueStore, key: &str, f: F) -> Result<R>
where
    T: Serialize + DeserializeOwned,
    R: Send,
    F: FnOnce(&mut Vec<T>) -> R + Send,
{
    let mut outcome: Option<R> = None;
    let mut failure: Option<serde_json::Error> = None;
    let outcome_slot = &mut outcome;
    let failure_slot = &mut failure;
    let owned_key = key.to_string();

    store.update(
        key,
        Box::new(move |current: Option<String>| -> Option<String> {
            let mut items: Vec<T> = current
                .as_deref()
                .and_then(|raw| parse_logged(&owned_key, raw))
                .unwrap_or_default();
            *outcome_slot = Some(f(&mut items));

            if items.is_empty() {
                return None;
            }
            match serde_json::to_string(&items) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    *failure_slot = Some(e);
                    current
                }
            }
        }),
    )?;

    if let Some(e) = failure {
        return Err(e.into());
    }
    // A store implementation is free to skip the closure entirely.
    outcome.ok_or_else(|| {
        itinera_core::ItineraError::persistence_unavailable("store did not apply the update")
    })
}

fn parse_logged<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed stored value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_round_trip_and_malformed_value() {
        let store = MemoryStore::new();
        write_json(&store, "nums", &vec![1, 2, 3]).unwrap();
        assert_eq!(read_json::<Vec<i32>>(&store, "nums"), Some(vec![1, 2, 3]));

        store.set("nums", "[1, 2,").unwrap();
        assert_eq!(read_json::<Vec<i32>>(&store, "nums"), None);
    }

    #[test]
    fn test_modify_list_returns_closure_result() {
        let store = MemoryStore::new();
        let len = modify_json_list(&store, "xs", |xs: &mut Vec<String>| {
            xs.push("a".to_string());
            xs.len()
        })
        .unwrap();

        assert_eq!(len, 1);
        assert_eq!(read_json::<Vec<String>>(&store, "xs"), Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_modify_list_to_empty_removes_key() {
        let store = MemoryStore::new();
        write_json(&store, "xs", &vec!["a"]).unwrap();

        modify_json_list(&store, "xs", |xs: &mut Vec<String>| xs.clear()).unwrap();
        assert_eq!(store.get("xs"), None);
    }

    #[test]
    fn test_modify_list_recovers_from_malformed_value() {
        let store = MemoryStore::new();
        store.set("xs", "garbage").unwrap();

        modify_json_list(&store, "xs", |xs: &mut Vec<u8>| xs.push(7)).unwrap();
        assert_eq!(read_json::<Vec<u8>>(&store, "xs"), Some(vec![7]));
    }
}
