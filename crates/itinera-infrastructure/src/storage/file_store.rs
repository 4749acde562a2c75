//! File-backed key-value store.
//!
//! The whole store is one JSON object of string keys to string values,
//! the same shape as a browser's local storage for one origin.

use super::atomic_json::AtomicJsonFile;
use itinera_core::Result;
use itinera_core::storage::{KeyValueStore, UpdateFn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

type Document = BTreeMap<String, String>;

/// A [`KeyValueStore`] persisted to a single JSON file.
///
/// Every write is a locked read-modify-write of the whole document, so
/// writers touching different keys never drop each other's changes.
/// Writers to the same key are last-write-wins.
pub struct FileStore {
    file: AtomicJsonFile<Document>,
}

impl FileStore {
    /// Opens (lazily) the store at `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::debug!(path = %path.display(), "Opening file store");
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads the document; a missing or corrupt file reads as empty.
    fn read_document(&self) -> Document {
        match self.file.load() {
            Ok(document) => document.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    path = %self.file.path().display(),
                    error = %e,
                    "Store document is unreadable, treating as empty"
                );
                Document::new()
            }
        }
    }

    /// Runs `f` on the document under the file lock and writes the result
    /// back when `f` reports a change.
    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Document) -> bool,
    {
        let _lock = self.file.lock()?;
        let mut document = self.read_document();
        if f(&mut document) {
            self.file.save(&document)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn is_available(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read_document().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|document| {
            document.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|document| document.remove(key).is_some())
    }

    fn list_keys(&self, prefix: &str) -> Vec<String> {
        self.read_document()
            .into_keys()
            .filter(|key| key.starts_with(prefix))
            .collect()
    }

    fn update(&self, key: &str, f: UpdateFn<'_>) -> Result<()> {
        self.modify(|document| {
            let current = document.remove(key);
            let had_value = current.is_some();
            match f(current) {
                Some(value) => {
                    document.insert(key.to_string(), value);
                    true
                }
                None => had_value,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::open(dir.path().join("nested").join("storage.json"))
    }

    #[test]
    fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("a"), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("1"));

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).set("k", "v").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_list_keys_by_prefix_is_sorted() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        for key in ["chat/b", "chat/a", "users"] {
            store.set(key, "x").unwrap();
        }

        assert_eq!(store.list_keys("chat/"), vec!["chat/a", "chat/b"]);
        assert_eq!(store.list_keys("").len(), 3);
    }

    #[test]
    fn test_update_reads_current_value() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("n", "1").unwrap();

        store
            .update(
                "n",
                Box::new(|current: Option<String>| current.map(|v| format!("{v}+1"))),
            )
            .unwrap();
        assert_eq!(store.get("n").as_deref(), Some("1+1"));

        store.update("n", Box::new(|_: Option<String>| -> Option<String> { None })).unwrap();
        assert_eq!(store.get("n"), None);
    }

    #[test]
    fn test_corrupt_document_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(path);
        assert_eq!(store.get("anything"), None);
        assert!(store.list_keys("").is_empty());

        store.set("fresh", "start").unwrap();
        assert_eq!(store.get("fresh").as_deref(), Some("start"));
    }

    #[test]
    fn test_removing_missing_key_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.remove("ghost").unwrap();
        assert!(!store.path().exists());
    }
}
