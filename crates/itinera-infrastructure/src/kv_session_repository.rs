//! Session pointer stored in the key-value store.

use crate::keys::SESSION_KEY;
use crate::storage::{read_json, write_json};
use itinera_core::Result;
use itinera_core::session::SessionRepository;
use itinera_core::storage::KeyValueStore;
use std::sync::Arc;

pub struct KvSessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvSessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl SessionRepository for KvSessionRepository {
    fn active_email(&self) -> Option<String> {
        read_json::<String>(self.store.as_ref(), SESSION_KEY).filter(|email| !email.is_empty())
    }

    fn set_active_email(&self, email: &str) -> Result<()> {
        write_json(self.store.as_ref(), SESSION_KEY, email)
    }

    fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_set_and_clear() {
        let repo = KvSessionRepository::new(Arc::new(MemoryStore::new()));
        assert_eq!(repo.active_email(), None);

        repo.set_active_email("li@example.com").unwrap();
        assert_eq!(repo.active_email().as_deref(), Some("li@example.com"));

        repo.clear().unwrap();
        repo.clear().unwrap();
        assert_eq!(repo.active_email(), None);
    }
}
