//! The signed-in user, as an explicit object instead of ambient state.

use itinera_core::session::SessionRepository;
use itinera_core::{ItineraError, Result};
use std::sync::{Arc, PoisonError, RwLock};

/// Tracks who is signed in and keeps the persisted session in step.
///
/// Created once per process with [`SessionContext::restore`] and shared by
/// the use cases through `Arc`.
pub struct SessionContext {
    repository: Arc<dyn SessionRepository>,
    current: RwLock<Option<String>>,
}

impl SessionContext {
    /// Loads the persisted session, if any.
    pub fn restore(repository: Arc<dyn SessionRepository>) -> Self {
        let current = repository.active_email();
        if let Some(email) = &current {
            tracing::debug!(user_email = %email, "Restored session");
        }
        Self {
            repository,
            current: RwLock::new(current),
        }
    }

    /// Persists `email` as the signed-in user, replacing any previous one.
    pub fn begin(&self, email: &str) -> Result<()> {
        self.repository.set_active_email(email)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(email.to_string());
        tracing::info!(user_email = %email, "Session started");
        Ok(())
    }

    /// Signs out. Safe to call when nobody is signed in.
    pub fn end(&self) -> Result<()> {
        self.repository.clear()?;
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(email) = previous {
            tracing::info!(user_email = %email, "Session ended");
        }
        Ok(())
    }

    pub fn current_email(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The signed-in email, or `PersistenceUnavailable` when signed out.
    pub fn require_email(&self) -> Result<String> {
        self.current_email()
            .ok_or_else(|| ItineraError::persistence_unavailable("no signed-in user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::storage::KeyValueStore;
    use itinera_infrastructure::{KvSessionRepository, MemoryStore};

    fn repository(store: &Arc<dyn KeyValueStore>) -> Arc<dyn SessionRepository> {
        Arc::new(KvSessionRepository::new(store.clone()))
    }

    #[test]
    fn test_begin_persists_across_restore() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = SessionContext::restore(repository(&store));
        assert_eq!(session.current_email(), None);

        session.begin("ana@example.com").unwrap();

        let restored = SessionContext::restore(repository(&store));
        assert_eq!(restored.current_email().as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_end_is_idempotent() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = SessionContext::restore(repository(&store));
        session.begin("ana@example.com").unwrap();

        session.end().unwrap();
        session.end().unwrap();

        assert!(session.require_email().unwrap_err().is_persistence_unavailable());
        assert_eq!(SessionContext::restore(repository(&store)).current_email(), None);
    }
}
