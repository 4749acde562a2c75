//! User directory stored in the key-value store.
//!
//! The whole directory is one JSON list under [`USERS_KEY`]. Passwords are
//! stored and compared in clear text: this is a local demo credential store.

use crate::keys::USERS_KEY;
use crate::storage::{modify_json_list, read_json};
use itinera_core::user::{User, UserRecord, UserRepository};
use itinera_core::{ItineraError, Result};
use itinera_core::storage::KeyValueStore;
use std::sync::Arc;
use uuid::Uuid;

pub struct KvUserRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvUserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load_all(&self) -> Vec<UserRecord> {
        read_json(self.store.as_ref(), USERS_KEY).unwrap_or_default()
    }

    fn find_record(&self, email: &str) -> Option<UserRecord> {
        self.load_all().into_iter().find(|user| user.email == email)
    }
}

impl UserRepository for KvUserRepository {
    fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let user = modify_json_list(self.store.as_ref(), USERS_KEY, move |users: &mut Vec<UserRecord>| -> Result<User> {
            if users.iter().any(|existing| existing.email == record.email) {
                return Err(ItineraError::duplicate_user(&record.email));
            }
            let user = record.to_public();
            users.push(record);
            Ok(user)
        })??;

        tracing::info!(user_email = %user.email, user_id = %user.id, "Registered user");
        Ok(user)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let record = self
            .find_record(email)
            .ok_or_else(|| ItineraError::user_not_found(email))?;

        if record.password != password {
            tracing::debug!(user_email = %email, "Password mismatch");
            return Err(ItineraError::InvalidCredentials);
        }

        Ok(record.to_public())
    }

    fn find_by_email(&self, email: &str) -> Option<User> {
        self.find_record(email).map(|record| record.to_public())
    }

    fn update_profile(&self, email: &str, name: &str) -> Result<User> {
        let user = modify_json_list(self.store.as_ref(), USERS_KEY, |users: &mut Vec<UserRecord>| -> Result<User> {
            let record = users
                .iter_mut()
                .find(|user| user.email == email)
                .ok_or_else(|| ItineraError::user_not_found(email))?;
            record.name = name.to_string();
            Ok(record.to_public())
        })??;

        tracing::info!(user_email = %email, "Updated profile name");
        Ok(user)
    }

    fn change_password(&self, email: &str, current_password: &str, new_password: &str) -> Result<()> {
        modify_json_list(self.store.as_ref(), USERS_KEY, |users: &mut Vec<UserRecord>| -> Result<()> {
            let record = users
                .iter_mut()
                .find(|user| user.email == email)
                .ok_or_else(|| ItineraError::user_not_found(email))?;
            if record.password != current_password {
                return Err(ItineraError::IncorrectPassword);
            }
            record.password = new_password.to_string();
            Ok(())
        })??;

        tracing::info!(user_email = %email, "Changed password");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn repo() -> KvUserRepository {
        KvUserRepository::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_register_then_authenticate() {
        let repo = repo();
        let created = repo.register("Noor", "noor@example.com", "pa55word").unwrap();

        let user = repo.authenticate("noor@example.com", "pa55word").unwrap();
        assert_eq!(user, created);
        assert_eq!(user.name, "Noor");
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let repo = repo();
        repo.register("Noor", "noor@example.com", "pa55word").unwrap();

        let err = repo.register("Other", "noor@example.com", "another").unwrap_err();
        assert_eq!(err, ItineraError::duplicate_user("noor@example.com"));
    }

    #[test]
    fn test_email_match_is_case_sensitive() {
        let repo = repo();
        repo.register("Noor", "noor@example.com", "pa55word").unwrap();

        assert!(repo.register("Noor", "Noor@example.com", "pa55word").is_ok());
        assert!(repo.authenticate("NOOR@example.com", "pa55word").unwrap_err().is_user_not_found());
    }

    #[test]
    fn test_authenticate_errors() {
        let repo = repo();
        repo.register("Noor", "noor@example.com", "pa55word").unwrap();

        assert!(repo.authenticate("nobody@example.com", "x").unwrap_err().is_user_not_found());
        assert_eq!(
            repo.authenticate("noor@example.com", "wrong!").unwrap_err(),
            ItineraError::InvalidCredentials
        );
    }

    #[test]
    fn test_update_profile_keeps_identity() {
        let repo = repo();
        let created = repo.register("Noor", "noor@example.com", "pa55word").unwrap();

        let updated = repo.update_profile("noor@example.com", "Noor A.").unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Noor A.");
        assert!(repo.authenticate("noor@example.com", "pa55word").is_ok());

        assert!(repo.update_profile("ghost@example.com", "X").unwrap_err().is_user_not_found());
    }

    #[test]
    fn test_change_password() {
        let repo = repo();
        repo.register("Noor", "noor@example.com", "pa55word").unwrap();

        let err = repo
            .change_password("noor@example.com", "not-it", "newpass1")
            .unwrap_err();
        assert_eq!(err, ItineraError::IncorrectPassword);
        assert!(repo.authenticate("noor@example.com", "pa55word").is_ok());

        repo.change_password("noor@example.com", "pa55word", "newpass1").unwrap();
        assert!(repo.authenticate("noor@example.com", "newpass1").is_ok());
        assert_eq!(
            repo.authenticate("noor@example.com", "pa55word").unwrap_err(),
            ItineraError::InvalidCredentials
        );
    }

    #[test]
    fn test_corrupt_directory_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(USERS_KEY, "{oops").unwrap();
        let repo = KvUserRepository::new(store);

        assert!(repo.find_by_email("noor@example.com").is_none());
        assert!(repo.register("Noor", "noor@example.com", "pa55word").is_ok());
    }
}
