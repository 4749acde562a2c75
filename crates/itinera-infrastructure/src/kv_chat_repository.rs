//! Chat transcripts stored in the key-value store, one key per itinerary.

use crate::keys::{chat_key, chat_prefix};
use crate::storage::{modify_json_list, read_json, write_json};
use itinera_core::Result;
use itinera_core::chat::{ChatMessage, ChatRepository};
use itinera_core::storage::KeyValueStore;
use std::sync::Arc;

pub struct KvChatRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvChatRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl ChatRepository for KvChatRepository {
    fn load(&self, user_email: &str, itinerary_id: &str) -> Vec<ChatMessage> {
        read_json(self.store.as_ref(), &chat_key(user_email, itinerary_id)).unwrap_or_default()
    }

    fn save(&self, user_email: &str, itinerary_id: &str, messages: &[ChatMessage]) -> Result<()> {
        let key = chat_key(user_email, itinerary_id);
        if messages.is_empty() {
            return self.store.remove(&key);
        }
        write_json(self.store.as_ref(), &key, messages)
    }

    fn append(&self, user_email: &str, itinerary_id: &str, messages: &[ChatMessage]) -> Result<()> {
        if messages.is_empty() {
            return Ok(());
        }
        let key = chat_key(user_email, itinerary_id);
        let total = modify_json_list(self.store.as_ref(), &key, |log: &mut Vec<ChatMessage>| {
            log.extend_from_slice(messages);
            log.len()
        })?;
        tracing::debug!(user_email, itinerary_id, total, "Appended chat messages");
        Ok(())
    }

    fn delete_for_itinerary(&self, user_email: &str, itinerary_id: &str) -> Result<()> {
        self.store.remove(&chat_key(user_email, itinerary_id))
    }

    fn delete_all_for_user(&self, user_email: &str) -> Result<()> {
        let keys = self.store.list_keys(&chat_prefix(user_email));
        for key in &keys {
            self.store.remove(key)?;
        }
        tracing::info!(user_email, removed = keys.len(), "Deleted chat transcripts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn repo() -> KvChatRepository {
        KvChatRepository::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_load_missing_is_empty() {
        assert!(repo().load("a@b.co", "1").is_empty());
    }

    #[test]
    fn test_save_replaces_whole_log() {
        let repo = repo();
        repo.save("a@b.co", "1", &[ChatMessage::user("one"), ChatMessage::model("two")])
            .unwrap();
        repo.save("a@b.co", "1", &[ChatMessage::user("three")]).unwrap();

        assert_eq!(repo.load("a@b.co", "1"), vec![ChatMessage::user("three")]);
    }

    #[test]
    fn test_append_keeps_existing_messages() {
        let repo = repo();
        repo.save("a@b.co", "1", &[ChatMessage::user("q1"), ChatMessage::model("a1")])
            .unwrap();
        repo.append("a@b.co", "1", &[ChatMessage::user("q2"), ChatMessage::model("a2")])
            .unwrap();

        let contents: Vec<String> = repo
            .load("a@b.co", "1")
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["q1", "a1", "q2", "a2"]);
    }

    #[test]
    fn test_transcripts_are_scoped_per_itinerary_and_user() {
        let repo = repo();
        repo.append("a@b.co", "1", &[ChatMessage::user("for 1")]).unwrap();
        repo.append("a@b.co", "2", &[ChatMessage::user("for 2")]).unwrap();
        repo.append("z@b.co", "1", &[ChatMessage::user("other user")]).unwrap();

        repo.delete_for_itinerary("a@b.co", "1").unwrap();
        assert!(repo.load("a@b.co", "1").is_empty());
        assert_eq!(repo.load("a@b.co", "2").len(), 1);

        repo.delete_all_for_user("a@b.co").unwrap();
        assert!(repo.load("a@b.co", "2").is_empty());
        assert_eq!(repo.load("z@b.co", "1").len(), 1);
    }
}
