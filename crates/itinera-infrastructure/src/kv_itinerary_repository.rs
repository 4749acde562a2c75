//! Itinerary history stored in the key-value store, one list per user.

use crate::keys::itineraries_key;
use crate::storage::{modify_json_list, read_json};
use chrono::Utc;
use itinera_core::chat::ChatRepository;
use itinera_core::itinerary::{ItineraryRecord, ItineraryRepository, NewItinerary};
use itinera_core::storage::KeyValueStore;
use itinera_core::{ItineraError, Result};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::Arc;

/// Stores itineraries newest first and cascades deletes to chat transcripts.
pub struct KvItineraryRepository {
    store: Arc<dyn KeyValueStore>,
    chats: Arc<dyn ChatRepository>,
}

impl KvItineraryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, chats: Arc<dyn ChatRepository>) -> Self {
        Self { store, chats }
    }
}

/// Millisecond timestamp plus a random suffix, e.g. `1718012345678-k3x9q2a`.
fn new_itinerary_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

impl ItineraryRepository for KvItineraryRepository {
    fn list(&self, user_email: &str) -> Vec<ItineraryRecord> {
        if user_email.is_empty() {
            return Vec::new();
        }
        read_json(self.store.as_ref(), &itineraries_key(user_email)).unwrap_or_default()
    }

    fn find(&self, user_email: &str, itinerary_id: &str) -> Option<ItineraryRecord> {
        self.list(user_email)
            .into_iter()
            .find(|record| record.id == itinerary_id)
    }

    fn save(&self, user_email: &str, itinerary: NewItinerary) -> Result<ItineraryRecord> {
        if user_email.trim().is_empty() {
            return Err(ItineraError::persistence_unavailable("no signed-in user"));
        }
        if !self.store.is_available() {
            tracing::warn!(user_email, "Cannot save itinerary without a storage context");
            return Err(ItineraError::persistence_unavailable("no storage context"));
        }

        let record = itinerary.into_record(new_itinerary_id(), Utc::now());
        let saved = record.clone();
        modify_json_list(
            self.store.as_ref(),
            &itineraries_key(user_email),
            move |history: &mut Vec<ItineraryRecord>| history.insert(0, record),
        )?;

        tracing::info!(
            user_email,
            itinerary_id = %saved.id,
            destination = %saved.destination,
            "Saved itinerary"
        );
        Ok(saved)
    }

    fn delete(&self, user_email: &str, itinerary_id: &str) -> Result<()> {
        let removed = modify_json_list(
            self.store.as_ref(),
            &itineraries_key(user_email),
            |history: &mut Vec<ItineraryRecord>| {
                let before = history.len();
                history.retain(|record| record.id != itinerary_id);
                before - history.len()
            },
        )?;
        self.chats.delete_for_itinerary(user_email, itinerary_id)?;

        tracing::info!(user_email, itinerary_id, removed, "Deleted itinerary");
        Ok(())
    }

    fn delete_all(&self, user_email: &str) -> Result<()> {
        self.store.remove(&itineraries_key(user_email))?;
        self.chats.delete_all_for_user(user_email)?;

        tracing::info!(user_email, "Deleted all itineraries");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = new_itinerary_id();
        let b = new_itinerary_id();
        assert_ne!(a, b);
        assert!(a.contains('-'));
    }
}
