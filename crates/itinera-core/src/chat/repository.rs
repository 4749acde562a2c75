//! Chat transcript repository trait.

use super::message::ChatMessage;
use crate::error::Result;

/// Ordered chat transcripts scoped to one `(user, itinerary)` pair.
pub trait ChatRepository: Send + Sync {
    /// Loads the transcript, or an empty list when nothing was recorded.
    fn load(&self, user_email: &str, itinerary_id: &str) -> Vec<ChatMessage>;

    /// Replaces the stored transcript with `messages`.
    ///
    /// Callers must pass the complete history; anything not in `messages`
    /// is lost.
    fn save(&self, user_email: &str, itinerary_id: &str, messages: &[ChatMessage]) -> Result<()>;

    /// Appends `messages` to the stored transcript in one locked
    /// read-modify-write, so messages persisted by another writer survive.
    fn append(&self, user_email: &str, itinerary_id: &str, messages: &[ChatMessage]) -> Result<()>;

    fn delete_for_itinerary(&self, user_email: &str, itinerary_id: &str) -> Result<()>;

    /// Deletes every transcript owned by the user.
    fn delete_all_for_user(&self, user_email: &str) -> Result<()>;
}
