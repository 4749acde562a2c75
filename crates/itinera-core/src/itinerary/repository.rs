//! Itinerary repository trait.
//!
//! Defines the interface for a user's itinerary history.

use super::model::{ItineraryRecord, NewItinerary};
use crate::error::Result;

/// Per-user, newest-first itinerary history.
///
/// Storage is synchronous; implementations are shared behind `Arc`.
///
/// # Implementation Notes
///
/// - Records are partitioned by the owner's email; no cross-user reads.
/// - Deleting an itinerary also deletes its chat transcript.
/// - Unreadable storage reads as an empty history, never as an error.
pub trait ItineraryRepository: Send + Sync {
    /// Lists the user's itineraries, newest first.
    ///
    /// Returns an empty list when the user has none or the stored data
    /// cannot be read.
    fn list(&self, user_email: &str) -> Vec<ItineraryRecord>;

    /// Finds one itinerary by id.
    fn find(&self, user_email: &str, itinerary_id: &str) -> Option<ItineraryRecord>;

    /// Assigns an id and the current time, then prepends the record.
    ///
    /// # Returns
    ///
    /// - `Ok(ItineraryRecord)`: The fully populated record
    /// - `Err(ItineraError::PersistenceUnavailable)`: No user email or no storage context
    fn save(&self, user_email: &str, itinerary: NewItinerary) -> Result<ItineraryRecord>;

    /// Removes one itinerary and its chat transcript.
    ///
    /// Removing an id that is not present is a no-op, so calling this twice
    /// is the same as calling it once.
    fn delete(&self, user_email: &str, itinerary_id: &str) -> Result<()>;

    /// Removes the user's whole history and every associated transcript.
    fn delete_all(&self, user_email: &str) -> Result<()>;
}
