//! Trip planner use case.
//!
//! Runs the travel agent flows for the signed-in user and keeps their
//! itinerary history and chat transcripts in step.

use crate::session_context::SessionContext;
use itinera_core::ai::{ItineraryChatInput, ItineraryChatOutput, RefineItineraryInput, SuggestInterestsInput};
use itinera_core::chat::{ChatMessage, ChatRepository};
use itinera_core::itinerary::{ItineraryRecord, ItineraryRepository, NewItinerary};
use itinera_core::validation::TripPreferences;
use itinera_core::{ItineraError, Result};
use itinera_interaction::TravelAgent;
use itinera_interaction::travel_agent::{GENERATION_FALLBACK, REFINEMENT_FALLBACK};
use std::sync::Arc;

/// Model turn recorded when a chat request fails outright.
pub const CHAT_ERROR_APOLOGY: &str =
    "Sorry, something went wrong while answering. Please try again.";

/// Result of [`TripPlannerUseCase::plan_trip`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTrip {
    /// Itinerary text to display.
    pub content: String,
    /// The history entry, when saving was requested and succeeded.
    pub saved: Option<ItineraryRecord>,
}

pub struct TripPlannerUseCase {
    agent: TravelAgent,
    itineraries: Arc<dyn ItineraryRepository>,
    chats: Arc<dyn ChatRepository>,
    session: Arc<SessionContext>,
}

impl TripPlannerUseCase {
    pub fn new(
        agent: TravelAgent,
        itineraries: Arc<dyn ItineraryRepository>,
        chats: Arc<dyn ChatRepository>,
        session: Arc<SessionContext>,
    ) -> Self {
        Self {
            agent,
            itineraries,
            chats,
            session,
        }
    }

    /// Generates an itinerary and, when `save` is set, records it in the
    /// signed-in user's history.
    ///
    /// A fallback reply is never saved. When there is no session or no
    /// storage the itinerary is still returned, unsaved.
    pub async fn plan_trip(&self, preferences: &TripPreferences, save: bool) -> Result<PlannedTrip> {
        let output = self.agent.generate_itinerary(preferences).await?;
        let content = output.itinerary;

        if !save || content == GENERATION_FALLBACK {
            return Ok(PlannedTrip {
                content,
                saved: None,
            });
        }

        let itinerary = NewItinerary {
            destination: preferences.destination.trim().to_string(),
            content: content.clone(),
            currency: preferences.currency_code().map(|c| c.code().to_string()),
            budget_amount: Some(preferences.budget_amount),
            duration: u32::try_from(preferences.duration).ok(),
            interests: Some(preferences.interests.trim().to_string()),
        };
        let saved = self.save_quietly(itinerary)?;
        Ok(PlannedTrip { content, saved })
    }

    /// Refines itinerary text. Nothing is persisted; see
    /// [`TripPlannerUseCase::save_refinement`].
    pub async fn refine(&self, existing_itinerary: &str, feedback: &str) -> Result<String> {
        let input = RefineItineraryInput {
            existing_itinerary: existing_itinerary.to_string(),
            user_feedback: feedback.to_string(),
        };
        Ok(self.agent.refine_itinerary(&input).await?.refined_itinerary)
    }

    /// Saves refined text as a new history entry carrying the original
    /// trip details.
    ///
    /// Returns `None` without saving when `refined_content` is the
    /// refinement fallback reply.
    pub fn save_refinement(
        &self,
        original: &ItineraryRecord,
        refined_content: &str,
    ) -> Result<Option<ItineraryRecord>> {
        if refined_content == REFINEMENT_FALLBACK {
            tracing::warn!(itinerary_id = %original.id, "Not saving fallback refinement");
            return Ok(None);
        }
        let email = self.session.require_email()?;
        let itinerary = NewItinerary {
            destination: original.destination.clone(),
            content: refined_content.to_string(),
            currency: original.currency.clone(),
            budget_amount: original.budget_amount,
            duration: original.duration,
            interests: original.interests.clone(),
        };
        self.itineraries.save(&email, itinerary).map(Some)
    }

    /// Sends one chat message about a saved itinerary and records both turns.
    ///
    /// If the model call fails, the user's message and a canned apology are
    /// recorded and the error is returned.
    pub async fn chat(&self, itinerary_id: &str, message: &str) -> Result<ItineraryChatOutput> {
        let email = self.session.require_email()?;
        let record = self
            .itineraries
            .find(&email, itinerary_id)
            .ok_or_else(|| ItineraError::itinerary_not_found(itinerary_id))?;

        let input = ItineraryChatInput {
            itinerary_content: record.content,
            destination: record.destination,
            chat_history: self.chats.load(&email, itinerary_id),
            user_message: message.to_string(),
        };

        if message.trim().is_empty() {
            return self.agent.chat(&input).await;
        }

        match self.agent.chat(&input).await {
            Ok(output) => {
                self.chats.append(
                    &email,
                    itinerary_id,
                    &[ChatMessage::user(message.trim()), ChatMessage::model(&output.response)],
                )?;
                Ok(output)
            }
            Err(e) => {
                tracing::warn!(user_email = %email, itinerary_id, error = %e, "Chat request failed");
                let apology = [
                    ChatMessage::user(message.trim()),
                    ChatMessage::model(CHAT_ERROR_APOLOGY),
                ];
                if let Err(store_err) = self.chats.append(&email, itinerary_id, &apology) {
                    tracing::warn!(error = %store_err, "Could not record chat apology");
                }
                Err(e)
            }
        }
    }

    /// The stored transcript for one of the signed-in user's itineraries.
    pub fn chat_history(&self, itinerary_id: &str) -> Result<Vec<ChatMessage>> {
        let email = self.session.require_email()?;
        Ok(self.chats.load(&email, itinerary_id))
    }

    pub async fn suggest_interests(
        &self,
        query: &str,
        existing_interests: Option<&str>,
    ) -> Result<Vec<String>> {
        let input = SuggestInterestsInput {
            query: query.to_string(),
            existing_interests: existing_interests.map(str::to_string),
        };
        Ok(self.agent.suggest_interests(&input).await?.suggestions)
    }

    /// Newest first; empty when signed out.
    pub fn list_history(&self) -> Vec<ItineraryRecord> {
        self.session
            .current_email()
            .map(|email| self.itineraries.list(&email))
            .unwrap_or_default()
    }

    pub fn find(&self, itinerary_id: &str) -> Option<ItineraryRecord> {
        let email = self.session.current_email()?;
        self.itineraries.find(&email, itinerary_id)
    }

    /// Deletes one itinerary and its chat. Unknown ids are ignored.
    pub fn delete(&self, itinerary_id: &str) -> Result<()> {
        let email = self.session.require_email()?;
        self.itineraries.delete(&email, itinerary_id)
    }

    /// Deletes the signed-in user's whole history and every transcript.
    pub fn clear_history(&self) -> Result<()> {
        let email = self.session.require_email()?;
        self.itineraries.delete_all(&email)
    }

    fn save_quietly(&self, itinerary: NewItinerary) -> Result<Option<ItineraryRecord>> {
        let email = self.session.current_email().unwrap_or_default();
        match self.itineraries.save(&email, itinerary) {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.is_persistence_unavailable() => {
                tracing::warn!(error = %e, "Itinerary not saved");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
