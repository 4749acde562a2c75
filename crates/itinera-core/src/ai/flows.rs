//! Structured inputs and outputs of the itinerary flows.
//!
//! Generation takes [`crate::validation::TripPreferences`] directly.
//! Outputs are what the model is asked to return as JSON.

use crate::chat::ChatMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateItineraryOutput {
    pub itinerary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineItineraryInput {
    pub existing_itinerary: String,
    pub user_feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineItineraryOutput {
    pub refined_itinerary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryChatInput {
    pub itinerary_content: String,
    pub destination: String,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
    pub user_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryChatOutput {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestInterestsInput {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_interests: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestInterestsOutput {
    pub suggestions: Vec<String>,
}
