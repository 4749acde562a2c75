//! The four itinerary flows: generate, refine, chat and suggest interests.
//!
//! Each flow validates its input, sends one request to the configured
//! [`TextGenerator`], and parses the JSON reply. A reply that is missing or
//! does not parse resolves to the flow's fallback value and is logged; only
//! validation failures and transport errors reach the caller.

use crate::prompts;
use itinera_core::ai::{
    GenerateItineraryOutput, ItineraryChatInput, ItineraryChatOutput, ModelRequest,
    RefineItineraryInput, RefineItineraryOutput, SuggestInterestsInput, SuggestInterestsOutput,
    TextGenerator,
};
use itinera_core::Result;
use itinera_core::validation::{RefinementForm, TripPreferences, Validate};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;

pub const GENERATION_FALLBACK: &str =
    "Sorry, we couldn't generate an itinerary right now. Please try again in a moment.";
pub const REFINEMENT_FALLBACK: &str =
    "Sorry, we couldn't refine your itinerary right now. Please try again in a moment.";
pub const CHAT_FALLBACK: &str =
    "Sorry, I couldn't come up with an answer to that. Could you rephrase your question?";
/// Reply to an empty chat message; no request is sent.
pub const CHAT_EMPTY_MESSAGE_REPLY: &str =
    "Please type a question about your itinerary and I'll do my best to help.";

pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;
pub const MAX_SUGGESTIONS: usize = 5;

pub struct TravelAgent {
    generator: Arc<dyn TextGenerator>,
}

impl TravelAgent {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generates a new itinerary from validated trip preferences.
    ///
    /// # Errors
    ///
    /// - `Validation` when any preference is out of range
    /// - `Ai` when the model service fails
    pub async fn generate_itinerary(
        &self,
        preferences: &TripPreferences,
    ) -> Result<GenerateItineraryOutput> {
        preferences.validate()?;

        let request = ModelRequest::new(
            prompts::GENERATE_SYSTEM,
            prompts::generate_prompt(preferences)?,
        )
        .with_response_schema(prompts::generate_schema());

        let reply = self.generator.generate(request).await?;
        let output = parse_reply::<GenerateItineraryOutput>("generate", reply)
            .filter(|output| !output.itinerary.trim().is_empty())
            .unwrap_or_else(|| GenerateItineraryOutput {
                itinerary: GENERATION_FALLBACK.to_string(),
            });
        Ok(output)
    }

    /// Rewrites an itinerary according to the traveler's feedback.
    ///
    /// # Errors
    ///
    /// - `Validation` when the feedback is shorter than 10 or longer than
    ///   1000 characters
    /// - `Ai` when the model service fails
    pub async fn refine_itinerary(
        &self,
        input: &RefineItineraryInput,
    ) -> Result<RefineItineraryOutput> {
        RefinementForm {
            feedback: input.user_feedback.clone(),
        }
        .validate()?;

        let request = ModelRequest::new(
            prompts::REFINE_SYSTEM,
            prompts::refine_prompt(&input.existing_itinerary, &input.user_feedback)?,
        )
        .with_response_schema(prompts::refine_schema());

        let reply = self.generator.generate(request).await?;
        let output = parse_reply::<RefineItineraryOutput>("refine", reply)
            .filter(|output| !output.refined_itinerary.trim().is_empty())
            .unwrap_or_else(|| RefineItineraryOutput {
                refined_itinerary: REFINEMENT_FALLBACK.to_string(),
            });
        Ok(output)
    }

    /// Answers one chat turn about an itinerary.
    ///
    /// An empty message gets [`CHAT_EMPTY_MESSAGE_REPLY`] without a request.
    pub async fn chat(&self, input: &ItineraryChatInput) -> Result<ItineraryChatOutput> {
        let message = input.user_message.trim();
        if message.is_empty() {
            return Ok(ItineraryChatOutput {
                response: CHAT_EMPTY_MESSAGE_REPLY.to_string(),
            });
        }

        let system =
            prompts::chat_system_instruction(&input.destination, &input.itinerary_content)?;
        let request = ModelRequest::new(system, message)
            .with_history(prompts::chat_history(&input.chat_history))
            .with_response_schema(prompts::chat_schema());

        let reply = self.generator.generate(request).await?;
        let output = parse_reply::<ItineraryChatOutput>("chat", reply)
            .filter(|output| !output.response.trim().is_empty())
            .unwrap_or_else(|| ItineraryChatOutput {
                response: CHAT_FALLBACK.to_string(),
            });
        Ok(output)
    }

    /// Suggests up to five interests related to a partial query.
    ///
    /// Queries shorter than two characters return no suggestions without a
    /// request.
    pub async fn suggest_interests(
        &self,
        input: &SuggestInterestsInput,
    ) -> Result<SuggestInterestsOutput> {
        let query = input.query.trim();
        if query.chars().count() < MIN_SUGGESTION_QUERY_LEN {
            return Ok(SuggestInterestsOutput::default());
        }

        let request = ModelRequest::new(
            prompts::SUGGEST_SYSTEM,
            prompts::suggest_prompt(query, input.existing_interests.as_deref())?,
        )
        .with_response_schema(prompts::suggest_schema());

        let reply = self.generator.generate(request).await?;
        let suggestions = parse_reply::<SuggestInterestsOutput>("suggest", reply)
            .map(|output| {
                normalize_suggestions(output.suggestions, input.existing_interests.as_deref())
            })
            .unwrap_or_default();
        Ok(SuggestInterestsOutput { suggestions })
    }
}

/// Parses a structured reply. `None` when the model sent nothing usable.
fn parse_reply<T: DeserializeOwned>(flow: &str, reply: Option<String>) -> Option<T> {
    let Some(raw) = reply else {
        tracing::warn!(flow, "Model returned no output, using fallback");
        return None;
    };

    match serde_json::from_str(strip_code_fence(&raw)) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(flow, error = %e, "Model output did not match schema, using fallback");
            None
        }
    }
}

/// Models sometimes wrap JSON in a Markdown fence even when asked not to.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn normalize_suggestions(suggestions: Vec<String>, existing_interests: Option<&str>) -> Vec<String> {
    let mut seen: HashSet<String> = existing_interests
        .unwrap_or_default()
        .split(',')
        .map(|interest| interest.trim().to_lowercase())
        .filter(|interest| !interest.is_empty())
        .collect();

    suggestions
        .into_iter()
        .map(|suggestion| suggestion.trim().to_string())
        .filter(|suggestion| !suggestion.is_empty())
        .filter(|suggestion| seen.insert(suggestion.to_lowercase()))
        .take(MAX_SUGGESTIONS)
        .collect()
}
