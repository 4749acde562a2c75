//! Interaction layer for Itinera.
//!
//! Prompt templates, the Gemini REST client, and the [`TravelAgent`] that
//! runs the itinerary flows against any [`itinera_core::ai::TextGenerator`].

pub mod gemini_api_agent;
pub mod prompts;
pub mod travel_agent;

pub use gemini_api_agent::GeminiApiAgent;
pub use travel_agent::TravelAgent;
