//! Boundary to the external text-generation service.
//!
//! - `model`: the [`TextGenerator`] trait and the request it receives
//! - `flows`: structured inputs and outputs of the four itinerary flows

mod flows;
mod model;

pub use flows::{
    GenerateItineraryOutput, ItineraryChatInput, ItineraryChatOutput, RefineItineraryInput,
    RefineItineraryOutput, SuggestInterestsInput, SuggestInterestsOutput,
};
pub use model::{ModelRequest, TextGenerator};
