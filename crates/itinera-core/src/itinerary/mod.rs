//! Itinerary domain module.
//!
//! - `model`: saved itinerary records and the supported currencies
//! - `repository`: per-user itinerary history trait

mod model;
mod repository;

pub use model::{Currency, ItineraryRecord, NewItinerary};
pub use repository::ItineraryRepository;
