//! Domain layer for Itinera.
//!
//! Models, error taxonomy, validation schemas, storage and repository
//! traits, the itinerary segmenter, and the model-service boundary types.
//! Nothing here touches the file system or the network.

pub mod ai;
pub mod chat;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod segment;
pub mod session;
pub mod storage;
pub mod user;
pub mod validation;

// Re-export common error type
pub use error::{ItineraError, Result};
