//! Itinerary chat module.
//!
//! - `message`: chat roles and messages
//! - `repository`: per-(user, itinerary) transcript trait

mod message;
mod repository;

pub use message::{ChatMessage, ChatRole};
pub use repository::ChatRepository;
