//! Infrastructure layer for Itinera.
//!
//! Key-value store adapters, the storage key layout, and the
//! store-backed repositories for users, sessions, itineraries and chats.

pub mod config_service;
pub mod keys;
pub mod kv_chat_repository;
pub mod kv_itinerary_repository;
pub mod kv_session_repository;
pub mod kv_user_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::{ConfigService, EnvOverrides};
pub use crate::kv_chat_repository::KvChatRepository;
pub use crate::kv_itinerary_repository::KvItineraryRepository;
pub use crate::kv_session_repository::KvSessionRepository;
pub use crate::kv_user_repository::KvUserRepository;
pub use crate::paths::ItineraPaths;
pub use crate::storage::{FileStore, MemoryStore, UnavailableStore};
