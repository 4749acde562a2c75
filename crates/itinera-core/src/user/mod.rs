//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: stored user records and the password-free public view
//! - `repository`: user directory trait
//!
//! # Usage
//!
//! ```ignore
//! use itinera_core::user::{User, UserRecord, UserRepository};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::{User, UserRecord};
pub use repository::UserRepository;
