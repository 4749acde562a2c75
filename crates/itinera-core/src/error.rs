//! Error types for the Itinera application.

use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Itinera application.
///
/// Account and validation variants are meant to be shown to the user as-is.
/// Infrastructure variants carry enough detail for logs.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItineraError {
    /// One or more form fields were rejected before any work was done.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Registration attempted with an email that is already in the directory.
    #[error("An account with email '{email}' already exists")]
    DuplicateUser { email: String },

    /// No user record matches the email.
    #[error("No account found for '{email}'")]
    UserNotFound { email: String },

    /// Email matched but the password did not.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The current password given for a password change was wrong.
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// No saved itinerary with this id in the signed-in user's history.
    #[error("Itinerary '{id}' not found")]
    ItineraryNotFound { id: String },

    /// No user is signed in, or there is no storage context to write to.
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The language-model service failed in a way the flows do not recover from.
    #[error("AI service error: {message}")]
    Ai {
        message: String,
        status_code: Option<u16>,
        is_retryable: bool,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ItineraError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn duplicate_user(email: impl Into<String>) -> Self {
        Self::DuplicateUser {
            email: email.into(),
        }
    }

    pub fn user_not_found(email: impl Into<String>) -> Self {
        Self::UserNotFound {
            email: email.into(),
        }
    }

    pub fn itinerary_not_found(id: impl Into<String>) -> Self {
        Self::ItineraryNotFound { id: id.into() }
    }

    pub fn persistence_unavailable(message: impl Into<String>) -> Self {
        Self::PersistenceUnavailable(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an AI error that is not worth retrying.
    pub fn ai(message: impl Into<String>) -> Self {
        Self::Ai {
            message: message.into(),
            status_code: None,
            is_retryable: false,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_user_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound { .. })
    }

    pub fn is_persistence_unavailable(&self) -> bool {
        matches!(self, Self::PersistenceUnavailable(_))
    }

    /// Returns true for the account errors that a front end shows as a
    /// dismissable notification.
    pub fn is_account_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateUser { .. }
                | Self::UserNotFound { .. }
                | Self::InvalidCredentials
                | Self::IncorrectPassword
        )
    }

    /// Field-level messages when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<ValidationErrors> for ItineraError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<std::io::Error> for ItineraError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ItineraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ItineraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ItineraError>`.
pub type Result<T> = std::result::Result<T, ItineraError>;
