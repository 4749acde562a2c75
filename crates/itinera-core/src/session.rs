//! Session persistence trait.
//!
//! A session is a single stored pointer to the signed-in user's email.
//! Absent means signed out. There is at most one session per store.

use crate::error::Result;

pub trait SessionRepository: Send + Sync {
    /// The persisted email, if someone is signed in.
    fn active_email(&self) -> Option<String>;

    fn set_active_email(&self, email: &str) -> Result<()>;

    /// Clears the session. Clearing an empty session is not an error.
    fn clear(&self) -> Result<()>;
}
