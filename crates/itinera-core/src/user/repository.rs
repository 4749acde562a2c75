//! User directory trait.

use super::model::User;
use crate::error::Result;

/// The email-keyed directory of registered users.
///
/// Every method returns the password-free [`User`] view.
pub trait UserRepository: Send + Sync {
    /// Adds a user.
    ///
    /// # Errors
    ///
    /// - `DuplicateUser` when `email` is already registered (exact match)
    fn register(&self, name: &str, email: &str, password: &str) -> Result<User>;

    /// Checks a password against the stored one.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` when no record has `email`
    /// - `InvalidCredentials` when the email matches but the password does not
    fn authenticate(&self, email: &str, password: &str) -> Result<User>;

    /// Looks a user up by email.
    fn find_by_email(&self, email: &str) -> Option<User>;

    /// Replaces the display name only.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` when no record has `email`
    fn update_profile(&self, email: &str, name: &str) -> Result<User>;

    /// Overwrites the password after checking the current one.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` when no record has `email`
    /// - `IncorrectPassword` when `current_password` does not match; the
    ///   stored password is left unchanged
    fn change_password(&self, email: &str, current_password: &str, new_password: &str) -> Result<()>;
}
