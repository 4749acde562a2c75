//! Account use case: registration, sign-in and profile maintenance.

use crate::session_context::SessionContext;
use itinera_core::Result;
use itinera_core::user::{User, UserRepository};
use itinera_core::validation::{
    LoginForm, PasswordChangeForm, ProfileForm, RegistrationForm, Validate,
};
use std::sync::Arc;

/// Validates account forms, then delegates to the user directory and the
/// session context.
pub struct AccountUseCase {
    users: Arc<dyn UserRepository>,
    session: Arc<SessionContext>,
}

impl AccountUseCase {
    pub fn new(users: Arc<dyn UserRepository>, session: Arc<SessionContext>) -> Self {
        Self { users, session }
    }

    /// Creates an account. Does not sign the user in.
    ///
    /// # Errors
    ///
    /// - `Validation` when the form is rejected
    /// - `DuplicateUser` when the email is already registered
    pub fn register(&self, form: &RegistrationForm) -> Result<User> {
        form.validate()?;
        self.users
            .register(form.name.trim(), form.email.trim(), &form.password)
    }

    /// Checks credentials and starts a session.
    ///
    /// # Errors
    ///
    /// - `Validation` when the form is rejected
    /// - `UserNotFound` when the email is unknown (offer registration)
    /// - `InvalidCredentials` when the password does not match
    pub fn login(&self, form: &LoginForm) -> Result<User> {
        form.validate()?;
        let user = self.users.authenticate(form.email.trim(), &form.password)?;
        self.session.begin(&user.email)?;
        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        self.session.end()
    }

    /// The signed-in user. A session pointing at a missing record reads as
    /// signed out.
    pub fn current_user(&self) -> Option<User> {
        let email = self.session.current_email()?;
        let user = self.users.find_by_email(&email);
        if user.is_none() {
            tracing::warn!(user_email = %email, "Session refers to an unknown user");
        }
        user
    }

    /// Renames the signed-in user.
    pub fn update_profile(&self, form: &ProfileForm) -> Result<User> {
        form.validate()?;
        let email = self.session.require_email()?;
        self.users.update_profile(&email, form.name.trim())
    }

    /// Changes the signed-in user's password.
    ///
    /// # Errors
    ///
    /// - `IncorrectPassword` when the current password is wrong; the stored
    ///   password is left unchanged
    pub fn change_password(&self, form: &PasswordChangeForm) -> Result<()> {
        form.validate()?;
        let email = self.session.require_email()?;
        self.users
            .change_password(&email, &form.current_password, &form.new_password)
    }
}
