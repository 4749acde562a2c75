//! Input schemas checked before any request leaves the client.
//!
//! Each form type implements [`Validate`]. Failures are collected per field
//! so a front end can show every message next to the field it belongs to.
//! Lengths are counted in characters on the trimmed value.

use crate::itinerary::Currency;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_BUDGET_AMOUNT: f64 = 1_000_000.0;
pub const MAX_TRIP_DAYS: i64 = 90;
pub const MIN_PASSWORD_LEN: usize = 6;

// No whitespace and no '/' anywhere: emails are embedded in storage keys.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@/]+@[^\s@/]+\.[^\s@/]+$").expect("email pattern is valid")
});

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All field errors found in one form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Returns the messages recorded for one field.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn check_length(&mut self, field: &str, label: &str, value: &str, min: usize, max: Option<usize>) {
        let len = value.trim().chars().count();
        if len < min {
            self.push(field, format!("{label} must be at least {min} characters."));
        } else if let Some(max) = max {
            if len > max {
                self.push(field, format!("{label} must be at most {max} characters."));
            }
        }
    }

    fn check_email(&mut self, field: &str, value: &str) {
        if !is_valid_email(value) {
            self.push(field, "Please enter a valid email address.");
        }
    }

    fn check_password(&mut self, field: &str, value: &str) {
        if value.chars().count() < MIN_PASSWORD_LEN {
            self.push(
                field,
                format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
            );
        }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Checks a form against its schema.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Trip preferences submitted to generate an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPreferences {
    pub destination: String,
    pub interests: String,
    pub currency: String,
    pub budget_amount: f64,
    pub duration: i64,
}

impl TripPreferences {
    /// The currency as a known code. Only meaningful after validation.
    pub fn currency_code(&self) -> Option<Currency> {
        Currency::from_str(self.currency.trim()).ok()
    }
}

impl Validate for TripPreferences {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_length("destination", "Destination", &self.destination, 3, Some(100));
        errors.check_length("interests", "Interests", &self.interests, 5, Some(500));

        if self.currency_code().is_none() {
            let allowed: Vec<&'static str> = Currency::all().iter().map(|c| c.code()).collect();
            errors.push(
                "currency",
                format!("Currency must be one of: {}.", allowed.join(", ")),
            );
        }

        if !self.budget_amount.is_finite() || self.budget_amount <= 0.0 {
            errors.push("budgetAmount", "Budget must be a positive number.");
        } else if self.budget_amount > MAX_BUDGET_AMOUNT {
            errors.push("budgetAmount", "Budget must be at most 1,000,000.");
        }

        if !(1..=MAX_TRIP_DAYS).contains(&self.duration) {
            errors.push(
                "duration",
                format!("Duration must be between 1 and {MAX_TRIP_DAYS} days."),
            );
        }

        errors.into_result()
    }
}

/// Feedback used to refine an existing itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementForm {
    pub feedback: String,
}

impl Validate for RefinementForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_length("feedback", "Feedback", &self.feedback, 10, Some(1000));
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_email("email", &self.email);
        errors.check_password("password", &self.password);
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Validate for RegistrationForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_length("name", "Name", &self.name, 2, None);
        errors.check_email("email", &self.email);
        errors.check_password("password", &self.password);
        if self.confirm_password != self.password {
            errors.push("confirmPassword", "Passwords do not match.");
        }
        errors.into_result()
    }
}

/// Display-name edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub name: String,
}

impl Validate for ProfileForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_length("name", "Name", &self.name, 2, Some(100));
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl Validate for PasswordChangeForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.current_password.is_empty() {
            errors.push("currentPassword", "Current password is required.");
        }
        errors.check_password("newPassword", &self.new_password);
        if self.confirm_new_password != self.new_password {
            errors.push("confirmNewPassword", "New passwords do not match.");
        }
        errors.into_result()
    }
}
