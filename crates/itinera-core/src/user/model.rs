//! User domain models.
//!
//! The stored record keeps the password in clear text. This is a local demo
//! credential store and must not be reused where real authentication is
//! needed; a real deployment needs salted hashes and a server-side store.

use serde::{Deserialize, Serialize};

/// A user as stored in the directory, password included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Opaque id assigned at registration.
    pub id: String,
    pub name: String,
    /// Unique key of the directory, compared exactly.
    pub email: String,
    pub password: String,
}

impl UserRecord {
    /// The password-free view handed out to callers.
    pub fn to_public(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// A user as returned by every account operation. Carries no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_view_has_no_password() {
        let record = UserRecord {
            id: "u1".to_string(),
            name: "Mia".to_string(),
            email: "mia@example.com".to_string(),
            password: "hunter22".to_string(),
        };

        let json = serde_json::to_value(record.to_public()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "mia@example.com");
    }
}
