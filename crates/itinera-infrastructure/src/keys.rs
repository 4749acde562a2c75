//! Storage key layout.
//!
//! ```text
//! itinera/users                          # every UserRecord
//! itinera/session                        # signed-in email, absent when signed out
//! itinera/itineraries/<email>            # that user's itineraries, newest first
//! itinera/chat/<email>/<itinerary id>    # one chat transcript
//! ```
//!
//! Validated emails contain no `/`, so one user's prefix never matches
//! another user's keys.

pub const USERS_KEY: &str = "itinera/users";
pub const SESSION_KEY: &str = "itinera/session";

pub fn itineraries_key(user_email: &str) -> String {
    format!("itinera/itineraries/{user_email}")
}

pub fn chat_key(user_email: &str, itinerary_id: &str) -> String {
    format!("{}{itinerary_id}", chat_prefix(user_email))
}

/// Prefix shared by all of one user's chat transcripts.
pub fn chat_prefix(user_email: &str) -> String {
    format!("itinera/chat/{user_email}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_keys_share_user_prefix() {
        let key = chat_key("ann@example.com", "17-abc");
        assert_eq!(key, "itinera/chat/ann@example.com/17-abc");
        assert!(key.starts_with(&chat_prefix("ann@example.com")));
        assert!(!key.starts_with(&chat_prefix("ann@example.co")));
    }
}
