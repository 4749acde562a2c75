//! Chat message types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Who wrote a chat message.
///
/// Serialized as `"user"` / `"model"`, the same role names the model
/// service uses for conversation turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One message in an itinerary chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        let json = serde_json::to_string(&ChatMessage::model("Hi")).unwrap();
        assert_eq!(json, r#"{"role":"model","content":"Hi"}"#);
        assert_eq!(ChatRole::User.to_string(), "user");
    }
}
