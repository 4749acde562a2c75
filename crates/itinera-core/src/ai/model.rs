//! Text-generation trait.

use crate::chat::ChatMessage;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One request to the model service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    /// Fixed instruction for the flow, sent as the system turn.
    pub system_instruction: String,
    /// Earlier conversation turns, oldest first.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    /// The new user turn.
    pub prompt: String,
    /// JSON schema the reply must follow, when structured output is wanted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl ModelRequest {
    pub fn new(system_instruction: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            history: Vec::new(),
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// A language-model backend. Transport is up to the implementation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short human-readable name used in logs.
    fn name(&self) -> &str;

    /// Sends the request.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(text))`: The model's reply
    /// - `Ok(None)`: The service answered but produced no text
    /// - `Err(ItineraError::Ai)`: Transport or service failure
    async fn generate(&self, request: ModelRequest) -> Result<Option<String>>;
}
