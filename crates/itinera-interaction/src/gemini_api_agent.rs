//! Gemini REST client.
//!
//! Calls `generateContent` with the flow's system instruction, prior chat
//! turns and the new prompt, asking for JSON output when the request carries
//! a response schema.

use async_trait::async_trait;
use itinera_core::ai::{ModelRequest, TextGenerator};
use itinera_core::chat::{ChatMessage, ChatRole};
use itinera_core::config::GeminiSettings;
use itinera_core::{ItineraError, Result};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Text generator backed by the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    temperature: Option<f32>,
}

impl GeminiApiAgent {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Builds an agent from the `[gemini]` config section.
    ///
    /// Fails with a `Config` error when no API key is set.
    pub fn from_settings(settings: &GeminiSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ItineraError::config(
                    "Gemini API key is not configured (set GEMINI_API_KEY or [gemini] api_key)",
                )
            })?;

        let mut agent = Self::new(api_key, settings.model.clone());
        agent.temperature = settings.temperature;
        Ok(agent)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, request: ModelRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request.history.iter().map(Content::from_message).collect();
        contents.push(Content::text("user", request.prompt));

        let system_instruction = Some(request.system_instruction)
            .filter(|text| !text.trim().is_empty())
            .map(|text| SystemInstruction {
                parts: vec![Part { text }],
            });

        let generation_config = if request.response_schema.is_some() || self.temperature.is_some() {
            Some(GenerationConfig {
                response_mime_type: request
                    .response_schema
                    .as_ref()
                    .map(|_| "application/json".to_string()),
                response_schema: request.response_schema,
                temperature: self.temperature,
            })
        } else {
            None
        };

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<Option<String>> {
        let url = format!("{}/{}:generateContent", BASE_URL, self.model);

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| ItineraError::Ai {
                message: format!("Gemini API request failed: {err}"),
                status_code: None,
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers().get(reqwest::header::RETRY_AFTER));
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, status = status.as_u16(), "Gemini request rejected");
            return Err(map_http_error(status, body, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ItineraError::ai(format!("Failed to parse Gemini response: {err}")))?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl TextGenerator for GeminiApiAgent {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: ModelRequest) -> Result<Option<String>> {
        let body = self.build_request(request);
        tracing::debug!(
            model = %self.model,
            turns = body.contents.len(),
            structured = body.generation_config.as_ref().is_some_and(|c| c.response_schema.is_some()),
            "Sending Gemini request"
        );
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: String) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part { text }],
        }
    }

    fn from_message(message: &ChatMessage) -> Self {
        let role = match message.role {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        };
        Self::text(role, message.content.clone())
    }
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Concatenates the text parts of the first candidate. No text is `None`,
/// which the flows resolve to their fallback.
fn extract_text_response(response: GenerateContentResponse) -> Option<String> {
    let content = response
        .candidates?
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)?;

    let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
    if text.trim().is_empty() { None } else { Some(text) }
}

/// `"STATUS: message"` from a Gemini error body, or the raw body.
fn error_message(body: &str) -> String {
    let Ok(ErrorWrapper { error }) = serde_json::from_str::<ErrorWrapper>(body) else {
        return body.to_string();
    };
    let message = error.message.unwrap_or_else(|| body.to_string());
    match error.status.filter(|status| !status.is_empty()) {
        Some(status) => format!("{status}: {message}"),
        None => message,
    }
}

/// Rate limits and server-side failures are worth retrying by the user.
fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> ItineraError {
    let mut message = error_message(&body);
    if let Some(delay) = retry_after {
        message = format!("{message} (retry after {}s)", delay.as_secs());
    }

    ItineraError::Ai {
        message,
        status_code: Some(status.as_u16()),
        is_retryable: is_retryable_status(status),
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are not parsed.
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
