//! Gemini Gateway
//!
//! `GenerativeGateway` implementation over the Google Generative Language
//! REST API (`models/{model}:generateContent`).

use crate::domain::gateway::{GatewayError, GenerativeGateway};
use crate::domain::message::ChatMessage;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Persona used when the system prompt file is missing
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Load the coach persona from the configured markdown file.
///
/// Falls back to a plain-assistant persona when the file is unreadable,
/// so a missing deploy artifact degrades the tone, not the endpoint.
pub fn load_system_prompt(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(prompt) => prompt,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "System prompt file unreadable, using default persona");
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
    }
}

/// Gemini HTTP client
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    system_prompt: String,
}

impl GeminiClient {
    /// Build a client. `api_key: None` yields a permanently-unavailable
    /// gateway (callers decide how to degrade).
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
            system_prompt: system_prompt.into(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body(&self, history: &[ChatMessage], message: &str) -> serde_json::Value {
        let mut contents: Vec<serde_json::Value> = history
            .iter()
            .map(|entry| {
                json!({
                    "role": entry.role.gemini_name(),
                    "parts": [{ "text": entry.content }],
                })
            })
            .collect();
        contents.push(json!({
            "role": "user",
            "parts": [{ "text": message }],
        }));

        json!({
            "systemInstruction": { "parts": [{ "text": self.system_prompt }] },
            "contents": contents,
            "generationConfig": {
                "temperature": 1.0,
                "topP": 0.95,
                "topK": 40,
                "maxOutputTokens": 8192,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerativeGateway for GeminiClient {
    async fn generate(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, GatewayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GatewayError::Unavailable);
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&self.request_body(history, message))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    // reqwest error text may embed the URL (and the key); log
                    // only the classification
                    GatewayError::Request(format!("request error: {}", e.without_url()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Request(format!(
                "upstream returned status {}",
                status.as_u16()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Request(format!("invalid response body: {}", e.without_url())))?;

        let text: String = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GatewayError::Request("empty completion".to_string()));
        }

        Ok(text)
    }
}
