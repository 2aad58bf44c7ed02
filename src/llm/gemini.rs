//! Google Gemini backend over the generateContent REST API.

use super::{CallOverrides, TextGenerator};
use crate::config::LlmSettings;
use crate::error::{FortellError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini text generation client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    defaults: GenerationConfig,
}

/// Resolved generation parameters for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Apply per-call overrides on top of these defaults.
    fn with_overrides(&self, overrides: &CallOverrides) -> Self {
        Self {
            temperature: overrides.temperature.unwrap_or(self.temperature),
            top_p: overrides.top_p.unwrap_or(self.top_p),
            max_output_tokens: overrides.max_output_tokens.unwrap_or(self.max_output_tokens),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Map a non-success status to an error of the right retryability.
///
/// Rate limits and server faults are transient; other client errors (bad
/// key, malformed request) will fail identically on every attempt and must
/// not be retried.
fn status_error(status: reqwest::StatusCode, body: &str) -> FortellError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        FortellError::Backend(format!("Gemini returned {}: {}", status, body))
    } else {
        FortellError::Config(format!("Gemini rejected the request ({}): {}", status, body))
    }
}

impl GeminiClient {
    /// Create a client from validated settings.
    ///
    /// Fails with a configuration error if no API key is present; credential
    /// lookup from the environment happens in the binary's bootstrap layer,
    /// not here.
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let api_key = settings.api_key.clone().ok_or_else(|| {
            FortellError::Config(
                "No API key provided for the gemini provider (set llm.api_key or GENAI_API_KEY)"
                    .to_string(),
            )
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            api_key,
            model: settings.model_name.clone(),
            defaults: GenerationConfig {
                temperature: settings.temperature,
                top_p: settings.top_p,
                max_output_tokens: settings.max_output_tokens,
            },
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip_all, fields(model = %self.model, prompt_chars = prompt.chars().count()))]
    async fn complete(&self, prompt: &str, overrides: &CallOverrides) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: self.defaults.with_overrides(overrides),
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );

        let response = self.http.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let parsed: GenerateResponse = response.json().await?;

        let text: String = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(FortellError::Backend(
                "Empty response from Gemini".to_string(),
            ));
        }

        debug!("Received {} characters from Gemini", text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence_over_defaults() {
        let defaults = GenerationConfig {
            temperature: 0.2,
            top_p: 0.9,
            max_output_tokens: 4096,
        };

        let resolved = defaults.with_overrides(&CallOverrides {
            temperature: Some(0.7),
            top_p: None,
            max_output_tokens: Some(8000),
        });

        assert_eq!(resolved.temperature, 0.7);
        assert_eq!(resolved.top_p, 0.9);
        assert_eq!(resolved.max_output_tokens, 8000);
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let defaults = GenerationConfig {
            temperature: 0.2,
            top_p: 0.9,
            max_output_tokens: 4096,
        };
        assert_eq!(defaults.with_overrides(&CallOverrides::default()), defaults);
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let settings = LlmSettings::default();
        assert!(matches!(
            GeminiClient::new(&settings),
            Err(FortellError::Config(_))
        ));
    }

    #[test]
    fn test_only_rate_limits_and_server_faults_are_transient() {
        use reqwest::StatusCode;

        assert!(status_error(StatusCode::TOO_MANY_REQUESTS, "slow down").is_transient());
        assert!(status_error(StatusCode::INTERNAL_SERVER_ERROR, "oops").is_transient());
        assert!(status_error(StatusCode::SERVICE_UNAVAILABLE, "busy").is_transient());

        assert!(!status_error(StatusCode::BAD_REQUEST, "malformed").is_transient());
        assert!(!status_error(StatusCode::UNAUTHORIZED, "bad key").is_transient());
        assert!(!status_error(StatusCode::FORBIDDEN, "denied").is_transient());
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "Hello world");
    }
}
