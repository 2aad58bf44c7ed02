//! LLM backends for script generation.

mod gemini;
mod script;

pub use gemini::GeminiClient;
pub use script::ScriptWriter;

use crate::config::LlmSettings;
use crate::error::{FortellError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Per-call overrides for generation parameters.
///
/// Unset fields fall back to the provider-level defaults configured at
/// construction time.
#[derive(Debug, Clone, Default)]
pub struct CallOverrides {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

/// Trait for generative text backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Invoke the backend once with a prompt and return the response text.
    async fn complete(&self, prompt: &str, overrides: &CallOverrides) -> Result<String>;
}

/// Construct the configured LLM backend.
///
/// Unknown providers are rejected before any network call; the settings
/// schema is validated before construction.
pub fn create_generator(settings: &LlmSettings) -> Result<Arc<dyn TextGenerator>> {
    match settings.provider.as_str() {
        "gemini" => {
            settings.validate()?;
            Ok(Arc::new(GeminiClient::new(settings)?))
        }
        other => Err(FortellError::UnsupportedProvider(format!(
            "Unsupported LLM provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_rejected() {
        let settings = LlmSettings {
            provider: "unknown".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_generator(&settings),
            Err(FortellError::UnsupportedProvider(_))
        ));
    }

    #[test]
    fn test_invalid_schema_rejected_before_construction() {
        let settings = LlmSettings {
            api_key: Some("key".to_string()),
            temperature: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            create_generator(&settings),
            Err(FortellError::Config(_))
        ));
    }

    #[test]
    fn test_gemini_constructed_with_valid_config() {
        let settings = LlmSettings {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(create_generator(&settings).is_ok());
    }
}
