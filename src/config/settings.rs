//! Configuration settings for Fortell.

use crate::error::{FortellError, Result};
use crate::prompt::PromptStyle;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub tts: TtsSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub script: ScriptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for temporary files.
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/fortell".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// LLM provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// LLM provider (gemini).
    pub provider: String,
    /// API key. If absent, resolved from the environment at startup.
    pub api_key: Option<String>,
    /// Model name.
    pub model_name: String,
    /// Sampling temperature, in [0, 1].
    pub temperature: f32,
    /// Nucleus sampling parameter, in [0, 1].
    pub top_p: f32,
    /// Maximum output length in tokens.
    pub max_output_tokens: u32,
    /// Whether to request streamed responses (accepted but requests are
    /// issued non-streaming).
    pub streaming: bool,
    /// Prompt style (narrative, storytelling).
    pub prompt_style: PromptStyle,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            api_key: None,
            model_name: "gemini-1.5-flash".to_string(),
            temperature: 0.2,
            top_p: 0.9,
            max_output_tokens: 4096,
            streaming: false,
            prompt_style: PromptStyle::Narrative,
            timeout_seconds: 300,
        }
    }
}

impl LlmSettings {
    /// Validate numeric ranges, enumerating every offending field.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if !(0.0..=1.0).contains(&self.temperature) {
            problems.push(format!("temperature must be in [0, 1], got {}", self.temperature));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            problems.push(format!("top_p must be in [0, 1], got {}", self.top_p));
        }
        if self.max_output_tokens == 0 {
            problems.push("max_output_tokens must be greater than 0".to_string());
        }
        if self.model_name.trim().is_empty() {
            problems.push("model_name must not be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FortellError::Config(format!(
                "Invalid LLM configuration: {}",
                problems.join("; ")
            )))
        }
    }
}

/// TTS synthesis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsEngine {
    Standard,
    #[default]
    Neural,
}

impl std::fmt::Display for TtsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtsEngine::Standard => write!(f, "standard"),
            TtsEngine::Neural => write!(f, "neural"),
        }
    }
}

/// TTS provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsSettings {
    /// TTS provider (aws, google).
    pub provider: String,
    /// Voice identifier (provider-specific).
    pub voice_id: String,
    /// Language code (e.g. en-US).
    pub language: String,
    /// Cloud region. Mandatory for the aws provider.
    pub region: Option<String>,
    /// Synthesis engine (standard, neural).
    pub engine: TtsEngine,
    /// API key for REST-based providers. If absent, resolved from the
    /// environment at startup.
    pub api_key: Option<String>,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            provider: "aws".to_string(),
            voice_id: "Joanna".to_string(),
            language: "en-US".to_string(),
            region: None,
            engine: TtsEngine::Neural,
            api_key: None,
        }
    }
}

impl TtsSettings {
    /// Validate provider-conditional requirements, enumerating every
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.provider == "aws" && self.region.as_deref().map_or(true, |r| r.trim().is_empty()) {
            problems.push("region is required for the aws provider".to_string());
        }
        if self.voice_id.trim().is_empty() {
            problems.push("voice_id must not be empty".to_string());
        }
        if self.language.trim().is_empty() {
            problems.push("language must not be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FortellError::Config(format!(
                "Invalid TTS configuration: {}",
                problems.join("; ")
            )))
        }
    }
}

/// Text chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk size in characters.
    pub max_chars: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self { max_chars: 4000 }
    }
}

/// Chunk retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Maximum number of chunks selected for a query.
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 10 }
    }
}

/// Script generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// Minimum script length in characters.
    pub min_length: usize,
    /// Maximum retry attempts per backend call.
    pub retry_attempts: u32,
    /// Initial retry delay in seconds.
    pub retry_base_delay_seconds: f64,
    /// Backoff multiplier between attempts.
    pub retry_backoff_factor: f64,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            min_length: 10000,
            retry_attempts: 3,
            retry_base_delay_seconds: 1.0,
            retry_backoff_factor: 2.0,
        }
    }
}

impl ScriptSettings {
    /// Validate retry parameters, enumerating every offending field.
    ///
    /// The retry schedule feeds `Duration` arithmetic, so delays and factors
    /// must be finite and non-negative before a policy is built from them.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.retry_attempts == 0 {
            problems.push("retry_attempts must be at least 1".to_string());
        }
        if !self.retry_base_delay_seconds.is_finite() || self.retry_base_delay_seconds < 0.0 {
            problems.push(format!(
                "retry_base_delay_seconds must be a non-negative number, got {}",
                self.retry_base_delay_seconds
            ));
        }
        if !self.retry_backoff_factor.is_finite() || self.retry_backoff_factor < 1.0 {
            problems.push(format!(
                "retry_backoff_factor must be at least 1.0, got {}",
                self.retry_backoff_factor
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FortellError::Config(format!(
                "Invalid script configuration: {}",
                problems.join("; ")
            )))
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or the default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FortellError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fortell")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}
