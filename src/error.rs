//! Error types for Fortell.

use thiserror::Error;

/// Library-level error type for Fortell operations.
#[derive(Error, Debug)]
pub enum FortellError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM backend error: {0}")]
    Backend(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FortellError {
    /// Whether this error is expected to be retry-recoverable.
    ///
    /// Transient errors (backend failures, network faults) are retried by
    /// [`crate::retry::RetryPolicy`]; validation and configuration errors
    /// surface to the caller immediately.
    pub fn is_transient(&self) -> bool {
        matches!(self, FortellError::Backend(_) | FortellError::Http(_))
    }
}

/// Result type alias for Fortell operations.
pub type Result<T> = std::result::Result<T, FortellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FortellError::Backend("rate limited".to_string()).is_transient());
        assert!(!FortellError::InvalidInput("empty text".to_string()).is_transient());
        assert!(!FortellError::Config("bad temperature".to_string()).is_transient());
        assert!(!FortellError::Synthesis("voice not found".to_string()).is_transient());
        assert!(!FortellError::UnsupportedProvider("unknown".to_string()).is_transient());
    }
}
