//! Script generation with length convergence.
//!
//! The writer normalizes source text for audio-only delivery, generates a
//! first-pass script, and performs at most one expansion pass when the
//! result is shorter than the requested minimum. A still-short script after
//! expansion is returned as-is rather than looping.

use super::{CallOverrides, TextGenerator};
use crate::error::{FortellError, Result};
use crate::prompt::{PromptBuilder, PromptParams};
use crate::retry::RetryPolicy;
use regex::Regex;
use std::sync::Arc;
use tracing::{info, instrument};

/// Patterns matching cross-references to visual elements. Source PDFs embed
/// these, but they are meaningless in audio-only output.
const VISUAL_REFERENCE_PATTERNS: &[&str] = &[
    r"(?i)(Figure|Fig\.|Table|Image)\s+\d+[a-z]?",
    r"(?i)(shown|illustrated|depicted|as seen) (in|on|above|below)",
    r"(?i)(refer to|see|view) (figure|table|image)",
    r"(?i)\(fig\.\s*\d+\)",
    r"(?i)as (shown|depicted) (here|below|above)",
];

/// Podcast script writer driving the generate-then-expand loop.
pub struct ScriptWriter {
    generator: Arc<dyn TextGenerator>,
    prompt_builder: Box<dyn PromptBuilder>,
    retry: RetryPolicy,
    reference_patterns: Vec<Regex>,
    whitespace: Regex,
}

impl ScriptWriter {
    /// Create a script writer over a backend and prompt builder.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        prompt_builder: Box<dyn PromptBuilder>,
        retry: RetryPolicy,
    ) -> Self {
        let reference_patterns = VISUAL_REFERENCE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("invalid visual reference pattern"))
            .collect();

        Self {
            generator,
            prompt_builder,
            retry,
            reference_patterns,
            whitespace: Regex::new(r"\s+").expect("invalid whitespace pattern"),
        }
    }

    /// Strip visual references and collapse whitespace.
    fn clean_text(&self, text: &str) -> String {
        let mut processed = text.to_string();
        for pattern in &self.reference_patterns {
            processed = pattern.replace_all(&processed, "").into_owned();
        }
        self.whitespace.replace_all(&processed, " ").trim().to_string()
    }

    /// Generate a podcast script of at least `params.min_length` characters.
    ///
    /// Performs a single expansion pass when the first response is too
    /// short; if the expanded script still misses the target it is returned
    /// anyway. Each backend invocation is wrapped by the retry policy.
    #[instrument(skip_all, fields(
        complexity = %params.complexity,
        audience = %params.audience,
        min_length = params.min_length,
    ))]
    pub async fn generate_script(
        &self,
        text: &str,
        params: &PromptParams,
        overrides: &CallOverrides,
    ) -> Result<String> {
        if text.trim().is_empty() {
            return Err(FortellError::InvalidInput(
                "Input text cannot be empty".to_string(),
            ));
        }

        let processed = self.clean_text(text);
        if processed.is_empty() {
            return Err(FortellError::InvalidInput(
                "Text cleaning resulted in empty content".to_string(),
            ));
        }

        info!("Generating script, target length {}", params.min_length);

        let prompt = self.prompt_builder.build_prompt(&processed, params);
        let response = self
            .retry
            .run(|| self.generator.complete(&prompt, overrides))
            .await?;
        let mut script = response.trim().to_string();

        if script.chars().count() < params.min_length {
            info!(
                "Initial script length ({}) below target ({}), expanding",
                script.chars().count(),
                params.min_length
            );
            let expand_prompt = self.prompt_builder.build_expand_prompt(&script, params);
            let response = self
                .retry
                .run(|| self.generator.complete(&expand_prompt, overrides))
                .await?;
            script = response.trim().to_string();
        }

        info!("Generated script of length {}", script.chars().count());
        Ok(script)
    }
}
