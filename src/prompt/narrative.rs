//! Default narrative prompt builder.

use super::{PromptBuilder, PromptParams, SCRIPT_RULES};

/// Builder for plain narrative exposition prompts.
#[derive(Debug, Clone, Default)]
pub struct NarrativePromptBuilder;

impl NarrativePromptBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl PromptBuilder for NarrativePromptBuilder {
    fn build_prompt(&self, text: &str, params: &PromptParams) -> String {
        let complexity = params.complexity.profile();
        let audience = params.audience.profile();

        format!(
            "Write a podcast narration script from the source text below.\n\n\
            {rules}\n\n\
            Content requirements:\n\
            - Minimum length: {min_length} characters\n\
            - Use {vocabulary}\n\
            - Aim for {depth}\n\
            - Write for {background}\n\
            - Emphasize {focus}\n\
            - Draw examples from {examples}\n\
            - Present ideas in a logical progression with smooth verbal transitions\n\
            - Stay faithful to the source; do not invent facts\n\
            {extra}\n\
            Source text:\n{text}",
            rules = SCRIPT_RULES,
            min_length = params.min_length,
            vocabulary = complexity.vocabulary,
            depth = complexity.depth,
            background = audience.background,
            focus = audience.focus,
            examples = audience.examples,
            extra = params.extra_instructions(),
            text = text,
        )
    }

    fn build_expand_prompt(&self, script: &str, params: &PromptParams) -> String {
        let complexity = params.complexity.profile();
        let audience = params.audience.profile();

        format!(
            "Expand the podcast script below so it reaches at least {min_length} characters.\n\n\
            {rules}\n\n\
            Expansion guidelines:\n\
            - Deepen existing explanations rather than adding unrelated topics\n\
            - Add concrete examples relevant to {examples}\n\
            - Keep {vocabulary}\n\
            - Maintain {depth}\n\
            - Preserve the existing structure and tone\n\
            {extra}\n\
            Current script:\n{script}",
            min_length = params.min_length,
            rules = SCRIPT_RULES,
            examples = audience.examples,
            vocabulary = complexity.vocabulary,
            depth = complexity.depth,
            extra = params.extra_instructions(),
            script = script,
        )
    }
}
