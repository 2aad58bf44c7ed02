//! Storytelling prompt builder: frames technical content as a narrative arc.

use super::{PromptBuilder, PromptParams, SCRIPT_RULES};

/// Builder for story-driven prompts with tension and resolution cycles.
#[derive(Debug, Clone, Default)]
pub struct StorytellingPromptBuilder;

impl StorytellingPromptBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl PromptBuilder for StorytellingPromptBuilder {
    fn build_prompt(&self, text: &str, params: &PromptParams) -> String {
        let complexity = params.complexity.profile();
        let audience = params.audience.profile();

        format!(
            "Transform the source text below into an engaging narrative podcast script.\n\n\
            {rules}\n\n\
            Storytelling structure ({min_length} characters minimum):\n\
            1. Hook (10%): open with a compelling scenario or question that frames \
            the content in a relatable context\n\
            2. Challenge (20%): present the core concepts as problems to solve, \
            building a sense of discovery\n\
            3. Journey (50%): explain the ideas as revelations and plot developments, \
            maintaining {depth} while keeping narrative flow\n\
            4. Resolution (20%): show the impact, connect to {focus}, and close \
            with a satisfying conclusion\n\n\
            Style guidelines:\n\
            - Use narrative techniques: foreshadowing, callbacks, revelations\n\
            - Build tension and resolution cycles\n\
            - Maintain technical accuracy while being engaging\n\
            - Use {vocabulary}\n\
            - Write for {background}\n\
            - Provide examples relevant to {examples}\n\
            {extra}\n\
            Source text:\n{text}",
            rules = SCRIPT_RULES,
            min_length = params.min_length,
            depth = complexity.depth,
            focus = audience.focus,
            vocabulary = complexity.vocabulary,
            background = audience.background,
            examples = audience.examples,
            extra = params.extra_instructions(),
            text = text,
        )
    }

    fn build_expand_prompt(&self, script: &str, params: &PromptParams) -> String {
        let audience = params.audience.profile();

        format!(
            "Expand the narrative script below while keeping its storytelling approach. \
            Target length: at least {min_length} characters.\n\n\
            {rules}\n\n\
            Guidelines:\n\
            - Deepen the narrative elements and add more detailed scenarios\n\
            - Enhance the progression of ideas\n\
            - Keep the {complexity} complexity level\n\
            - Stay focused on {background}\n\
            {extra}\n\
            Current script:\n{script}",
            min_length = params.min_length,
            rules = SCRIPT_RULES,
            complexity = params.complexity,
            background = audience.background,
            extra = params.extra_instructions(),
            script = script,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Audience, Complexity};

    #[test]
    fn test_storytelling_structure_present() {
        let builder = StorytellingPromptBuilder::new();
        let params = PromptParams::new(Complexity::Intermediate, Audience::Enthusiasts, 6000);
        let prompt = builder.build_prompt("Fusion reactor designs.", &params);

        assert!(prompt.contains("Hook (10%)"));
        assert!(prompt.contains("Resolution (20%)"));
        assert!(prompt.contains("curious hobbyists"));
        assert!(prompt.contains("Fusion reactor designs."));
    }

    #[test]
    fn test_expand_mentions_complexity_level() {
        let builder = StorytellingPromptBuilder::new();
        let params = PromptParams::new(Complexity::Advanced, Audience::General, 4000);
        let prompt = builder.build_expand_prompt("Once upon a reactor.", &params);

        assert!(prompt.contains("advanced complexity"));
        assert!(prompt.contains("Once upon a reactor."));
    }
}
