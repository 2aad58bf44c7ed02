//! Prompt construction for podcast script generation.
//!
//! Complexity and audience settings are mapped through fixed lookup tables
//! into descriptive parameters that the templates interpolate. Builders are
//! polymorphic over style; selection happens in configuration, not here.

mod narrative;
mod storytelling;

pub use narrative::NarrativePromptBuilder;
pub use storytelling::StorytellingPromptBuilder;

use serde::{Deserialize, Serialize};

/// Desired complexity of the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Basic,
    #[default]
    Intermediate,
    Advanced,
}

impl std::str::FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Complexity::Basic),
            "intermediate" => Ok(Complexity::Intermediate),
            "advanced" => Ok(Complexity::Advanced),
            _ => Err(format!("Unknown complexity level: {}", s)),
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Complexity::Basic => write!(f, "basic"),
            Complexity::Intermediate => write!(f, "intermediate"),
            Complexity::Advanced => write!(f, "advanced"),
        }
    }
}

/// Target audience for the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    General,
    Technical,
    Enthusiasts,
}

impl std::str::FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(Audience::General),
            "technical" => Ok(Audience::Technical),
            "enthusiasts" => Ok(Audience::Enthusiasts),
            _ => Err(format!("Unknown audience: {}", s)),
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Audience::General => write!(f, "general"),
            Audience::Technical => write!(f, "technical"),
            Audience::Enthusiasts => write!(f, "enthusiasts"),
        }
    }
}

/// Descriptive parameters derived from a complexity level.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityProfile {
    /// Vocabulary guidance for the script.
    pub vocabulary: &'static str,
    /// How deep explanations should go.
    pub depth: &'static str,
}

impl Complexity {
    /// Map this level into its descriptive prompt parameters.
    pub fn profile(&self) -> ComplexityProfile {
        match self {
            Complexity::Basic => ComplexityProfile {
                vocabulary: "simple everyday vocabulary, avoiding jargon entirely",
                depth: "surface-level explanations built on familiar analogies",
            },
            Complexity::Intermediate => ComplexityProfile {
                vocabulary: "accessible vocabulary with key technical terms explained",
                depth: "moderate depth that connects concepts to their context",
            },
            Complexity::Advanced => ComplexityProfile {
                vocabulary: "precise technical vocabulary used without simplification",
                depth: "thorough depth covering mechanisms, trade-offs and edge cases",
            },
        }
    }
}

/// Descriptive parameters derived from a target audience.
#[derive(Debug, Clone, Copy)]
pub struct AudienceProfile {
    /// Assumed listener background.
    pub background: &'static str,
    /// What the script should emphasize.
    pub focus: &'static str,
    /// The kind of examples to reach for.
    pub examples: &'static str,
}

impl Audience {
    /// Map this audience into its descriptive prompt parameters.
    pub fn profile(&self) -> AudienceProfile {
        match self {
            Audience::General => AudienceProfile {
                background: "listeners with no assumed prior knowledge",
                focus: "why the topic matters in everyday life",
                examples: "daily life and common experiences",
            },
            Audience::Technical => AudienceProfile {
                background: "practitioners familiar with the field's fundamentals",
                focus: "implementation details and practical implications",
                examples: "real systems, tooling and engineering practice",
            },
            Audience::Enthusiasts => AudienceProfile {
                background: "curious hobbyists who follow the field closely",
                focus: "recent developments and where the field is heading",
                examples: "notable projects, milestones and open problems",
            },
        }
    }
}

/// Parameters shared by generation and expansion prompts.
#[derive(Debug, Clone)]
pub struct PromptParams {
    /// Desired complexity level.
    pub complexity: Complexity,
    /// Target audience.
    pub audience: Audience,
    /// Minimum script length in characters.
    pub min_length: usize,
    /// Extra free-form parameters interpolated as additional instructions.
    pub extra: std::collections::HashMap<String, String>,
}

impl PromptParams {
    /// Create params with no extra instructions.
    pub fn new(complexity: Complexity, audience: Audience, min_length: usize) -> Self {
        Self {
            complexity,
            audience,
            min_length,
            extra: std::collections::HashMap::new(),
        }
    }

    /// Render extra parameters as appended instruction lines, sorted by key
    /// so prompt output is deterministic.
    pub(crate) fn extra_instructions(&self) -> String {
        if self.extra.is_empty() {
            return String::new();
        }
        let mut entries: Vec<(&String, &String)> = self.extra.iter().collect();
        entries.sort_by_key(|(k, _)| k.as_str());
        let lines: Vec<String> = entries
            .into_iter()
            .map(|(k, v)| format!("- {}: {}", k, v))
            .collect();
        format!("\nAdditional instructions:\n{}\n", lines.join("\n"))
    }
}

/// Rules every script prompt must carry: output is read aloud verbatim, so
/// audio-production artifacts and visual references must never appear.
pub(crate) const SCRIPT_RULES: &str = "\
CRITICAL rules for the output:
- NO sound effects (whoosh, ding, etc.)
- NO music, jingles or intro/outro music references
- NO audio transitions (\"fade in\", \"fade out\", etc.)
- NO audio instructions, cues or sound descriptions in parentheses
- NO host introductions, sign-offs, \"welcome\" or \"thanks for listening\" phrases
- NO podcast name or branding
- NO references to figures, tables, diagrams, images or other visual elements
- Output plain script text only, ready to be read aloud";

/// Trait for prompt builder implementations.
pub trait PromptBuilder: Send + Sync {
    /// Build the initial generation prompt from source text.
    fn build_prompt(&self, text: &str, params: &PromptParams) -> String;

    /// Build an expansion prompt from a script that came up short.
    fn build_expand_prompt(&self, script: &str, params: &PromptParams) -> String;
}

/// Prompt style selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Straight narrative exposition (default).
    #[default]
    Narrative,
    /// Story-driven framing with tension and resolution.
    Storytelling,
}

impl std::str::FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "narrative" => Ok(PromptStyle::Narrative),
            "storytelling" => Ok(PromptStyle::Storytelling),
            _ => Err(format!("Unknown prompt style: {}", s)),
        }
    }
}

/// Create a prompt builder for the given style.
pub fn create_prompt_builder(style: PromptStyle) -> Box<dyn PromptBuilder> {
    match style {
        PromptStyle::Narrative => Box::new(NarrativePromptBuilder::new()),
        PromptStyle::Storytelling => Box::new(StorytellingPromptBuilder::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_values_fall_back_to_default() {
        let complexity: Complexity = "wild".parse().unwrap_or_default();
        assert_eq!(complexity, Complexity::Intermediate);

        let audience: Audience = "martians".parse().unwrap_or_default();
        assert_eq!(audience, Audience::General);
    }

    #[test]
    fn test_enum_round_trips() {
        for c in [Complexity::Basic, Complexity::Intermediate, Complexity::Advanced] {
            assert_eq!(c.to_string().parse::<Complexity>().unwrap(), c);
        }
        for a in [Audience::General, Audience::Technical, Audience::Enthusiasts] {
            assert_eq!(a.to_string().parse::<Audience>().unwrap(), a);
        }
    }

    #[test]
    fn test_extra_instructions_are_sorted() {
        let mut params = PromptParams::new(Complexity::Basic, Audience::General, 100);
        params.extra.insert("tone".to_string(), "upbeat".to_string());
        params.extra.insert("accent".to_string(), "neutral".to_string());

        let rendered = params.extra_instructions();
        let accent_pos = rendered.find("accent").unwrap();
        let tone_pos = rendered.find("tone").unwrap();
        assert!(accent_pos < tone_pos);
    }

    #[test]
    fn test_builders_include_script_rules() {
        let params = PromptParams::new(Complexity::Intermediate, Audience::General, 5000);
        for style in [PromptStyle::Narrative, PromptStyle::Storytelling] {
            let builder = create_prompt_builder(style);
            let prompt = builder.build_prompt("Some source text.", &params);
            assert!(prompt.contains("NO sound effects"));
            assert!(prompt.contains("visual elements"));
            assert!(prompt.contains("Some source text."));

            let expand = builder.build_expand_prompt("Short script.", &params);
            assert!(expand.contains("5000"));
            assert!(expand.contains("Short script."));
        }
    }
}
