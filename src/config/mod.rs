//! Configuration management for Fortell.

mod settings;

pub use settings::{
    ChunkingSettings, GeneralSettings, LlmSettings, RetrievalSettings, ScriptSettings, Settings,
    TtsEngine, TtsSettings,
};
