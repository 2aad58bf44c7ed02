//! Speech synthesis backends.
//!
//! Synthesis is a single call per script with no retry wrapper, unlike the
//! LLM path; a failed synthesis surfaces immediately as a `Synthesis` error.

mod google;
mod polly;

pub use google::GoogleTts;
pub use polly::PollyTts;

use crate::config::{TtsEngine, TtsSettings};
use crate::error::{FortellError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Voice parameters for one synthesis call.
#[derive(Debug, Clone)]
pub struct VoiceParams {
    /// Provider-specific voice identifier.
    pub voice_id: String,
    /// Language code (e.g. en-US).
    pub language: String,
    /// Synthesis engine.
    pub engine: TtsEngine,
}

impl VoiceParams {
    /// Build voice params from settings, applying per-call overrides.
    pub fn resolve(
        settings: &TtsSettings,
        voice_id: Option<&str>,
        language: Option<&str>,
    ) -> Self {
        Self {
            voice_id: voice_id.unwrap_or(&settings.voice_id).to_string(),
            language: language.unwrap_or(&settings.language).to_string(),
            engine: settings.engine,
        }
    }
}

/// A synthesized audio file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioArtifact {
    /// Where the audio was written.
    pub path: PathBuf,
    /// Size of the written file in bytes.
    pub size_bytes: u64,
    /// Voice used for synthesis.
    pub voice_id: String,
    /// Language used for synthesis.
    pub language: String,
}

/// Trait for speech synthesis backends.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize a script, write the audio to `output_path`, and report
    /// the written artifact.
    async fn synthesize(
        &self,
        script: &str,
        voice: &VoiceParams,
        output_path: &Path,
    ) -> Result<AudioArtifact>;
}

/// Write audio bytes to disk and describe the artifact.
pub(crate) fn write_artifact(
    bytes: &[u8],
    voice: &VoiceParams,
    output_path: &Path,
) -> Result<AudioArtifact> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, bytes)?;

    Ok(AudioArtifact {
        path: output_path.to_path_buf(),
        size_bytes: bytes.len() as u64,
        voice_id: voice.voice_id.clone(),
        language: voice.language.clone(),
    })
}

/// Construct the configured TTS backend.
///
/// Unknown providers are rejected before any network call; the settings
/// schema (including the aws region requirement) is validated before
/// construction.
pub async fn create_synthesizer(settings: &TtsSettings) -> Result<Box<dyn SpeechSynthesizer>> {
    match settings.provider.as_str() {
        "aws" => {
            settings.validate()?;
            // validate() guarantees the region is present for aws
            let region = settings.region.clone().unwrap_or_default();
            Ok(Box::new(PollyTts::new(&region).await))
        }
        "google" => {
            settings.validate()?;
            Ok(Box::new(GoogleTts::new(settings)?))
        }
        other => Err(FortellError::UnsupportedProvider(format!(
            "Unsupported TTS provider: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let settings = TtsSettings {
            provider: "unknown".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_synthesizer(&settings).await,
            Err(FortellError::UnsupportedProvider(_))
        ));
    }

    #[tokio::test]
    async fn test_aws_without_region_rejected() {
        let settings = TtsSettings::default();
        assert!(settings.region.is_none());
        assert!(matches!(
            create_synthesizer(&settings).await,
            Err(FortellError::Config(_))
        ));
    }

    #[test]
    fn test_voice_params_overrides_win() {
        let settings = TtsSettings::default();
        let voice = VoiceParams::resolve(&settings, Some("Matthew"), None);
        assert_eq!(voice.voice_id, "Matthew");
        assert_eq!(voice.language, settings.language);
    }

    #[test]
    fn test_write_artifact_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp3");
        let voice = VoiceParams::resolve(&TtsSettings::default(), None, None);

        let artifact = write_artifact(b"audio-bytes", &voice, &path).unwrap();
        assert_eq!(artifact.size_bytes, 11);
        assert_eq!(artifact.path, path);
        assert_eq!(std::fs::read(&path).unwrap(), b"audio-bytes");
    }
}
