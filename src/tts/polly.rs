//! AWS Polly speech synthesis.

use super::{write_artifact, AudioArtifact, SpeechSynthesizer, VoiceParams};
use crate::config::TtsEngine;
use crate::error::{FortellError, Result};
use async_trait::async_trait;
use aws_sdk_polly::types::{Engine, LanguageCode, OutputFormat, VoiceId};
use std::path::Path;
use tracing::{debug, instrument};

/// Polly-based synthesizer.
pub struct PollyTts {
    client: aws_sdk_polly::Client,
}

impl PollyTts {
    /// Create a client for the given region using the default AWS
    /// credential chain.
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: aws_sdk_polly::Client::new(&config),
        }
    }

    /// Wrap an existing Polly client (for pre-built SDK configs).
    pub fn from_client(client: aws_sdk_polly::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpeechSynthesizer for PollyTts {
    #[instrument(skip_all, fields(voice = %voice.voice_id, chars = script.chars().count()))]
    async fn synthesize(
        &self,
        script: &str,
        voice: &VoiceParams,
        output_path: &Path,
    ) -> Result<AudioArtifact> {
        let engine = match voice.engine {
            TtsEngine::Standard => Engine::Standard,
            TtsEngine::Neural => Engine::Neural,
        };

        let response = self
            .client
            .synthesize_speech()
            .output_format(OutputFormat::Mp3)
            .text(script)
            .voice_id(VoiceId::from(voice.voice_id.as_str()))
            .language_code(LanguageCode::from(voice.language.as_str()))
            .engine(engine)
            .send()
            .await
            .map_err(|e| FortellError::Synthesis(format!("Polly request failed: {}", e)))?;

        let bytes = response
            .audio_stream
            .collect()
            .await
            .map_err(|e| FortellError::Synthesis(format!("Polly stream read failed: {}", e)))?
            .into_bytes();

        debug!("Polly returned {} bytes of audio", bytes.len());
        write_artifact(&bytes, voice, output_path)
    }
}
