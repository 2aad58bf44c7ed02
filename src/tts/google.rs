//! Google Cloud Text-to-Speech over the REST API.

use super::{write_artifact, AudioArtifact, SpeechSynthesizer, VoiceParams};
use crate::config::TtsSettings;
use crate::error::{FortellError, Result};
use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const API_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Google Cloud TTS synthesizer.
pub struct GoogleTts {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

impl GoogleTts {
    /// Create a client from validated settings.
    pub fn new(settings: &TtsSettings) -> Result<Self> {
        let api_key = settings.api_key.clone().ok_or_else(|| {
            FortellError::Config(
                "No API key provided for the google provider (set tts.api_key or GOOGLE_TTS_API_KEY)"
                    .to_string(),
            )
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http, api_key })
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    #[instrument(skip_all, fields(voice = %voice.voice_id, chars = script.chars().count()))]
    async fn synthesize(
        &self,
        script: &str,
        voice: &VoiceParams,
        output_path: &Path,
    ) -> Result<AudioArtifact> {
        let body = SynthesizeRequest {
            input: SynthesisInput { text: script },
            voice: VoiceSelection {
                language_code: &voice.language,
                name: &voice.voice_id,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };

        let url = format!("{}?key={}", API_URL, self.api_key);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| FortellError::Synthesis(format!("Google TTS request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FortellError::Synthesis(format!(
                "Google TTS returned {}: {}",
                status, text
            )));
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| FortellError::Synthesis(format!("Google TTS response parse failed: {}", e)))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&parsed.audio_content)
            .map_err(|e| FortellError::Synthesis(format!("Invalid audio content: {}", e)))?;

        if bytes.is_empty() {
            return Err(FortellError::Synthesis(
                "Google TTS returned no audio".to_string(),
            ));
        }

        debug!("Google TTS returned {} bytes of audio", bytes.len());
        write_artifact(&bytes, voice, output_path)
    }
}
