//! Google Cloud Text-to-Speech adapter.

use async_trait::async_trait;
use base64::Engine as _;
use pathfinder_core::error::ProviderError;
use pathfinder_core::provider::{SpeechSynthesizer, Voice};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{decode_json, endpoint, transport};

/// Text-to-Speech API root.
pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";

/// Slightly slower than normal, for narration.
pub const SPEAKING_RATE: f64 = 0.95;

/// Neutral pitch.
pub const PITCH: f64 = 0.0;

/// Speech synthesis over the Text-to-Speech REST API.
#[derive(Debug, Clone)]
pub struct GoogleSpeechSynthesizer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleSpeechSynthesizer {
    /// Creates a synthesizer authenticated with `api_key`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: &'a Voice,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f64,
    pitch: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeechSynthesizer {
    async fn synthesize(&self, text: &str, voice: &Voice) -> Result<Vec<u8>, ProviderError> {
        let url = endpoint(&self.base_url, &["v1", "text:synthesize"])?;
        let body = SynthesizeRequest {
            input: SynthesisInput { text },
            voice,
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: SPEAKING_RATE,
                pitch: PITCH,
            },
        };
        debug!(voice = voice.name, chars = text.len(), "requesting speech synthesis");

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| transport(&e))?;
        let reply: SynthesizeResponse = decode_json(response).await?;

        base64::engine::general_purpose::STANDARD
            .decode(reply.audio_content.as_bytes())
            .map_err(|e| ProviderError::Decode(format!("audioContent is not base64: {e}")))
    }
}
