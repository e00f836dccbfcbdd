//! ElevenLabs HTTP client

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::PROVIDER_NAME;
use crate::config::ElevenLabsConfig;
use crate::core::providers::TextToSpeech;
use crate::core::providers::base::{build_http_client, check_status};
use crate::core::providers::error::ProviderError;
use crate::core::providers::types::{SpeechRequest, SynthesizedSpeech};

/// ElevenLabs client for speech synthesis
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model_id: String,
    output_format: String,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

#[derive(Debug, Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

impl ElevenLabsClient {
    /// Create a new client from configuration
    pub fn new(config: &ElevenLabsConfig, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_http_client(PROVIDER_NAME, timeout)?,
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            output_format: config.output_format.clone(),
            voice_settings: VoiceSettings {
                stability: config.stability,
                similarity_boost: config.similarity_boost,
            },
        })
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SynthesizedSpeech, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::authentication(
                PROVIDER_NAME,
                "API key not configured",
            ));
        }

        let url = format!("{}/text-to-speech/{}", self.api_base, request.voice_id);
        debug!(
            voice_id = %request.voice_id,
            text_len = request.text.len(),
            "Sending speech synthesis"
        );

        let body = SynthesisBody {
            text: &request.text,
            model_id: &self.model_id,
            voice_settings: self.voice_settings,
        };

        let response = self
            .http
            .post(&url)
            .query(&[("output_format", self.output_format.as_str())])
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER_NAME, e))?;

        let response = check_status(PROVIDER_NAME, response).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("audio/"))
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER_NAME, e))?;

        if audio.is_empty() {
            return Err(ProviderError::response_parsing(
                PROVIDER_NAME,
                "synthesis returned no audio",
            ));
        }

        Ok(SynthesizedSpeech {
            audio,
            content_type,
        })
    }
}
