//! Upstream AI providers
//!
//! Services depend on the [`LanguageModel`], [`SpeechToText`] and
//! [`TextToSpeech`] traits rather than on concrete clients, so handlers can
//! be exercised against in-process fakes.

pub mod base;
pub mod elevenlabs;
pub mod error;
pub mod openai;
pub mod types;

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::ProvidersConfig;
use crate::utils::error::GatewayError;

pub use elevenlabs::ElevenLabsClient;
pub use error::ProviderError;
pub use openai::OpenAIClient;
pub use types::{
    ChatCompletion, ChatMessage, ChatRequest, ContentPart, MessageContent, MessageRole,
    ResponseFormat, SpeechRequest, SynthesizedSpeech, Transcription, TranscriptionRequest,
};

/// Chat-capable language model (text and image input)
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError>;
}

/// Speech-to-text provider
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, request: TranscriptionRequest)
    -> Result<Transcription, ProviderError>;
}

/// Text-to-speech provider
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SynthesizedSpeech, ProviderError>;
}

/// The set of providers a running gateway talks to
#[derive(Clone)]
pub struct Providers {
    pub language_model: Arc<dyn LanguageModel>,
    pub speech_to_text: Arc<dyn SpeechToText>,
    pub text_to_speech: Arc<dyn TextToSpeech>,
}

impl Providers {
    /// Build the production clients from configuration
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(config.timeout);

        if config.openai.api_key.is_empty() {
            warn!("OpenAI API key is not configured; evaluation and transcription will fail");
        }
        if config.elevenlabs.api_key.is_empty() {
            warn!("ElevenLabs API key is not configured; speech synthesis will fail");
        }

        let openai = Arc::new(OpenAIClient::new(&config.openai, timeout)?);
        let elevenlabs = Arc::new(ElevenLabsClient::new(&config.elevenlabs, timeout)?);
        info!(
            openai_base = %config.openai.api_base,
            elevenlabs_base = %config.elevenlabs.api_base,
            "Provider clients initialized"
        );

        Ok(Self {
            language_model: openai.clone(),
            speech_to_text: openai,
            text_to_speech: elevenlabs,
        })
    }
}

/// Run an outbound provider call under a deadline
///
/// An elapsed deadline becomes [`GatewayError::Timeout`]; provider failures
/// go through the usual `From<ProviderError>` conversion.
pub async fn call_with_timeout<T, F>(
    operation: &str,
    timeout: Duration,
    call: F,
) -> crate::utils::error::Result<T>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(GatewayError::from),
        Err(_) => {
            warn!(operation, ?timeout, "Provider call timed out");
            Err(GatewayError::timeout(format!(
                "{} did not complete within {:?}",
                operation, timeout
            )))
        }
    }
}
