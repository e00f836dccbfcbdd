//! Speech translation
//!
//! A recorded clip is transcribed in the configured source language,
//! translated by a chat model and spoken back with text-to-speech. The
//! resulting audio is kept in the [`AudioStore`] and handed out by id.

mod types;

pub use types::{
    AudioUpload, ProcessedAudio, StoredSpeech, TextToSpeechRequest, TranscriptTranslation,
};

use crate::config::GatewayConfig;
use crate::core::providers::types::content_type_to_extension;
use crate::core::providers::{
    ChatMessage, ChatRequest, LanguageModel, Providers, SpeechRequest, SpeechToText,
    SynthesizedSpeech, TextToSpeech, TranscriptionRequest, call_with_timeout,
};
use crate::storage::AudioStore;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Path under which stored clips are served
pub const AUDIO_ROUTE: &str = "/api/py/audio";

/// Public URL of a stored clip
pub fn audio_url(audio_id: &str) -> String {
    format!("{}/{}", AUDIO_ROUTE, audio_id)
}

/// Transcribe, translate and re-voice audio clips
pub struct SpeechTranslator {
    speech_to_text: Arc<dyn SpeechToText>,
    language_model: Arc<dyn LanguageModel>,
    text_to_speech: Arc<dyn TextToSpeech>,
    audio_store: Arc<AudioStore>,
    transcription_model: String,
    translation_model: String,
    voice_id: String,
    source_language: String,
    source_language_name: String,
    target_language_name: String,
    timeout: Duration,
}

impl SpeechTranslator {
    /// Create a new translator
    pub fn new(providers: &Providers, config: &GatewayConfig, audio_store: Arc<AudioStore>) -> Self {
        Self {
            speech_to_text: Arc::clone(&providers.speech_to_text),
            language_model: Arc::clone(&providers.language_model),
            text_to_speech: Arc::clone(&providers.text_to_speech),
            audio_store,
            transcription_model: config.providers.openai.transcription_model.clone(),
            translation_model: config.providers.openai.translation_model.clone(),
            voice_id: config.providers.elevenlabs.voice_id.clone(),
            source_language: config.speech.source_language.clone(),
            source_language_name: config.speech.source_language_name.clone(),
            target_language_name: config.speech.target_language_name.clone(),
            timeout: Duration::from_secs(config.providers.timeout),
        }
    }

    /// Override the per-call provider deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Source language code used for transcription
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Transcribe a clip in the source language
    pub async fn transcribe(&self, audio: AudioUpload) -> Result<String> {
        if audio.bytes.is_empty() {
            return Err(GatewayError::bad_request("No audio file provided"));
        }

        let request = TranscriptionRequest {
            filename: audio.upstream_filename(),
            content_type: audio.upstream_content_type(),
            file: audio.bytes,
            model: self.transcription_model.clone(),
            language: Some(self.source_language.clone()),
        };
        debug!(
            filename = %request.filename,
            bytes = request.file.len(),
            "Transcribing audio"
        );

        let transcription = call_with_timeout(
            "transcription",
            self.timeout,
            self.speech_to_text.transcribe(request),
        )
        .await?;

        Ok(transcription.text)
    }

    /// Translate source-language text into the target language
    pub async fn translate(&self, text: &str) -> Result<String> {
        let request = ChatRequest::new(
            self.translation_model.clone(),
            vec![
                ChatMessage::system(self.translation_prompt()),
                ChatMessage::user(text),
            ],
        );

        let completion =
            call_with_timeout("translation", self.timeout, self.language_model.chat(request))
                .await?;

        let translated = completion.content.trim();
        if translated.is_empty() {
            return Err(GatewayError::upstream_format("Translation came back empty"));
        }
        Ok(translated.to_string())
    }

    /// Synthesize speech, with the configured voice unless one is given
    pub async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> Result<SynthesizedSpeech> {
        let request = SpeechRequest {
            text: text.to_string(),
            voice_id: voice_id.unwrap_or(self.voice_id.as_str()).to_string(),
        };

        call_with_timeout(
            "speech synthesis",
            self.timeout,
            self.text_to_speech.synthesize(request),
        )
        .await
    }

    /// Put synthesized audio in the store
    pub fn store(&self, speech: SynthesizedSpeech) -> Result<StoredSpeech> {
        let extension = content_type_to_extension(&speech.content_type);
        let audio_id = self
            .audio_store
            .insert(speech.audio, speech.content_type.clone(), extension)?;

        Ok(StoredSpeech {
            audio_url: audio_url(&audio_id),
            audio_id,
            content_type: speech.content_type,
        })
    }

    /// Full pipeline: transcribe, translate, synthesize, store
    ///
    /// An empty transcript stops the pipeline before any translation call.
    pub async fn process_audio(&self, audio: AudioUpload) -> Result<ProcessedAudio> {
        let started = std::time::Instant::now();
        let original_text = self.transcribe(audio).await?;
        if original_text.trim().is_empty() {
            info!("Transcription returned no speech");
            return Err(GatewayError::NoSpeechDetected);
        }

        let translated_text = self.translate(&original_text).await?;
        let speech = self.synthesize(&translated_text, None).await?;
        let stored = self.store(speech)?;

        info!(
            audio_id = %stored.audio_id,
            transcript_chars = original_text.chars().count(),
            translation_chars = translated_text.chars().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Processed audio"
        );

        Ok(ProcessedAudio {
            original_text,
            translated_text,
            audio_id: stored.audio_id,
            audio_url: stored.audio_url,
        })
    }

    /// Transcribe and translate without synthesizing speech
    pub async fn transcribe_and_translate(&self, audio: AudioUpload) -> Result<TranscriptTranslation> {
        let original_text = self.transcribe(audio).await?;
        if original_text.trim().is_empty() {
            return Err(GatewayError::NoSpeechDetected);
        }

        let text = self.translate(&original_text).await?;
        Ok(TranscriptTranslation {
            text,
            original_text,
            language: self.source_language.clone(),
        })
    }

    /// Synthesize arbitrary text and store the clip
    pub async fn text_to_speech(&self, request: TextToSpeechRequest) -> Result<StoredSpeech> {
        if request.text.trim().is_empty() {
            return Err(GatewayError::bad_request("No text provided"));
        }

        let voice_id = request
            .voice_id
            .as_deref()
            .map(str::trim)
            .filter(|voice| !voice.is_empty());
        let speech = self.synthesize(&request.text, voice_id).await?;
        self.store(speech)
    }

    fn translation_prompt(&self) -> String {
        format!(
            "You are a {source} to {target} translator. Translate the following text to {target}, \
             maintaining the original meaning and tone:",
            source = self.source_language_name,
            target = self.target_language_name,
        )
    }
}
