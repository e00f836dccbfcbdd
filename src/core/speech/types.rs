//! Speech translation request and response types

use crate::core::providers::types::{content_type_to_extension, supported_audio_formats};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Fallback container for browser recordings
const DEFAULT_UPLOAD_EXTENSION: &str = "webm";
const DEFAULT_UPLOAD_CONTENT_TYPE: &str = "audio/webm";

/// An uploaded audio clip
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub bytes: Bytes,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl AudioUpload {
    pub fn new(bytes: Bytes, filename: Option<String>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            filename,
            content_type,
        }
    }

    /// Extension the transcription service will accept
    ///
    /// Taken from the filename when it names a supported format, then from
    /// an `audio/*` content type, else `webm`.
    pub fn extension(&self) -> String {
        let from_name = self
            .filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| supported_audio_formats().contains(&ext.as_str()));

        if let Some(ext) = from_name {
            return ext;
        }

        match self.content_type.as_deref() {
            Some(ct) if ct.starts_with("audio/") => content_type_to_extension(ct).to_string(),
            _ => DEFAULT_UPLOAD_EXTENSION.to_string(),
        }
    }

    /// Filename sent upstream
    pub fn upstream_filename(&self) -> String {
        format!("audio.{}", self.extension())
    }

    /// Content type sent upstream
    pub fn upstream_content_type(&self) -> String {
        match self.content_type.as_deref() {
            Some(ct) if ct.starts_with("audio/") || ct.starts_with("video/") => ct.to_string(),
            _ => DEFAULT_UPLOAD_CONTENT_TYPE.to_string(),
        }
    }
}

/// Result of the full audio pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedAudio {
    pub original_text: String,
    pub translated_text: String,
    pub audio_id: String,
    pub audio_url: String,
}

/// Result of transcription followed by translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptTranslation {
    /// Translated text
    pub text: String,
    /// Transcript in the source language
    pub original_text: String,
    /// Source language code
    pub language: String,
}

/// A synthesized clip that is now retrievable from the audio store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSpeech {
    pub audio_id: String,
    pub audio_url: String,
    pub content_type: String,
}

/// Body of a text-to-speech request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeechRequest {
    pub text: String,
    #[serde(default)]
    pub voice_id: Option<String>,
}
