//! Provider configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Upstream provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// OpenAI settings (chat, vision, transcription)
    #[serde(default)]
    pub openai: OpenAIConfig,
    /// ElevenLabs settings (speech synthesis)
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,
    /// Deadline for each outbound provider call, in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: OpenAIConfig::default(),
            elevenlabs: ElevenLabsConfig::default(),
            timeout: default_provider_timeout(),
        }
    }
}

impl ProvidersConfig {
    /// Fill empty API keys from the process environment
    pub fn apply_env(&mut self) {
        if self.openai.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                self.openai.api_key = key;
            }
        }
        if self.elevenlabs.api_key.is_empty() {
            if let Some(key) = ["ELEVENLABS_API_KEY", "ELEVEN_LABS_API_KEY"]
                .iter()
                .find_map(|name| std::env::var(name).ok())
            {
                self.elevenlabs.api_key = key;
            }
        }
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("Provider timeout cannot be 0".to_string());
        }
        self.openai.validate()?;
        self.elevenlabs.validate()
    }
}

/// OpenAI configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// API key (falls back to OPENAI_API_KEY)
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// API base URL
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,
    /// Model that scores essay text
    #[serde(default = "default_evaluation_model")]
    pub evaluation_model: String,
    /// Image-capable model used for photographed essays
    #[serde(default = "default_vision_model")]
    pub vision_model: String,
    /// Model used to translate transcripts
    #[serde(default = "default_translation_model")]
    pub translation_model: String,
    /// Speech-to-text model
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    /// Token cap for the multi-image call
    #[serde(default)]
    pub multi_image_max_tokens: Option<u32>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_openai_api_base(),
            evaluation_model: default_evaluation_model(),
            vision_model: default_vision_model(),
            translation_model: default_translation_model(),
            transcription_model: default_transcription_model(),
            multi_image_max_tokens: None,
        }
    }
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &mask_key(&self.api_key))
            .field("api_base", &self.api_base)
            .field("evaluation_model", &self.evaluation_model)
            .field("vision_model", &self.vision_model)
            .field("translation_model", &self.translation_model)
            .field("transcription_model", &self.transcription_model)
            .field("multi_image_max_tokens", &self.multi_image_max_tokens)
            .finish()
    }
}

impl OpenAIConfig {
    pub fn validate(&self) -> Result<(), String> {
        crate::config::validation::validate_url(&self.api_base, "OpenAI api_base")?;
        for (name, model) in [
            ("evaluation_model", &self.evaluation_model),
            ("vision_model", &self.vision_model),
            ("translation_model", &self.translation_model),
            ("transcription_model", &self.transcription_model),
        ] {
            if model.trim().is_empty() {
                return Err(format!("OpenAI {} cannot be empty", name));
            }
        }
        if self.multi_image_max_tokens == Some(0) {
            return Err("OpenAI multi_image_max_tokens cannot be 0".to_string());
        }
        Ok(())
    }
}

/// ElevenLabs configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    /// API key (falls back to ELEVENLABS_API_KEY)
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// API base URL
    #[serde(default = "default_elevenlabs_api_base")]
    pub api_base: String,
    /// Default voice
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    /// Synthesis model
    #[serde(default = "default_tts_model_id")]
    pub model_id: String,
    /// Voice stability (0.0 to 1.0)
    #[serde(default = "default_voice_setting")]
    pub stability: f32,
    /// Voice similarity boost (0.0 to 1.0)
    #[serde(default = "default_voice_setting")]
    pub similarity_boost: f32,
    /// Output encoding requested from the API
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_elevenlabs_api_base(),
            voice_id: default_voice_id(),
            model_id: default_tts_model_id(),
            stability: default_voice_setting(),
            similarity_boost: default_voice_setting(),
            output_format: default_output_format(),
        }
    }
}

impl std::fmt::Debug for ElevenLabsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsConfig")
            .field("api_key", &mask_key(&self.api_key))
            .field("api_base", &self.api_base)
            .field("voice_id", &self.voice_id)
            .field("model_id", &self.model_id)
            .field("stability", &self.stability)
            .field("similarity_boost", &self.similarity_boost)
            .field("output_format", &self.output_format)
            .finish()
    }
}

impl ElevenLabsConfig {
    pub fn validate(&self) -> Result<(), String> {
        crate::config::validation::validate_url(&self.api_base, "ElevenLabs api_base")?;
        if self.voice_id.trim().is_empty() {
            return Err("ElevenLabs voice_id cannot be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.stability) {
            return Err("ElevenLabs stability must be between 0.0 and 1.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err("ElevenLabs similarity_boost must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

fn mask_key(key: &str) -> &'static str {
    if key.is_empty() { "<unset>" } else { "***" }
}

fn default_evaluation_model() -> String {
    "gpt-4o".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_translation_model() -> String {
    "gpt-4".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_tts_model_id() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_voice_setting() -> f32 {
    0.5
}

fn default_output_format() -> String {
    "mp3_44100_128".to_string()
}
