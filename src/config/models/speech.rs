//! Speech translation configuration

use serde::{Deserialize, Serialize};

/// Language pair for the speech translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// ISO-639-1 code passed to transcription
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Human-readable source language used in prompts
    #[serde(default = "default_source_language_name")]
    pub source_language_name: String,
    /// Human-readable target language used in prompts
    #[serde(default = "default_target_language_name")]
    pub target_language_name: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            source_language_name: default_source_language_name(),
            target_language_name: default_target_language_name(),
        }
    }
}

impl SpeechConfig {
    pub fn validate(&self) -> Result<(), String> {
        let code = self.source_language.trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(format!(
                "source_language must be an ISO-639-1 code, got '{}'",
                self.source_language
            ));
        }
        if self.source_language_name.trim().is_empty() || self.target_language_name.trim().is_empty()
        {
            return Err("Language names cannot be empty".to_string());
        }
        Ok(())
    }
}

fn default_source_language() -> String {
    "vi".to_string()
}

fn default_source_language_name() -> String {
    "Vietnamese".to_string()
}

fn default_target_language_name() -> String {
    "English".to_string()
}
