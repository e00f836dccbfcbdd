//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::essay::EssayEvaluator;
use crate::core::providers::Providers;
use crate::core::speech::SpeechTranslator;
use crate::server::routes::multipart::FormLimits;
use crate::storage::AudioStore;
use std::sync::Arc;
use std::time::Duration;

/// HTTP server state shared across handlers
///
/// Cloned into every Actix worker; all fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Essay evaluator
    pub essay: Arc<EssayEvaluator>,
    /// Speech translator
    pub speech: Arc<SpeechTranslator>,
    /// Synthesized audio awaiting retrieval
    pub audio_store: Arc<AudioStore>,
}

impl AppState {
    /// Wire services over the given providers
    pub fn new(config: Config, providers: Providers) -> Self {
        let audio_store = Arc::new(AudioStore::new(config.audio_store()));
        Self::with_audio_store(config, providers, audio_store)
    }

    /// Wire services over the given providers and an existing store
    pub fn with_audio_store(
        config: Config,
        providers: Providers,
        audio_store: Arc<AudioStore>,
    ) -> Self {
        let timeout = Duration::from_secs(config.providers().timeout);
        let essay = EssayEvaluator::new(
            Arc::clone(&providers.language_model),
            &config.providers().openai,
            timeout,
        );
        let speech = SpeechTranslator::new(&providers, &config.gateway, Arc::clone(&audio_store));

        Self {
            config: Arc::new(config),
            essay: Arc::new(essay),
            speech: Arc::new(speech),
            audio_store,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Multipart limits from server configuration
    pub fn form_limits(&self) -> FormLimits {
        let server = self.config.server();
        FormLimits {
            max_file_size: server.max_upload_size,
            max_text_size: server.max_body_size,
            max_files: server.max_files,
        }
    }
}
