//! Server startup from a configuration file

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use std::path::Path;
use tracing::{info, warn};

/// Load configuration and run the server until shutdown
///
/// A missing configuration file falls back to defaults plus environment
/// variables; an invalid one is an error.
pub async fn run_server(config_path: &Path) -> Result<()> {
    let (config, source) = load_config(config_path).await?;
    source.log(config_path);
    run_with_config(config).await
}

/// Run the server with an already-loaded configuration
pub async fn run_with_config(config: Config) -> Result<()> {
    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health");
    info!("   GET  /api/py/helloFastApi");
    info!("   POST /api/py/evaluate");
    info!("   POST /api/py/evaluate-multi");
    info!("   POST /api/py/process-audio");
    info!("   POST /api/py/transcribe");
    info!("   POST /api/py/text-to-speech");
    info!("   GET  /api/py/audio/{{audio_id}}");

    server.start().await
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// The YAML file at the requested path
    File,
    /// Defaults plus environment, the file being absent
    Defaults,
}

impl ConfigSource {
    /// Report the source; call once a subscriber is installed
    pub fn log(self, config_path: &Path) {
        match self {
            ConfigSource::File => {
                info!(path = %config_path.display(), "Configuration loaded from file")
            }
            ConfigSource::Defaults => warn!(
                path = %config_path.display(),
                "Configuration file not found, using defaults and environment"
            ),
        }
    }
}

/// Read configuration, falling back to defaults when the file is absent
///
/// Nothing is logged here since the caller may not have initialized logging
/// yet; use [`ConfigSource::log`] afterwards.
pub async fn load_config(config_path: &Path) -> Result<(Config, ConfigSource)> {
    if tokio::fs::try_exists(config_path).await.unwrap_or(false) {
        Ok((Config::from_file(config_path).await?, ConfigSource::File))
    } else {
        Ok((Config::from_env()?, ConfigSource::Defaults))
    }
}
