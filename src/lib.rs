//! # examiner-gateway
//!
//! HTTP backend for an IELTS writing examiner and a spoken-language
//! translator. Requests are forwarded to a language model, a speech-to-text
//! service and a text-to-speech service; replies are validated and reshaped
//! into typed JSON for the web client.
//!
//! ## Endpoints
//!
//! - `POST /api/py/evaluate`, `POST /api/py/evaluate-multi`: essay scoring
//!   from text or photographed pages
//! - `POST /api/py/process-audio`: transcribe, translate and re-voice a clip
//! - `POST /api/py/transcribe`, `POST /api/py/text-to-speech`
//! - `GET /api/py/audio/{id}`: stream synthesized audio, with byte ranges
//!
//! ## Running
//!
//! ```rust,no_run
//! use examiner_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::essay::{EssayEvaluation, EssayEvaluator, overall_band, word_count};
pub use core::providers::{ProviderError, Providers};
pub use core::speech::SpeechTranslator;
pub use storage::AudioStore;
pub use utils::error::{GatewayError, Result};

use serde::Serialize;
use tracing::info;

/// A configured gateway ready to serve
pub struct Gateway {
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance with the production provider clients
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");
        let server = server::HttpServer::new(&config)?;
        Ok(Self { server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting examiner gateway {}", VERSION);
        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time, seconds since the Unix epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("GATEWAY_BUILD_TIME"),
            git_hash: env!("GATEWAY_GIT_HASH"),
        }
    }
}

/// Build information stamped at compile time
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
