//! Core error types

use crate::core::providers::ProviderError;
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or missing client input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Transcription produced no text
    #[error("No speech detected in the audio")]
    NoSpeechDetected,

    /// Unknown or expired resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requested byte range lies outside the resource
    #[error("Range not satisfiable for resource of {size} bytes")]
    RangeNotSatisfiable { size: u64 },

    /// Upload or stored object exceeds a configured bound
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Model reply did not match the expected schema
    #[error("Upstream format error: {0}")]
    UpstreamFormat(String),

    /// Provider call failed
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// Provider call exceeded its deadline
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
