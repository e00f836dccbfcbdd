//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod audio_store;
pub mod gateway;
pub mod logging;
pub mod provider;
pub mod server;
pub mod speech;

pub use audio_store::*;
pub use gateway::*;
pub use logging::*;
pub use provider::*;
pub use server::*;
pub use speech::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum JSON body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

/// Default maximum size of one uploaded file in bytes
pub fn default_max_upload_size() -> usize {
    25 * 1024 * 1024 // 25MB, the Whisper upload limit
}

pub fn default_max_files() -> usize {
    10
}

/// Default provider call timeout in seconds
pub fn default_provider_timeout() -> u64 {
    60
}

pub fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

pub fn default_elevenlabs_api_base() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

pub fn default_audio_ttl() -> u64 {
    3600 // 1 hour
}

pub fn default_audio_max_entries() -> usize {
    256
}

pub fn default_audio_max_bytes() -> usize {
    64 * 1024 * 1024 // 64MB
}

pub fn default_audio_chunk_size() -> usize {
    8192
}

pub fn default_log_level() -> String {
    "info".to_string()
}
