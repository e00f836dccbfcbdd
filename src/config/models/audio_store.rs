//! Synthesized audio store configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds for the in-memory audio store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioStoreConfig {
    /// Time a clip stays retrievable, in seconds
    #[serde(default = "default_audio_ttl")]
    pub ttl: u64,
    /// Maximum number of clips held at once
    #[serde(default = "default_audio_max_entries")]
    pub max_entries: usize,
    /// Maximum total bytes held at once
    #[serde(default = "default_audio_max_bytes")]
    pub max_bytes: usize,
    /// Size of each chunk when streaming a clip
    #[serde(default = "default_audio_chunk_size")]
    pub chunk_size: usize,
}

impl Default for AudioStoreConfig {
    fn default() -> Self {
        Self {
            ttl: default_audio_ttl(),
            max_entries: default_audio_max_entries(),
            max_bytes: default_audio_max_bytes(),
            chunk_size: default_audio_chunk_size(),
        }
    }
}

impl AudioStoreConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }

    /// Interval of the background purge task
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs((self.ttl / 4).max(1))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.ttl == 0 {
            return Err("Audio store ttl cannot be 0".to_string());
        }
        if self.max_entries == 0 {
            return Err("Audio store max_entries cannot be 0".to_string());
        }
        if self.max_bytes == 0 {
            return Err("Audio store max_bytes cannot be 0".to_string());
        }
        if self.chunk_size == 0 {
            return Err("Audio store chunk_size cannot be 0".to_string());
        }
        Ok(())
    }
}
