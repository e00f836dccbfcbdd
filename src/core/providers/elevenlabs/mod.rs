//! ElevenLabs text-to-speech provider

mod client;

pub use client::ElevenLabsClient;

/// Provider tag used in errors and logs
pub const PROVIDER_NAME: &str = "elevenlabs";
