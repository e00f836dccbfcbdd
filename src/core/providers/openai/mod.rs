//! OpenAI provider
//!
//! Chat completions (text and vision, with strict JSON-schema output) and
//! Whisper transcription.

mod client;

pub use client::OpenAIClient;

/// Provider tag used in errors and logs
pub const PROVIDER_NAME: &str = "openai";
