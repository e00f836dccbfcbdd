//! Storage for gateway-generated artifacts

pub mod audio;

pub use audio::{AudioClip, AudioId, AudioStore, AudioStoreStats};
