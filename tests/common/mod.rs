//! Common test utilities for examiner-gateway

pub mod fixtures;
pub mod upstream;

pub use fixtures::{Part, assessment, multipart_form};
pub use upstream::{SYNTHESIZED_AUDIO, Upstreams};
