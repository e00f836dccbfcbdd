//! Shared utilities

pub mod error;
pub mod logging;

pub use logging::sanitize_for_logging;
