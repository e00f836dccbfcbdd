//! Core services: essay evaluation, speech translation and provider clients

pub mod essay;
pub mod providers;
pub mod speech;
