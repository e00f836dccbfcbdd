//! Integration tests for examiner-gateway
//!
//! The Actix application runs in-process; provider clients talk to mock
//! upstream servers.

pub mod config_tests;
pub mod error_handling_tests;
pub mod essay_tests;
pub mod speech_tests;

/// Build the app for a given state
#[macro_export]
macro_rules! gateway_app {
    ($state:expr) => {
        actix_web::test::init_service(examiner_gateway::server::HttpServer::create_app(
            actix_web::web::Data::new($state),
        ))
        .await
    };
}
