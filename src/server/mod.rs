//! HTTP server
//!
//! Actix-web application, shared state and route handlers.

pub mod builder;
mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;


pub use builder::{ConfigSource, load_config, run_server, run_with_config};
pub use server::HttpServer;
pub use state::AppState;
