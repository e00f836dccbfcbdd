//! Liveness handlers

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Health check endpoint handler
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": crate::VERSION,
        "git_hash": crate::build_info().git_hash,
        "audio_store": state.audio_store.stats(),
    }))
}

/// Fixed greeting the web client pings on load
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Hello from FastAPI" }))
}
