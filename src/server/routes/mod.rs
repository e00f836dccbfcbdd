//! HTTP route modules
//!
//! Everything the web client calls lives under `/api/py`.

pub mod audio;
pub mod essay;
pub mod multipart;
pub mod speech;

use crate::server::handlers;
use actix_web::web;

/// Mount the `/api/py` scope
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/py")
            .route("/helloFastApi", web::get().to(handlers::hello))
            .route("/evaluate", web::post().to(essay::evaluate))
            .route("/evaluate-multi", web::post().to(essay::evaluate_multi))
            .route("/process-audio", web::post().to(speech::process_audio))
            .route("/transcribe", web::post().to(speech::transcribe))
            .route("/text-to-speech", web::post().to(speech::text_to_speech))
            .route("/audio/{audio_id}", web::get().to(audio::get_audio)),
    );
}
