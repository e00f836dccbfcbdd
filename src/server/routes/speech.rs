//! Speech translation endpoints

use super::multipart::{FormData, read_form};
use crate::core::speech::{AudioUpload, TextToSpeechRequest};
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};

/// Browsers post recordings as `audio`, other clients as `file`
const AUDIO_FIELDS: &[&str] = &["file", "audio"];

fn audio_upload(form: &FormData) -> Result<AudioUpload> {
    form.file(AUDIO_FIELDS)
        .filter(|file| !file.bytes.is_empty())
        .map(|file| {
            AudioUpload::new(
                file.bytes.clone(),
                file.filename.clone(),
                file.content_type.clone(),
            )
        })
        .ok_or_else(|| GatewayError::bad_request("No audio file provided"))
}

/// `POST /api/py/process-audio`
pub async fn process_audio(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
    let form = read_form(payload, state.form_limits()).await?;
    let upload = audio_upload(&form)?;

    let processed = state.speech.process_audio(upload).await?;
    Ok(HttpResponse::Ok().json(processed))
}

/// `POST /api/py/transcribe`
pub async fn transcribe(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
    let form = read_form(payload, state.form_limits()).await?;
    let upload = audio_upload(&form)?;

    let result = state.speech.transcribe_and_translate(upload).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// `POST /api/py/text-to-speech`
pub async fn text_to_speech(
    state: web::Data<AppState>,
    body: web::Json<TextToSpeechRequest>,
) -> Result<HttpResponse> {
    let stored = state.speech.text_to_speech(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(stored))
}
