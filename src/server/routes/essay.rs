//! Essay evaluation endpoints

use super::multipart::read_form;
use crate::core::essay::EssayImage;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use tracing::info;

/// `POST /api/py/evaluate`
///
/// Form fields `essay_text` and `file`. Any non-empty text wins over an
/// image, so whitespace-only text is rejected rather than ignored.
pub async fn evaluate(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
    let form = read_form(payload, state.form_limits()).await?;
    let essay_text = form.text("essay_text").filter(|text| !text.is_empty());
    let image = form.file(&["file"]).filter(|file| !file.bytes.is_empty());

    let evaluation = match (essay_text, image) {
        (Some(text), _) => state.essay.evaluate_text(text).await?,
        (None, Some(file)) => {
            let image = EssayImage::new(file.bytes.clone(), file.content_type.clone());
            state.essay.evaluate_image(image).await?
        }
        (None, None) => {
            return Err(GatewayError::bad_request(
                "Either text or an image file is required.",
            ));
        }
    };

    info!(
        overall_band = evaluation.score.overall_band,
        word_count = evaluation.word_count,
        "Essay evaluated"
    );
    Ok(HttpResponse::Ok().json(evaluation))
}

/// `POST /api/py/evaluate-multi`
///
/// Repeated `files` parts, pages of a single essay.
pub async fn evaluate_multi(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_form(payload, state.form_limits()).await?;
    let images: Vec<EssayImage> = form
        .files_named("files")
        .into_iter()
        .filter(|file| !file.bytes.is_empty())
        .map(|file| EssayImage::new(file.bytes.clone(), file.content_type.clone()))
        .collect();

    let evaluation = state.essay.evaluate_images(images).await?;
    Ok(HttpResponse::Ok().json(evaluation))
}
