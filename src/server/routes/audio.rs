//! Synthesized audio retrieval

use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::body::SizedStream;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use bytes::Bytes;
use futures::Stream;
use tracing::debug;

/// Inclusive byte range within a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Parse a single-range `Range` header against a resource of `size` bytes
///
/// Returns `None` when the header is malformed, names several ranges or
/// cannot be satisfied.
pub(crate) fn parse_range(value: &str, size: u64) -> Option<ByteRange> {
    let spec = value.trim().strip_prefix("bytes=")?.trim();
    if size == 0 || spec.contains(',') {
        return None;
    }

    let (start, end) = spec.split_once('-')?;
    let (start, end) = (start.trim(), end.trim());

    match (start.is_empty(), end.is_empty()) {
        // bytes=-n: final n bytes
        (true, false) => {
            let suffix: u64 = end.parse().ok()?;
            if suffix == 0 {
                return None;
            }
            Some(ByteRange {
                start: size.saturating_sub(suffix),
                end: size - 1,
            })
        }
        (false, true) => {
            let start: u64 = start.parse().ok()?;
            (start < size).then_some(ByteRange {
                start,
                end: size - 1,
            })
        }
        (false, false) => {
            let start: u64 = start.parse().ok()?;
            let end: u64 = end.parse().ok()?;
            (start <= end && start < size).then_some(ByteRange {
                start,
                end: end.min(size - 1),
            })
        }
        (true, true) => None,
    }
}

fn chunked(bytes: Bytes, chunk_size: usize) -> impl Stream<Item = std::io::Result<Bytes>> {
    let chunk_size = chunk_size.max(1);
    async_stream::stream! {
        let mut offset = 0;
        while offset < bytes.len() {
            let end = (offset + chunk_size).min(bytes.len());
            yield Ok(bytes.slice(offset..end));
            offset = end;
        }
    }
}

/// `GET /api/py/audio/{audio_id}`
pub async fn get_audio(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let audio_id = path.into_inner();
    let clip = state
        .audio_store
        .get(&audio_id)
        .ok_or_else(|| GatewayError::not_found("Audio file not found"))?;

    let size = clip.len() as u64;
    let chunk_size = state.config.audio_store().chunk_size;

    let range = match req.headers().get(header::RANGE) {
        Some(value) => {
            let value = value
                .to_str()
                .map_err(|_| GatewayError::RangeNotSatisfiable { size })?;
            Some(parse_range(value, size).ok_or(GatewayError::RangeNotSatisfiable { size })?)
        }
        None => None,
    };

    let mut response = match range {
        Some(range) => {
            debug!(audio_id = %audio_id, start = range.start, end = range.end, "Serving audio range");
            let body = clip
                .bytes
                .slice(range.start as usize..=range.end as usize);
            let mut builder = HttpResponse::PartialContent();
            builder.insert_header((
                header::CONTENT_RANGE,
                format!("bytes {}-{}/{}", range.start, range.end, size),
            ));
            builder.body(SizedStream::new(range.len(), Box::pin(chunked(body, chunk_size))))
        }
        None => {
            debug!(audio_id = %audio_id, bytes = size, "Serving audio");
            HttpResponse::Ok().body(SizedStream::new(
                size,
                Box::pin(chunked(clip.bytes.clone(), chunk_size)),
            ))
        }
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCEPT_RANGES, header::HeaderValue::from_static("bytes"));
    if let Ok(content_type) = header::HeaderValue::from_str(&clip.content_type) {
        headers.insert(header::CONTENT_TYPE, content_type);
    }

    Ok(response)
}
