//! Shared HTTP plumbing for provider clients

use super::error::ProviderError;
use crate::utils::logging::sanitize_for_logging;
use reqwest::{Response, StatusCode, header::RETRY_AFTER};
use std::time::Duration;

/// Maximum length of an upstream error body kept in an error message
const MAX_ERROR_BODY: usize = 512;

/// Build a reqwest client with the configured timeout
pub fn build_http_client(
    provider: &'static str,
    timeout: Duration,
) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("examiner-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::configuration(provider, e.to_string()))
}

/// Turn a non-success response into a `ProviderError`
///
/// Success responses are passed through untouched.
pub async fn check_status(
    provider: &'static str,
    response: Response,
) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let body = response.text().await.unwrap_or_default();
    let message = truncate(&sanitize_for_logging(&body), MAX_ERROR_BODY);

    Err(map_status(provider, status, message, retry_after))
}

fn map_status(
    provider: &'static str,
    status: StatusCode,
    message: String,
    retry_after: Option<u64>,
) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::authentication(provider, message),
        429 => ProviderError::rate_limit(provider, retry_after),
        408 | 504 => ProviderError::timeout(provider, message),
        400 | 404 | 413 | 415 | 422 => ProviderError::invalid_request(provider, message),
        code => ProviderError::api_error(provider, code, message),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
