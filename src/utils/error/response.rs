//! HTTP response handling for errors

use super::types::GatewayError;
use crate::core::providers::ProviderError;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use tracing::{debug, error};

impl GatewayError {
    /// Status, machine-readable code and caller-facing message for this error
    ///
    /// Messages for server-side failures are fixed strings; provider and IO
    /// details stay in the logs.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            GatewayError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", self.to_string())
            }
            GatewayError::NoSpeechDetected => (
                StatusCode::BAD_REQUEST,
                "NO_SPEECH_DETECTED",
                self.to_string(),
            ),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            GatewayError::RangeNotSatisfiable { .. } => (
                StatusCode::RANGE_NOT_SATISFIABLE,
                "RANGE_NOT_SATISFIABLE",
                self.to_string(),
            ),
            GatewayError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                self.to_string(),
            ),
            GatewayError::UpstreamFormat(_) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_FORMAT_ERROR",
                self.to_string(),
            ),
            GatewayError::Provider(provider_error) => match provider_error {
                ProviderError::Timeout { provider, .. } => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "PROVIDER_TIMEOUT",
                    format!("{} did not respond in time", provider),
                ),
                ProviderError::RateLimit { provider, .. } => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "PROVIDER_RATE_LIMIT",
                    format!("{} rate limit exceeded", provider),
                ),
                other => (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    format!("{} request failed", other.provider()),
                ),
            },
            GatewayError::Timeout(_) => {
                (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", self.to_string())
            }
            GatewayError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "Gateway is misconfigured".to_string(),
            ),
            GatewayError::Serialization(_)
            | GatewayError::Yaml(_)
            | GatewayError::Io(_)
            | GatewayError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = self.parts();
        if self.is_client_error() {
            debug!(code = error_code, error = %self, "Rejected request");
        } else {
            error!(code = error_code, error = %self, "Request failed");
        }

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        };

        let mut builder = HttpResponse::build(status_code);
        if let GatewayError::RangeNotSatisfiable { size } = self {
            builder.insert_header((header::CONTENT_RANGE, format!("bytes */{}", size)));
        }
        builder.json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
