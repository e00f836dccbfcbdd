//! Type conversions for GatewayError

use super::types::GatewayError;
use crate::core::providers::ProviderError;
use tracing::warn;

impl From<ProviderError> for GatewayError {
    fn from(err: ProviderError) -> Self {
        match err {
            // The detail may quote model output or decoder internals; it is logged only.
            ProviderError::ResponseParsing { provider, message } => {
                warn!(provider, detail = %message, "Provider reply could not be used");
                GatewayError::UpstreamFormat(format!("{} returned an unusable reply", provider))
            }
            ProviderError::Configuration { message, .. } => GatewayError::Config(message),
            other => GatewayError::Provider(other),
        }
    }
}

impl From<actix_multipart::MultipartError> for GatewayError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        GatewayError::BadRequest(format!("Invalid multipart data: {}", err))
    }
}
