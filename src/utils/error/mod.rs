//! Error handling for the gateway
//!
//! `GatewayError` is the single error type returned by services and handlers.
//! Its `ResponseError` implementation is the only place where errors become
//! HTTP status codes.

#![allow(missing_docs)]

mod conversions;
mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
