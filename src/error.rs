//! Gateway error type with HTTP status code mapping.
//!
//! [`GatewayError`] is what every service operation returns. At the HTTP
//! boundary it is turned into the failure envelope: status 500 unless the
//! error carries its own status, and a `{"message": ...}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::envelope::ResponseEnvelope;
use crate::chain::ReadError;
use crate::domain::ValuationError;

/// JSON body of every failure response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Display form of the error.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A batched on-chain read failed or could not be decoded.
    #[error("read failure: {0}")]
    Read(#[from] ReadError),

    /// On-chain values could not be valued exactly.
    #[error("valuation failure: {0}")]
    Valuation(#[from] ValuationError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the HTTP status code for this error.
    ///
    /// Errors that already carry an upstream HTTP status pass it through;
    /// everything else is a 500.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Read(err) => err
                .upstream_status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Valuation(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        ResponseEnvelope::failure(&self).into_response()
    }
}
