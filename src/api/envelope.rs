//! Transport-neutral response envelope.
//!
//! Every response carries permissive CORS headers. Success bodies are
//! either a raw string or serialized JSON; failures carry a
//! `{"message": ...}` JSON body.

use std::collections::BTreeMap;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::{ErrorResponse, GatewayError};

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sent as-is.
    Text(String),
    /// Serialized with `serde_json`.
    Json(serde_json::Value),
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// Status, headers and body of a gateway response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers; always includes the CORS headers.
    pub headers: BTreeMap<String, String>,
    /// Serialized body.
    pub body: String,
}

impl ResponseEnvelope {
    /// Builds an envelope with the CORS headers merged with `extra`.
    #[must_use]
    pub fn build(status_code: u16, body: String, extra: BTreeMap<String, String>) -> Self {
        let mut headers = BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Credentials".to_string(),
                "true".to_string(),
            ),
        ]);
        headers.extend(extra);
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// 200 response with `payload` as the body.
    #[must_use]
    pub fn success(payload: impl Into<Payload>) -> Self {
        let body = match payload.into() {
            Payload::Text(text) => text,
            Payload::Json(value) => value.to_string(),
        };
        Self::build(StatusCode::OK.as_u16(), body, BTreeMap::new())
    }

    /// 200 response with `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if `value` cannot be serialized.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(value)
            .map_err(|e| GatewayError::Internal(format!("response serialization: {e}")))?;
        Ok(Self::success(value))
    }

    /// Failure response for `error`, logged at the boundary.
    #[must_use]
    pub fn failure(error: &GatewayError) -> Self {
        let status = error.status_code();
        let body = ErrorResponse {
            message: error.to_string(),
        };
        tracing::error!(status = status.as_u16(), error = %body.message, "request failed");
        let body = serde_json::to_string(&body)
            .unwrap_or_else(|_| String::from(r#"{"message":"internal error"}"#));
        Self::build(status.as_u16(), body, BTreeMap::new())
    }

    /// Adds a `Cache-Control: max-age=<secs>` header.
    #[must_use]
    pub fn with_max_age(mut self, secs: u64) -> Self {
        self.headers
            .insert("Cache-Control".to_string(), format!("max-age={secs}"));
        self
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        for (name, value) in self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "dropping invalid response header"),
            }
        }
        response
    }
}
