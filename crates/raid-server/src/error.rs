//! Error types for the HTTP layer.
//!
//! [`ApiError`] converts into the `{ "ok": false, "error": ... }` body every
//! client expects for rejected input.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use raid_core::GameError;
use tracing::warn;

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request failed game validation.
    #[error(transparent)]
    Validation(#[from] GameError),

    /// The body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    Body(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        warn!(error = %message, "Request rejected");

        let body = serde_json::json!({
            "ok": false,
            "error": message,
        });

        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}
