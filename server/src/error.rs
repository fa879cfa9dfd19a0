//! HTTP error type and its response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use todo_serializer::ValidationError;

#[derive(Debug, Error)]
pub enum HttpError {
    /// Inbound payload failed validation. Body is the per-field message map.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("todo {0} not found")]
    NotFound(u64),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request rejected");
        match self {
            HttpError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            HttpError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "detail": "Not found." })),
            )
                .into_response(),
        }
    }
}
