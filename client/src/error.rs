//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because callers act on
//! them: a missing record and a rejected form are both user-facing. All
//! other non-2xx responses land in `Http` with the raw status and body.

use thiserror::Error;
use todo_serializer::ValidationError;

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 with per-field messages.
    #[error(transparent)]
    Validation(ValidationError),

    /// The server returned a non-2xx status not covered above.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The server answered with an HTML page instead of JSON, usually a
    /// frontend dev server behind a misconfigured base URL.
    #[error("API returned HTML; check the base URL")]
    UnexpectedHtml,

    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
