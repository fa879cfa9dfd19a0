//! Synchronous API client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`.
//! - Records and payloads are the `todo_serializer` types, so client and
//!   server cannot drift apart on the wire shape.
//! - `normalize_todos` tolerates the list envelopes REST backends commonly
//!   wrap collections in.

pub mod client;
pub mod error;
pub mod http;

pub use client::{normalize_todos, TodoClient};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use todo_serializer::{Todo, TodoFields, TodoPatch, ValidationError};
