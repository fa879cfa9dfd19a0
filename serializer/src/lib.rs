//! JSON transfer mapping for the `Todo` record.
//!
//! # Overview
//! Exposes the four record fields (`id`, `title`, `description`, `completed`)
//! to HTTP consumers and validates inbound payloads before they reach the
//! store. Stateless and free of I/O: every call touches only its arguments.
//!
//! # Design
//! - `to_json` / `to_json_list` for outbound records.
//! - `from_json` (create, full update) and `from_json_partial` (patch) for
//!   inbound payloads, returning `ValidationError` with per-field messages.
//! - Column constraints (is `description` required, title length) come from a
//!   `TodoSchema` owned by the persistence layer.

pub mod error;
pub mod mapping;
pub mod schema;
pub mod todo;

pub use error::{ValidationError, NON_FIELD_ERRORS};
pub use mapping::{from_json, from_json_partial, to_json, to_json_list};
pub use schema::{DescriptionPolicy, TodoSchema};
pub use todo::{Todo, TodoFields, TodoPatch};
