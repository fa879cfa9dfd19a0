//! Conversion between `Todo` records and their JSON wire form.
//!
//! # Design
//! Outbound is a straight serde derive: four keys, values verbatim.
//!
//! Inbound goes through `serde_json::Value` rather than a derived
//! `Deserialize` so that every field can be checked independently and all
//! failures reported together with a message per field. Keys outside the
//! record (including the read-only `id`) are ignored. Text fields are
//! trimmed before any check and stored trimmed.

use serde_json::{Map, Value};

use crate::error::{
    ValidationError, BLANK, INVALID_BOOLEAN, INVALID_STRING, NON_FIELD_ERRORS, NOT_NULL, REQUIRED,
};
use crate::schema::{DescriptionPolicy, TodoSchema};
use crate::todo::{Todo, TodoFields, TodoPatch};

/// JSON object for one record: `id`, `title`, `description`, `completed`.
pub fn to_json(todo: &Todo) -> Value {
    serde_json::json!({
        "id": todo.id,
        "title": todo.title,
        "description": todo.description,
        "completed": todo.completed,
    })
}

/// JSON array of records, in the order given.
pub fn to_json_list(todos: &[Todo]) -> Value {
    Value::Array(todos.iter().map(to_json).collect())
}

/// Validates a create / full-update payload.
///
/// `title` is required. `description` follows `schema.description`.
/// `completed` defaults to `false`.
pub fn from_json(payload: &Value, schema: &TodoSchema) -> Result<TodoFields, ValidationError> {
    let object = expect_object(payload)?;
    let mut errors = ValidationError::new();

    let title = match object.get("title") {
        None => {
            errors.add("title", REQUIRED);
            None
        }
        Some(value) => read_title(value, schema, &mut errors),
    };

    let description = match (object.get("description"), &schema.description) {
        (Some(value), _) => read_string("description", value, &mut errors),
        (None, DescriptionPolicy::Optional { default }) => Some(default.clone()),
        (None, DescriptionPolicy::Required) => {
            errors.add("description", REQUIRED);
            None
        }
    };

    let completed = match object.get("completed") {
        None => Some(false),
        Some(value) => read_bool("completed", value, &mut errors),
    };

    match (title, description, completed) {
        (Some(title), Some(description), Some(completed)) if errors.is_empty() => Ok(TodoFields {
            title,
            description,
            completed,
        }),
        _ => Err(rejected(errors)),
    }
}

/// Validates a partial-update payload. Absent keys stay `None`.
pub fn from_json_partial(
    payload: &Value,
    schema: &TodoSchema,
) -> Result<TodoPatch, ValidationError> {
    let object = expect_object(payload)?;
    let mut errors = ValidationError::new();

    let patch = TodoPatch {
        title: object
            .get("title")
            .and_then(|value| read_title(value, schema, &mut errors)),
        description: object
            .get("description")
            .and_then(|value| read_string("description", value, &mut errors)),
        completed: object
            .get("completed")
            .and_then(|value| read_bool("completed", value, &mut errors)),
    };

    errors.into_result(patch).map_err(rejected)
}

fn expect_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload.as_object().ok_or_else(|| {
        rejected(ValidationError::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                kind_name(payload)
            ),
        ))
    })
}

fn read_title(value: &Value, schema: &TodoSchema, errors: &mut ValidationError) -> Option<String> {
    let title = read_string("title", value, errors)?;
    if !schema.allow_blank_title && title.is_empty() {
        errors.add("title", BLANK);
        return None;
    }
    if let Some(max) = schema.title_max_length {
        if title.chars().count() > max {
            errors.add(
                "title",
                format!("Ensure this field has no more than {max} characters."),
            );
            return None;
        }
    }
    Some(title)
}

fn read_string(field: &str, value: &Value, errors: &mut ValidationError) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Null => {
            errors.add(field, NOT_NULL);
            None
        }
        _ => {
            errors.add(field, INVALID_STRING);
            None
        }
    }
}

fn read_bool(field: &str, value: &Value, errors: &mut ValidationError) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Null => {
            errors.add(field, NOT_NULL);
            None
        }
        _ => {
            errors.add(field, INVALID_BOOLEAN);
            None
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn rejected(errors: ValidationError) -> ValidationError {
    tracing::debug!(fields = ?errors.field_names().collect::<Vec<_>>(), "rejected todo payload");
    errors
}
