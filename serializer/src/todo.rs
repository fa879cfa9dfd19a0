//! Todo record and the validated field sets that create or update it.
//!
//! # Design
//! `Todo` is the persisted shape and the only type that carries an `id`.
//! Inbound payloads never produce a `Todo` directly: they produce `TodoFields`
//! (create / full update) or `TodoPatch` (partial update), and the store folds
//! those into a record it already owns. That keeps the identifier out of
//! client hands.

use serde::{Deserialize, Serialize};

/// A single persisted todo item, in wire field order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl Todo {
    /// Builds a record from validated fields and a store-assigned id.
    pub fn new(id: u64, fields: TodoFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            completed: fields.completed,
        }
    }

    /// Overwrites every mutable field. The `id` is untouched.
    pub fn apply(&mut self, fields: TodoFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.completed = fields.completed;
    }

    /// Overwrites only the fields present in `patch`.
    pub fn apply_patch(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    /// The mutable part of this record, as a create/update payload would carry it.
    pub fn fields(&self) -> TodoFields {
        TodoFields {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
        }
    }
}

/// Validated values for creating a todo or replacing all of its fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoFields {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Validated values for a partial update. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        Todo {
            id: 7,
            title: "Walk dog".to_string(),
            description: "around the block".to_string(),
            completed: false,
        }
    }

    #[test]
    fn apply_replaces_fields_but_keeps_id() {
        let mut todo = sample();
        todo.apply(TodoFields {
            title: "Walk cat".to_string(),
            description: String::new(),
            completed: true,
        });
        assert_eq!(todo.id, 7);
        assert_eq!(todo.title, "Walk cat");
        assert_eq!(todo.description, "");
        assert!(todo.completed);
    }

    #[test]
    fn apply_patch_only_touches_present_fields() {
        let mut todo = sample();
        todo.apply_patch(TodoPatch {
            completed: Some(true),
            ..TodoPatch::default()
        });
        assert_eq!(todo.title, "Walk dog");
        assert_eq!(todo.description, "around the block");
        assert!(todo.completed);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut todo = sample();
        let patch = TodoPatch::default();
        assert!(patch.is_empty());
        todo.apply_patch(patch);
        assert_eq!(todo, sample());
    }

    #[test]
    fn patch_omits_absent_fields_when_serialized() {
        let patch = TodoPatch {
            title: Some("New title".to_string()),
            ..TodoPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["title"], "New title");
        assert!(json.get("description").is_none());
        assert!(json.get("completed").is_none());
    }

    #[test]
    fn fields_roundtrip_through_new() {
        let todo = sample();
        assert_eq!(Todo::new(todo.id, todo.fields()), todo);
    }
}
