//! In-memory persistence for todo records.
//!
//! # Design
//! The store assigns identifiers: ids start at 1, increase monotonically and
//! are never reused after a delete. Records live in a `BTreeMap` so listing
//! comes out ordered by id without a sort.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use todo_serializer::{Todo, TodoFields, TodoPatch, TodoSchema};

#[derive(Debug, Default)]
struct Inner {
    todos: BTreeMap<u64, Todo>,
    last_id: u64,
}

#[derive(Debug, Default)]
pub struct TodoStore {
    schema: TodoSchema,
    inner: RwLock<Inner>,
}

impl TodoStore {
    pub fn new(schema: TodoSchema) -> Self {
        Self {
            schema,
            inner: RwLock::default(),
        }
    }

    /// Column constraints inbound payloads are validated against.
    pub fn schema(&self) -> &TodoSchema {
        &self.schema
    }

    pub async fn list(&self) -> Vec<Todo> {
        self.inner.read().await.todos.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Option<Todo> {
        self.inner.read().await.todos.get(&id).cloned()
    }

    pub async fn insert(&self, fields: TodoFields) -> Todo {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let todo = Todo::new(inner.last_id, fields);
        inner.todos.insert(todo.id, todo.clone());
        todo
    }

    /// Replaces every mutable field. `None` if `id` is unknown.
    pub async fn replace(&self, id: u64, fields: TodoFields) -> Option<Todo> {
        let mut inner = self.inner.write().await;
        let todo = inner.todos.get_mut(&id)?;
        todo.apply(fields);
        Some(todo.clone())
    }

    pub async fn patch(&self, id: u64, patch: TodoPatch) -> Option<Todo> {
        let mut inner = self.inner.write().await;
        let todo = inner.todos.get_mut(&id)?;
        todo.apply_patch(patch);
        Some(todo.clone())
    }

    pub async fn remove(&self, id: u64) -> Option<Todo> {
        self.inner.write().await.todos.remove(&id)
    }
}
