//! REST endpoints for todo records.
//!
//! # Overview
//! Routes follow REST framework router conventions with trailing slashes:
//! `/api/todos/` for the collection and `/api/todos/{id}/` for one record.
//! Request bodies pass through `todo_serializer` before reaching the store,
//! and every record leaves through `todo_serializer::to_json`.

pub mod config;
pub mod error;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::{CorsConfig, ServerConfig};
pub use error::HttpError;
pub use store::TodoStore;

pub type Db = Arc<TodoStore>;

/// Router with default configuration and an empty store.
pub fn app() -> Router {
    build_app(&ServerConfig::default())
}

pub fn build_app(config: &ServerConfig) -> Router {
    let db: Db = Arc::new(TodoStore::new(config.schema.clone()));
    Router::new()
        .route("/api/todos/", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}/",
            get(get_todo)
                .put(update_todo)
                .patch(patch_todo)
                .delete(delete_todo),
        )
        .with_state(db)
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, build_app(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match config {
        CorsConfig::AllowAll => layer.allow_origin(Any),
        CorsConfig::AllowOrigins(origins) => match origin_list(origins) {
            Some(allowed) => layer.allow_origin(allowed),
            None => layer.allow_origin(Any),
        },
    }
}

/// Parsed origin headers, or `None` when any entry is the `*` wildcard.
fn origin_list(origins: &[String]) -> Option<Vec<HeaderValue>> {
    if origins.iter().any(|origin| origin.trim() == "*") {
        return None;
    }
    let allowed = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    Some(allowed)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn list_todos(State(db): State<Db>) -> Json<Value> {
    Json(todo_serializer::to_json_list(&db.list().await))
}

async fn create_todo(
    State(db): State<Db>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), HttpError> {
    let fields = todo_serializer::from_json(&payload, db.schema())?;
    let todo = db.insert(fields).await;
    tracing::info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo_serializer::to_json(&todo))))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Value>, HttpError> {
    let todo = db.get(id).await.ok_or(HttpError::NotFound(id))?;
    Ok(Json(todo_serializer::to_json(&todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, HttpError> {
    if db.get(id).await.is_none() {
        return Err(HttpError::NotFound(id));
    }
    let fields = todo_serializer::from_json(&payload, db.schema())?;
    let todo = db.replace(id, fields).await.ok_or(HttpError::NotFound(id))?;
    tracing::info!(id, "updated todo");
    Ok(Json(todo_serializer::to_json(&todo)))
}

async fn patch_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, HttpError> {
    if db.get(id).await.is_none() {
        return Err(HttpError::NotFound(id));
    }
    let patch = todo_serializer::from_json_partial(&payload, db.schema())?;
    let todo = db.patch(id, patch).await.ok_or(HttpError::NotFound(id))?;
    tracing::info!(id, "patched todo");
    Ok(Json(todo_serializer::to_json(&todo)))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, HttpError> {
    db.remove(id).await.ok_or(HttpError::NotFound(id))?;
    tracing::info!(id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
