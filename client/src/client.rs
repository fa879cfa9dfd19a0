//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming the `HttpResponse`, so the caller owns the network round-trip.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use todo_serializer::{Todo, TodoFields, TodoPatch, ValidationError};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    /// `base_url` is the server root, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection(&self) -> String {
        format!("{}/api/todos/", self.base_url)
    }

    fn item(&self, id: u64) -> String {
        format!("{}/api/todos/{id}/", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        bare(HttpMethod::Get, self.collection())
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        bare(HttpMethod::Get, self.item(id))
    }

    pub fn build_create_todo(&self, input: &TodoFields) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.collection(), input)
    }

    /// Full replacement (PUT). Every field is sent.
    pub fn build_update_todo(&self, id: u64, input: &TodoFields) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, self.item(id), input)
    }

    /// Partial update (PATCH). Only the fields set in `input` are sent.
    pub fn build_patch_todo(&self, id: u64, input: &TodoPatch) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Patch, self.item(id), input)
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        bare(HttpMethod::Delete, self.item(id))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        reject_html(&response)?;
        normalize_todos(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        parse_todo(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        parse_todo(&response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        parse_todo(&response)
    }

    pub fn parse_patch_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        self.parse_update_todo(response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }
}

/// Extracts records from a list response body.
///
/// Accepts a bare array, a paginated `{"results": [...]}` envelope, an
/// `{"items": [...]}` envelope, or an object whose values are all records.
/// Any other JSON shape yields an empty list. A body that is not JSON and
/// contains an HTML doctype is `UnexpectedHtml`.
pub fn normalize_todos(body: &str) -> Result<Vec<Todo>, ApiError> {
    let payload: Value = decode(body)?;

    let records = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match ["results", "items"]
            .into_iter()
            .find(|key| map.get(*key).is_some_and(Value::is_array))
        {
            Some(key) => match map.remove(key) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            None if map.values().all(Value::is_object) => map.into_iter().map(|(_, v)| v).collect(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    };

    records
        .into_iter()
        .map(|record| serde_json::from_value(record).map_err(ApiError::Deserialization))
        .collect()
}

/// Parses `body` as JSON. A non-JSON body mentioning an HTML doctype
/// anywhere is reported as `UnexpectedHtml`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| {
        if body.to_ascii_lowercase().contains("<!doctype html") {
            ApiError::UnexpectedHtml
        } else {
            ApiError::Deserialization(err)
        }
    })
}

fn reject_html(response: &HttpResponse) -> Result<(), ApiError> {
    let is_html = response
        .header("content-type")
        .is_some_and(|value| value.trim_start().to_ascii_lowercase().starts_with("text/html"));
    if is_html {
        return Err(ApiError::UnexpectedHtml);
    }
    Ok(())
}

fn parse_todo(response: &HttpResponse) -> Result<Todo, ApiError> {
    reject_html(response)?;
    decode(&response.body)
}

fn bare(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: vec![("accept".to_string(), "application/json".to_string())],
        body: None,
    }
}

fn with_json<T: Serialize>(method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
    let mut request = bare(method, path);
    request
        .headers
        .push(("content-type".to_string(), "application/json".to_string()));
    request.body = Some(body);
    Ok(request)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    if response.status == 400 {
        if let Ok(errors) = serde_json::from_str::<ValidationError>(&response.body) {
            return Err(ApiError::Validation(errors));
        }
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
