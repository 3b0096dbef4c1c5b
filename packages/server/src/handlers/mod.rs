//! HTTP request handlers for all hypertodo endpoints.
//!
//! Handlers are async functions that receive Axum extractors and return
//! `Result<impl IntoResponse, AppError>`. Every response exposing a single
//! todo is built here, with a freshly resolved `operations` map.

pub mod root;
pub mod status;
pub mod todos;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use hypertodo_api::{Todo, TodoId, TodoView};

use crate::{
    error::AppError,
    hypermedia::{Bindings, Hypermedia},
    storage::TodoStore,
};

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub hypermedia: Hypermedia,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, hypermedia: Hypermedia) -> Self {
        Self { store, hypermedia }
    }

    /// Wrap a todo in a [`TodoView`] with operations resolved against `bindings`.
    pub(crate) fn todo_view(
        &self,
        id: TodoId,
        todo: Todo,
        bindings: &Bindings,
    ) -> Result<TodoView, AppError> {
        Ok(TodoView {
            todo_id: id,
            todo,
            operations: self.hypermedia.operations(id, bindings)?,
        })
    }
}

/// Parse a `{id}` path segment.
///
/// A segment that is not a valid id cannot name an existing todo, so it is
/// reported as not found rather than as a bad request.
pub(crate) fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("Todo {raw} doesn't exist")))
}

/// Unwrap a JSON body, reporting malformed input in the standard error format.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
