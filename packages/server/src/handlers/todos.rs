//! Todo collection and item handlers.
//!
//! - `GET    /todos`: every todo keyed by id.
//! - `POST   /todos`: create a todo from `{task}`.
//! - `GET    /todos/{id}`: one todo plus its operations.
//! - `PUT    /todos/{id}`: replace a todo with `{task}`; the status is dropped.
//! - `DELETE /todos/{id}`: remove a todo.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use hypertodo_api::{TaskRequest, TodoList, TodoView};

use crate::{error::AppError, hypermedia::Bindings};

use super::{json_body, parse_id, AppState};

/// `GET /todos`: return all todos keyed by id.
pub async fn list(State(state): State<AppState>) -> Result<Json<TodoList>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// `POST /todos`: create a todo with no status.
///
/// Returns 201 with the new todo and its operations.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = json_body(body)?;
    let (id, todo) = state.store.create(&req.task).await?;
    tracing::info!(todo_id = %id, "created todo");

    let view = state.todo_view(id, todo, &Bindings::new())?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /todos/{id}`: one todo with its operations. 404 if absent.
pub async fn get_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TodoView>, AppError> {
    let id = parse_id(&raw_id)?;
    let todo = state.store.get(id).await?;
    Ok(Json(state.todo_view(id, todo, &Bindings::new())?))
}

/// `PUT /todos/{id}`: replace the todo with `{task}`.
///
/// The stored record keeps only the new task; any status is discarded.
/// Returns 201 with the replaced todo, or 404 if the id is unknown.
pub async fn replace(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;
    let req = json_body(body)?;
    let todo = state.store.update_task(id, &req.task).await?;
    tracing::info!(todo_id = %id, "replaced todo task");

    let bindings = Bindings::from([("task".to_string(), req.task)]);
    let view = state.todo_view(id, todo, &bindings)?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `DELETE /todos/{id}`: 204 on success, 404 if absent.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw_id)?;
    state.store.delete(id).await?;
    tracing::info!(todo_id = %id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
