//! Status handlers.
//!
//! - `GET /todos/{id}/status`: the status alone, with operations.
//! - `PUT /todos/{id}/status`: set the status from `{status}`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use hypertodo_api::{StatusRequest, StatusView};

use crate::{error::AppError, hypermedia::Bindings};

use super::{json_body, parse_id, AppState};

/// `GET /todos/{id}/status`: 404 if absent.
pub async fn get_status(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<StatusView>, AppError> {
    let id = parse_id(&raw_id)?;
    let todo = state.store.get(id).await?;
    Ok(Json(StatusView {
        todo_id: id,
        status: todo.status,
        operations: state.hypermedia.operations(id, &Bindings::new())?,
    }))
}

/// `PUT /todos/{id}/status`: set the status label.
///
/// Any string is accepted. Returns 201 with the updated todo and fresh
/// operations, or 404 if the id is unknown.
pub async fn update_status(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;
    let req = json_body(body)?;
    let todo = state.store.update_status(id, &req.status).await?;
    tracing::info!(todo_id = %id, status = %req.status, "updated todo status");

    let bindings = Bindings::from([("status".to_string(), req.status)]);
    let view = state.todo_view(id, todo, &bindings)?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::router::build_router;
    use crate::storage::{memory::MemoryStore, TodoStore};

    fn build_app() -> axum::Router {
        let store: Arc<dyn TodoStore> = Arc::new(MemoryStore::seeded());
        let config = ServerConfig::new("127.0.0.1:0".parse().unwrap(), "http://todo.test", true);
        build_router(store, &config)
    }

    async fn read_json(resp: axum::response::Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn get_status_returns_id_status_and_operations() {
        let app = build_app();
        let req = Request::builder()
            .uri("/todos/todo2/status")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_json(resp).await;
        assert_eq!(body["todo_id"], "todo2");
        assert_eq!(body["status"], "working");
        assert_eq!(
            body["operations"]["work-todo"]["url"],
            "http://todo.test/todos/todo2/status"
        );
    }

    #[tokio::test]
    async fn get_status_unknown_is_404() {
        let app = build_app();
        let req = Request::builder()
            .uri("/todos/todo40/status")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn put_status_updates_and_returns_201() {
        let app = build_app();
        let req = Request::builder()
            .method("PUT")
            .uri("/todos/todo3/status")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "status": "complete" }).to_string()))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = read_json(resp).await;
        assert_eq!(body["todo_id"], "todo3");
        assert_eq!(body["task"], "profit!");
        assert_eq!(body["status"], "complete");
        // The fixed payloads are unaffected by the status just supplied.
        assert_eq!(
            body["operations"]["work-todo"]["data-fixed"],
            json!({ "status": "working" })
        );

        let req = Request::builder()
            .uri("/todos/todo3/status")
            .body(Body::empty())
            .unwrap();
        let body = read_json(app.oneshot(req).await.unwrap()).await;
        assert_eq!(body["status"], "complete");
    }

    #[tokio::test]
    async fn put_status_unknown_is_404() {
        let app = build_app();
        let req = Request::builder()
            .method("PUT")
            .uri("/todos/todo12/status")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "status": "complete" }).to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn status_after_replace_is_null() {
        let app = build_app();
        let req = Request::builder()
            .method("PUT")
            .uri("/todos/todo1")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "task": "again" }).to_string()))
            .unwrap();
        app.clone().oneshot(req).await.unwrap();

        let req = Request::builder()
            .uri("/todos/todo1/status")
            .body(Body::empty())
            .unwrap();
        let body = read_json(app.oneshot(req).await.unwrap()).await;
        assert_eq!(body["status"], Value::Null);
    }
}
