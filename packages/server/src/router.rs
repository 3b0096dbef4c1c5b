//! Assembles the Axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    handlers::{root, status, todos, AppState},
    hypermedia::Hypermedia,
    storage::TodoStore,
};

/// Build the complete application router with shared state.
///
/// Every link the server hands out is rooted at `config.public_url`.
pub fn build_router(store: Arc<dyn TodoStore>, config: &ServerConfig) -> Router {
    let state = AppState::new(store, Hypermedia::new(&config.public_url));

    Router::new()
        // Discovery
        .route("/", get(root::resources))
        // Todos
        .route("/todos", get(todos::list).post(todos::create))
        .route(
            "/todos/{id}",
            get(todos::get_todo).put(todos::replace).delete(todos::delete),
        )
        .route(
            "/todos/{id}/status",
            get(status::get_status).put(status::update_status),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::storage::memory::MemoryStore;

    #[tokio::test]
    async fn root_lists_resources() {
        let config = ServerConfig::new("0.0.0.0:8080".parse().unwrap(), "https://todos.example.com/", false);
        let app = build_router(Arc::new(MemoryStore::new()), &config);

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "todos": "https://todos.example.com/todos" }));
    }

    #[tokio::test]
    async fn unsupported_method_is_405() {
        let config = ServerConfig::new("127.0.0.1:5000".parse().unwrap(), "http://localhost:5000", true);
        let app = build_router(Arc::new(MemoryStore::seeded()), &config);

        let req = Request::builder()
            .method("POST")
            .uri("/todos/todo1")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
