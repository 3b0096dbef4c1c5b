//! Shared helpers for the hypertodo conformance test suite.
//!
//! Provides [`spawn_server`]: a function that binds a `TcpListener` on an
//! ephemeral port, wires up an in-process server backed by `MemoryStore`,
//! and returns both the root URL and a reference to the underlying store so
//! tests can inspect or seed data without going through the HTTP layer.

use std::sync::Arc;

use hypertodo_server::{build_router, MemoryStore, ServerConfig, TodoStore};

/// Start an ephemeral in-process server and return `(root_url, store)`.
///
/// The server runs in a background `tokio` task bound to an OS-assigned port
/// on `127.0.0.1`. The returned `String` is the root URL, e.g.
/// `http://127.0.0.1:51234`. With `seed` set, the store starts with the
/// three demo todos (`todo1`–`todo3`).
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound or the server fails to start.
pub async fn spawn_server(seed: bool) -> (String, Arc<MemoryStore>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    let root_url = format!("http://{addr}");

    let mem_store = Arc::new(if seed {
        MemoryStore::seeded()
    } else {
        MemoryStore::new()
    });
    let store: Arc<dyn TodoStore> = Arc::clone(&mem_store) as Arc<dyn TodoStore>;

    let config = ServerConfig::new(addr, root_url.clone(), seed);
    let router = build_router(store, &config);

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance server error");
    });

    (root_url, mem_store)
}
