//! `hypertodo-server`: hypermedia-driven todo list server.
//!
//! # Quick start
//!
//! ```sh
//! # Seeded in-memory server on 127.0.0.1:5000:
//! hypertodo-server
//!
//! # Empty store, custom bind address, links advertised on a public host:
//! HYPERTODO_SEED=false HYPERTODO_BIND=0.0.0.0:8080 \
//!   HYPERTODO_PUBLIC_URL=https://todos.example.com hypertodo-server
//! ```
//!
//! # Environment variables
//!
//! See [`ServerConfig::from_env`] for the full list.

use std::sync::Arc;

use hypertodo_server::{build_router, MemoryStore, ServerConfig, TodoStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hypertodo_server=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("invalid configuration: {e}");
        std::process::exit(2);
    });

    let store: Arc<dyn TodoStore> = if config.seed {
        tracing::info!("storage: in-memory, seeded with demo todos");
        Arc::new(MemoryStore::seeded())
    } else {
        tracing::info!("storage: in-memory, empty");
        Arc::new(MemoryStore::new())
    };

    let app = build_router(store, &config);

    tracing::info!("listening on {} (public url {})", config.bind_addr, config.public_url);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    axum::serve(listener, app)
        .await
        .expect("server error");
}
