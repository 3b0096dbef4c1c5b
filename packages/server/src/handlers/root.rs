//! Resource discovery: `GET /`.

use axum::{extract::State, Json};
use hypertodo_api::{ResourceMap, TODOS_RESOURCE};

use super::AppState;

/// `GET /`
///
/// Returns the map of resource names to absolute base URLs. This is the only
/// URL a client needs to know in advance.
pub async fn resources(State(state): State<AppState>) -> Json<ResourceMap> {
    let mut resources = ResourceMap::new();
    resources.insert(TODOS_RESOURCE.to_string(), state.hypermedia.todos_url());
    Json(resources)
}
