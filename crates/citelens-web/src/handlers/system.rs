//! Operational endpoints.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use citelens_storage::keys;

use crate::state::SharedState;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/status — active storage backend and data freshness.
pub async fn status(State(state): State<SharedState>) -> Json<Value> {
    let available = state.storage.available().await;
    let last_updated = state
        .storage
        .get(keys::LAST_UPDATED)
        .await
        .ok()
        .flatten()
        .and_then(|v| v.as_str().map(str::to_string));

    Json(json!({
        "storage": state.storage.name(),
        "available": available,
        "lastUpdated": last_updated,
    }))
}
