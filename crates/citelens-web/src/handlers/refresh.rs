//! Cron-triggered refresh endpoint.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::error;

use citelens_ingestion::pipeline::{refresh_timestamp, run_refresh};

use crate::state::SharedState;

/// GET /api/refresh
///
/// Guarded by a bearer-token match against the configured cron secret;
/// with no secret configured (development) the endpoint is open.
pub async fn refresh(State(state): State<SharedState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(secret) = &state.config.cron_secret {
        let expected = format!("Bearer {secret}");
        let provided = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })))
                .into_response();
        }
    }

    let scraper_config = state.scraper_config();
    match run_refresh(state.fetcher.as_ref(), &scraper_config, state.storage.as_ref()).await {
        Ok(summary) => Json(json!({
            "success": true,
            "stats": summary.stats,
            "message": summary.message,
            "timestamp": refresh_timestamp(),
        }))
        .into_response(),
        Err(e) => {
            error!(error = %e, "Refresh failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to refresh profile data",
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
