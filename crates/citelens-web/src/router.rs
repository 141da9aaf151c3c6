//! Axum router — maps all URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    chat::chat,
    embeddings::embeddings,
    graph::citation_graph,
    papers::papers,
    refresh::refresh,
    system::{health, status},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Read endpoints — always resolve to some data (live or stub)
        .route("/api/data/papers",         get(papers))
        .route("/api/data/citation-graph", get(citation_graph))
        .route("/api/data/embeddings",     get(embeddings))

        // Cron-triggered write endpoint
        .route("/api/refresh", get(refresh))

        // Retrieval-augmented chat
        .route("/api/chat", post(chat))

        // Operational
        .route("/health",     get(health))
        .route("/api/status", get(status))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
