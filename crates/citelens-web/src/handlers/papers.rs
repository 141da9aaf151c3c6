//! Papers read endpoint: live artifacts when coherent, stub otherwise.

use axum::{extract::State, Json};
use tracing::warn;

use citelens_common::models::{DataStats, Paper, PapersResponse};
use citelens_storage::{get_envelope, keys, Envelope, StorageBackend};

use crate::state::SharedState;
use crate::stub;

/// GET /api/data/papers
pub async fn papers(State(state): State<SharedState>) -> Json<PapersResponse> {
    match load_papers_response(state.storage.as_ref()).await {
        Some(resp) => Json(resp),
        None => Json(stub::stub_papers()),
    }
}

/// Load papers + stats from storage, rejecting a mixed-generation pair.
/// Any storage error or shape mismatch reads as "absent".
pub async fn load_papers_response(storage: &dyn StorageBackend) -> Option<PapersResponse> {
    let papers: Envelope<Vec<Paper>> = get_envelope(storage, keys::PAPERS).await.ok()??;
    let stats: Envelope<DataStats> = get_envelope(storage, keys::STATS).await.ok()??;

    if papers.generation != stats.generation {
        warn!(
            papers_generation = %papers.generation,
            stats_generation = %stats.generation,
            "Mixed-generation artifacts, serving stub data"
        );
        return None;
    }

    Some(PapersResponse { papers: papers.data, stats: stats.data })
}
