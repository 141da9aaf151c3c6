//! Semantic embeddings read endpoint.
//!
//! The pipeline never produces embeddings itself; an external projection
//! job writes them under the `embeddings` key and this endpoint serves
//! whatever is there, stub otherwise.

use axum::{extract::State, Json};

use citelens_common::models::{EmbeddingsResponse, SemanticEmbedding};
use citelens_storage::{get_envelope, keys, Envelope};

use crate::state::SharedState;
use crate::stub;

/// GET /api/data/embeddings
pub async fn embeddings(State(state): State<SharedState>) -> Json<EmbeddingsResponse> {
    let stored: Option<Envelope<Vec<SemanticEmbedding>>> =
        get_envelope(state.storage.as_ref(), keys::EMBEDDINGS)
            .await
            .ok()
            .flatten();

    match stored {
        Some(envelope) => Json(EmbeddingsResponse {
            embeddings: envelope.data,
            last_updated: envelope.updated_at,
        }),
        None => Json(stub::stub_embeddings()),
    }
}
