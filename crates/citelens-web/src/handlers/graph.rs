//! Citation graph read endpoint.

use axum::{extract::State, Json};

use citelens_common::models::{CitationGraph, CitationGraphResponse};
use citelens_storage::{get_envelope, keys, Envelope};

use crate::state::SharedState;
use crate::stub;

/// GET /api/data/citation-graph
pub async fn citation_graph(State(state): State<SharedState>) -> Json<CitationGraphResponse> {
    let stored: Option<Envelope<CitationGraph>> =
        get_envelope(state.storage.as_ref(), keys::CITATION_GRAPH)
            .await
            .ok()
            .flatten();

    match stored {
        Some(envelope) => Json(CitationGraphResponse {
            graph: envelope.data,
            last_updated: envelope.updated_at,
        }),
        None => Json(stub::stub_citation_graph()),
    }
}
