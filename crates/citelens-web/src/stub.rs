//! Bundled stub dataset — the universal read-path fallback.
//!
//! The UI must always render something, so every read handler resolves to
//! this data when the storage backend has nothing (or nothing coherent)
//! to offer.

use citelens_common::models::{CitationGraphResponse, EmbeddingsResponse, PapersResponse};

pub fn stub_papers() -> PapersResponse {
    serde_json::from_str(include_str!("../data/stub_papers.json"))
        .expect("bundled stub papers are valid")
}

pub fn stub_citation_graph() -> CitationGraphResponse {
    serde_json::from_str(include_str!("../data/stub_citation_graph.json"))
        .expect("bundled stub citation graph is valid")
}

pub fn stub_embeddings() -> EmbeddingsResponse {
    serde_json::from_str(include_str!("../data/stub_embeddings.json"))
        .expect("bundled stub embeddings are valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_data_parses_and_is_coherent() {
        let papers = stub_papers();
        assert_eq!(papers.stats.total_papers, papers.papers.len());
        let total: u64 = papers.papers.iter().map(|p| u64::from(p.citation_count)).sum();
        assert_eq!(papers.stats.total_citations, total);

        let graph = stub_citation_graph();
        for edge in &graph.graph.edges {
            assert!(graph.graph.nodes.iter().any(|n| n.id == edge.source_id));
            assert!(graph.graph.nodes.iter().any(|n| n.id == edge.target_id));
        }

        let embeddings = stub_embeddings();
        for emb in &embeddings.embeddings {
            assert!(papers.papers.iter().any(|p| p.id == emb.paper_id));
        }
    }
}
