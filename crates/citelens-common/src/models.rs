//! Canonical data models shared across the pipeline, storage and API layers.
//!
//! All wire shapes are camelCase JSON — the same contract the presentation
//! layer consumes, so these structs double as read-time validators for
//! anything loaded from an external source (KV store, file cache).

use serde::{Deserialize, Serialize};

/// A single publication on the showcased profile.
///
/// Created by the transformer from a scraped record and immutable
/// afterwards; a full refresh replaces the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Stable internal id — truncated hash of (sourceId, title).
    pub id: String,
    /// The upstream profile's internal reference (may be empty).
    pub source_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: i32,
    /// Normalized venue label, e.g. "NeurIPS".
    pub venue: String,
    /// Raw venue text as shown on the profile.
    pub venue_raw: String,
    pub citation_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `abstract` on the wire; a reserved word in Rust.
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    /// Derived keywords, insertion-ordered, capacity-bounded.
    pub tags: Vec<String>,
    pub is_source_paper: bool,
}

/// Node kind in the citation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A paper authored on the showcased profile.
    Source,
    /// A paper known only as an external citer.
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    pub is_source_paper: bool,
    pub citation_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
}

/// Relation carried by a graph edge. A graph instance is homogeneous:
/// either all `Cites` or all `CoAuthored`, never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationType {
    #[serde(rename = "cites")]
    Cites,
    #[serde(rename = "co-authored")]
    CoAuthored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
    pub relation_type: RelationType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// 2-D projection of a paper embedding, produced by an external job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticEmbedding {
    pub paper_id: String,
    pub x: f64,
    pub y: f64,
    pub cluster_id: i32,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// Aggregate counters derived from one paper collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStats {
    pub total_papers: usize,
    pub total_citations: u64,
    pub total_venues: usize,
    pub top_venues: Vec<String>,
    pub last_updated: String,
}

// ── API response shapes ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PapersResponse {
    pub papers: Vec<Paper>,
    pub stats: DataStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationGraphResponse {
    pub graph: CitationGraph,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingsResponse {
    pub embeddings: Vec<SemanticEmbedding>,
    pub last_updated: String,
}

// ── Chat shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system" | "user" | "assistant"
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatFilters {
    /// Inclusive [min, max] publication year range.
    pub year_range: Option<[i32; 2]>,
    /// Normalized venue allow-list.
    pub venues: Option<Vec<String>>,
    /// Tag allow-list.
    pub topics: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub filters: Option<ChatFilters>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    /// Ids of the papers used as retrieval context.
    pub relevant_papers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_wire_format_is_camel_case() {
        let paper = Paper {
            id: "abc123".into(),
            source_id: "XYZ:42".into(),
            title: "A Paper".into(),
            authors: vec!["A. Smith".into()],
            year: 2023,
            venue: "NeurIPS".into(),
            venue_raw: "Neural Information Processing Systems 2023".into(),
            citation_count: 7,
            url: None,
            abstract_text: None,
            tags: vec!["privacy".into()],
            is_source_paper: true,
        };
        let json = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["sourceId"], "XYZ:42");
        assert_eq!(json["citationCount"], 7);
        assert_eq!(json["venueRaw"], "Neural Information Processing Systems 2023");
        assert_eq!(json["isSourcePaper"], true);
        assert!(json.get("url").is_none(), "absent optionals are omitted");
    }

    #[test]
    fn test_relation_type_wire_names() {
        assert_eq!(serde_json::to_value(RelationType::Cites).unwrap(), "cites");
        assert_eq!(serde_json::to_value(RelationType::CoAuthored).unwrap(), "co-authored");
    }

    #[test]
    fn test_chat_request_requires_messages() {
        let err = serde_json::from_str::<ChatRequest>(r#"{"filters": {}}"#);
        assert!(err.is_err(), "missing messages array must be rejected");

        let ok: ChatRequest = serde_json::from_str(r#"{"messages": []}"#).unwrap();
        assert!(ok.messages.is_empty());
        assert!(ok.filters.is_none());
    }
}
