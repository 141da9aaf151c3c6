//! Citation / co-authorship graph builder.

use citelens_common::models::{CitationGraph, GraphEdge, GraphNode, NodeKind, Paper, RelationType};
use tracing::debug;

use crate::scholar::CitingPaper;

/// Node id for an externally-citing paper: a truncated title slug.
///
/// Long shared title prefixes can collide; the scheme is kept anyway
/// because these ids are observable by the presentation layer (see
/// DESIGN.md).
fn external_node_id(title: &str) -> String {
    let prefix: String = title.chars().take(20).collect();
    let slug: String = prefix
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    format!("external-{slug}")
}

/// Build the graph for one refresh generation.
///
/// When citing records exist the edges are exactly the `cites` edges and
/// co-authorship is skipped — it is quadratic and only worth computing as a
/// fallback signal. With no citing data, every unordered pair of source
/// papers sharing at least one author (case-insensitive) gets a
/// `co-authored` edge. Quadratic in paper count; fine for hundreds of
/// papers, a known scaling limit beyond that.
pub fn build_citation_graph(papers: &[Paper], citing_papers: &[CitingPaper]) -> CitationGraph {
    let mut nodes: Vec<GraphNode> = papers
        .iter()
        .map(|paper| GraphNode {
            id: paper.id.clone(),
            kind: NodeKind::Source,
            title: paper.title.clone(),
            year: Some(paper.year),
            venue: Some(paper.venue.clone()),
            is_source_paper: true,
            citation_count: paper.citation_count,
            authors: Some(paper.authors.clone()),
        })
        .collect();

    nodes.extend(citing_papers.iter().map(|citing| GraphNode {
        id: external_node_id(&citing.title),
        kind: NodeKind::External,
        title: citing.title.clone(),
        year: citing.year,
        venue: citing.venue.clone(),
        is_source_paper: false,
        citation_count: 0,
        authors: Some(citing.authors.clone()),
    }));

    let edges = if citing_papers.is_empty() {
        co_authorship_edges(papers)
    } else {
        citing_papers
            .iter()
            .map(|citing| GraphEdge {
                source_id: external_node_id(&citing.title),
                target_id: citing.cited_paper_id.clone(),
                relation_type: RelationType::Cites,
            })
            .collect()
    };

    debug!(nodes = nodes.len(), edges = edges.len(), "Citation graph built");
    CitationGraph { nodes, edges }
}

fn co_authorship_edges(papers: &[Paper]) -> Vec<GraphEdge> {
    let mut edges = Vec::new();
    for i in 0..papers.len() {
        for j in (i + 1)..papers.len() {
            if shares_author(&papers[i], &papers[j]) {
                edges.push(GraphEdge {
                    source_id: papers[i].id.clone(),
                    target_id: papers[j].id.clone(),
                    relation_type: RelationType::CoAuthored,
                });
            }
        }
    }
    edges
}

fn shares_author(a: &Paper, b: &Paper) -> bool {
    a.authors.iter().any(|author| {
        b.authors
            .iter()
            .any(|other| other.eq_ignore_ascii_case(author))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str, title: &str, authors: &[&str]) -> Paper {
        Paper {
            id: id.to_string(),
            source_id: format!("U:{id}"),
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            year: 2023,
            venue: "NeurIPS".into(),
            venue_raw: "NeurIPS 2023".into(),
            citation_count: 1,
            url: None,
            abstract_text: None,
            tags: vec![],
            is_source_paper: true,
        }
    }

    fn citing(title: &str, cited: &str) -> CitingPaper {
        CitingPaper {
            title: title.to_string(),
            authors: vec!["C. External".into()],
            year: Some(2024),
            venue: None,
            cited_paper_id: cited.to_string(),
        }
    }

    #[test]
    fn test_citing_records_produce_only_cites_edges() {
        let papers = vec![
            paper("p1", "First", &["A. Smith", "B. Jones"]),
            paper("p2", "Second", &["A. Smith"]),
        ];
        let citing = vec![citing("An external follow-up study", "p1")];

        let graph = build_citation_graph(&papers, &citing);

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 1);
        assert!(graph
            .edges
            .iter()
            .all(|e| e.relation_type == RelationType::Cites));
        assert_eq!(graph.edges[0].target_id, "p1");
        // Even though p1/p2 share an author, no co-authorship edge appears.
    }

    #[test]
    fn test_every_cites_edge_references_existing_nodes() {
        let papers = vec![paper("p1", "First", &["A. Smith"])];
        let citing = vec![citing("An external follow-up study", "p1")];
        let graph = build_citation_graph(&papers, &citing);

        for edge in &graph.edges {
            assert!(graph.nodes.iter().any(|n| n.id == edge.source_id));
            assert!(graph.nodes.iter().any(|n| n.id == edge.target_id));
        }
    }

    #[test]
    fn test_fallback_co_authorship_is_case_insensitive_and_pair_unique() {
        let papers = vec![
            paper("p1", "First", &["A. Smith", "B. Jones"]),
            paper("p2", "Second", &["a. smith"]),
            paper("p3", "Third", &["D. Lee"]),
        ];
        let graph = build_citation_graph(&papers, &[]);

        assert!(graph
            .edges
            .iter()
            .all(|e| e.relation_type == RelationType::CoAuthored));
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source_id, "p1");
        assert_eq!(graph.edges[0].target_id, "p2");

        // No duplicate unordered pairs.
        let mut pairs: Vec<(String, String)> = graph
            .edges
            .iter()
            .map(|e| (e.source_id.clone(), e.target_id.clone()))
            .collect();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), graph.edges.len());
    }

    #[test]
    fn test_external_node_id_slug() {
        assert_eq!(
            external_node_id("A Study Of Something Quite Long"),
            "external-A-Study-Of-Something"
        );
    }

    #[test]
    fn test_empty_inputs_yield_empty_graph() {
        let graph = build_citation_graph(&[], &[]);
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
