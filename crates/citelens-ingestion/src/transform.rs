//! Scraped record → canonical [`Paper`] transformation.

use citelens_common::models::Paper;
use sha2::{Digest, Sha256};

use crate::keywords::extract_from_title;
use crate::scholar::ScrapedPaper;

const PAPER_ID_LEN: usize = 16;

/// Deterministic, content-addressed paper id: truncated hex SHA-256 of the
/// upstream reference and title. Re-scraping the same entry yields the same
/// id, so downstream storage keyed by id is idempotent across refreshes.
pub fn paper_id(source_id: &str, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{source_id}-{title}").as_bytes());
    let digest = hasher.finalize();
    digest
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>()[..PAPER_ID_LEN]
        .to_string()
}

/// Convert scraped records into canonical papers.
///
/// No intra-batch deduplication: duplicate (sourceId, title) pairs map to
/// the same id and collapse at the storage layer, not here.
pub fn transform_scraped(scraped: Vec<ScrapedPaper>) -> Vec<Paper> {
    scraped
        .into_iter()
        .map(|record| Paper {
            id: paper_id(&record.source_id, &record.title),
            source_id: record.source_id,
            tags: extract_from_title(&record.title),
            title: record.title,
            authors: record.authors,
            year: record.year,
            venue: record.venue,
            venue_raw: record.venue_raw,
            citation_count: record.citation_count,
            url: record.url,
            abstract_text: record.abstract_text,
            is_source_paper: true,
        })
        .collect()
}
