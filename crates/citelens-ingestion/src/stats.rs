//! Aggregate stats over one paper collection.

use citelens_common::models::{DataStats, Paper};

const TOP_VENUES: usize = 10;

/// Compute summary counters for a refresh generation.
///
/// `top_venues` is sorted by descending frequency with a stable sort, so
/// ties keep first-encountered order.
pub fn compute_stats(papers: &[Paper], last_updated: &str) -> DataStats {
    let total_citations = papers.iter().map(|p| u64::from(p.citation_count)).sum();

    // Insertion-ordered frequency table; the collection is small enough
    // that a linear scan beats bookkeeping a map plus an order index.
    let mut venue_counts: Vec<(String, usize)> = Vec::new();
    for paper in papers {
        match venue_counts.iter_mut().find(|(v, _)| *v == paper.venue) {
            Some((_, count)) => *count += 1,
            None => venue_counts.push((paper.venue.clone(), 1)),
        }
    }

    let total_venues = venue_counts.len();
    venue_counts.sort_by(|a, b| b.1.cmp(&a.1));

    DataStats {
        total_papers: papers.len(),
        total_citations,
        total_venues,
        top_venues: venue_counts
            .into_iter()
            .take(TOP_VENUES)
            .map(|(venue, _)| venue)
            .collect(),
        last_updated: last_updated.to_string(),
    }
}
