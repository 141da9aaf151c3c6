//! Refresh pipeline — the single entry point that regenerates every cached
//! artifact.
//!
//! Flow for one run:
//!   1. Scrape the profile listing (fail-fast: any page error aborts)
//!   2. Transform scraped records into canonical papers
//!   3. Build the citation/co-authorship graph
//!   4. Aggregate stats
//!   5. Persist papers, stats, graph and the last-updated marker, each
//!      wrapped in an envelope stamped with this run's generation id
//!
//! Persistence is a set of independent writes, not a transaction; the
//! shared generation id lets readers detect a mixed artifact set.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use citelens_common::models::DataStats;
use citelens_common::CitelensError;
use citelens_storage::{keys, put_envelope, Envelope, StorageBackend};

use crate::graph::build_citation_graph;
use crate::scholar::{scrape_profile, PageFetcher, ScraperConfig};
use crate::stats::compute_stats;
use crate::transform::transform_scraped;

/// Summary of one completed refresh run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub job_id: Uuid,
    pub stats: DataStats,
    pub papers_stored: usize,
    pub message: String,
    pub duration_ms: u64,
}

/// Run the full scrape → transform → graph → stats → persist sequence.
#[instrument(skip(fetcher, config, storage), fields(user_id = %config.user_id))]
pub async fn run_refresh(
    fetcher: &dyn PageFetcher,
    config: &ScraperConfig,
    storage: &dyn StorageBackend,
) -> Result<RefreshSummary, CitelensError> {
    let job_id = Uuid::new_v4();
    let t0 = std::time::Instant::now();
    info!(job_id = %job_id, "Starting profile refresh");

    let scraped = scrape_profile(fetcher, config).await?;
    let last_updated = scraped.last_updated.clone();

    let papers = transform_scraped(scraped.papers);
    info!(count = papers.len(), "Records transformed");

    let graph = build_citation_graph(&papers, &scraped.citing_papers);
    let stats = compute_stats(&papers, &last_updated);

    // One generation id across all artifacts of this run.
    let generation = job_id;

    put_envelope(storage, keys::PAPERS, &Envelope::new(generation, &last_updated, &papers)).await?;
    put_envelope(storage, keys::STATS, &Envelope::new(generation, &last_updated, &stats)).await?;
    put_envelope(storage, keys::CITATION_GRAPH, &Envelope::new(generation, &last_updated, &graph))
        .await?;
    storage
        .set(keys::LAST_UPDATED, &serde_json::Value::String(last_updated.clone()))
        .await?;

    let duration_ms = t0.elapsed().as_millis() as u64;
    let message = format!("Successfully scraped {} papers", papers.len());
    info!(job_id = %job_id, duration_ms, "Refresh complete");

    Ok(RefreshSummary {
        job_id,
        papers_stored: papers.len(),
        stats,
        message,
        duration_ms,
    })
}

/// The refresh invocation timestamp, RFC 3339.
pub fn refresh_timestamp() -> String {
    Utc::now().to_rfc3339()
}
