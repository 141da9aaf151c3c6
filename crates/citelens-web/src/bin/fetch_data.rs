//! Operator script: scrape the profile and print a summary without
//! touching storage.
//!
//! Run with: cargo run -p citelens-web --bin fetch-data

use std::collections::BTreeMap;

use citelens_ingestion::scholar::{scrape_profile, HttpPageFetcher, ScraperConfig};
use citelens_ingestion::transform::transform_scraped;
use citelens_web::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let fetcher = HttpPageFetcher::new(config.scraper_api_key.clone());

    let scraper_config = ScraperConfig {
        user_id: config.scholar_user_id.clone(),
        ..Default::default()
    };

    println!("Fetching papers for profile {}...\n", scraper_config.user_id);

    let result = scrape_profile(&fetcher, &scraper_config).await?;
    let papers = transform_scraped(result.papers);

    let total_citations: u64 = papers.iter().map(|p| u64::from(p.citation_count)).sum();
    println!("Summary:");
    println!("  Total papers: {}", papers.len());
    println!("  Total citations: {}", total_citations);

    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for paper in &papers {
        *by_year.entry(paper.year).or_default() += 1;
    }
    println!("\n  Papers by year:");
    for (year, count) in by_year.iter().rev() {
        println!("  {year}: {count} papers");
    }

    let mut by_venue: Vec<(String, usize)> = Vec::new();
    for paper in &papers {
        match by_venue.iter_mut().find(|(v, _)| *v == paper.venue) {
            Some((_, count)) => *count += 1,
            None => by_venue.push((paper.venue.clone(), 1)),
        }
    }
    by_venue.sort_by(|a, b| b.1.cmp(&a.1));
    println!("\n  Top venues:");
    for (venue, count) in by_venue.iter().take(10) {
        println!("  {venue}: {count} papers");
    }

    let mut by_citations = papers.clone();
    by_citations.sort_by(|a, b| b.citation_count.cmp(&a.citation_count));
    println!("\n  Top 5 cited papers:");
    for (i, paper) in by_citations.iter().take(5).enumerate() {
        println!("  {}. \"{}\" ({} citations)", i + 1, paper.title, paper.citation_count);
    }

    println!("\nTo update the live site, trigger the refresh endpoint:");
    println!("  curl http://localhost:{}/api/refresh \\", config.port);
    println!("    -H \"Authorization: Bearer $CRON_SECRET\"");

    Ok(())
}
