//! Scholar profile scraper.
//!
//! Paginates the public profile listing, parses each publication row and
//! aggregates pages until the listing is exhausted or the safety cap is
//! reached. Any network or non-2xx failure aborts the whole scrape — a
//! partial collection would silently understate the paper count, so the
//! caller gets a full result or a typed error, never something in between.
//!
//! Page fetching sits behind [`PageFetcher`] so the pagination logic is
//! testable without the network.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

use crate::venue::normalize_venue;

const SCHOLAR_BASE_URL: &str = "https://scholar.google.com";
const PROXY_BASE_URL: &str = "http://api.scraperapi.com";

// Browser-like client identifier; the bare default gets blocked quickly.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

lazy_static! {
    static ref SOURCE_ID_RE: Regex = Regex::new(r"citation_for_view=([^&]+)").unwrap();
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("profile endpoint returned status {status}")]
    Upstream { status: u16 },

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<ScrapeError> for citelens_common::CitelensError {
    fn from(e: ScrapeError) -> Self {
        citelens_common::CitelensError::Scrape(e.to_string())
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// One publication row as parsed off a listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPaper {
    pub source_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: i32,
    pub venue: String,
    pub venue_raw: String,
    pub citation_count: u32,
    pub url: Option<String>,
    pub abstract_text: Option<String>,
}

/// A paper known only because it cites one of the source papers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitingPaper {
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub venue: Option<String>,
    /// Id of the source paper it cites.
    pub cited_paper_id: String,
}

#[derive(Debug, Clone)]
pub struct ScraperResult {
    pub papers: Vec<ScrapedPaper>,
    pub citing_papers: Vec<CitingPaper>,
    pub last_updated: String,
}

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// The profile's user identifier on the scholar host.
    pub user_id: String,
    pub page_size: usize,
    /// Safety cap on total records across all pages.
    pub max_records: usize,
    /// Delay between page fetches, bounding the request rate.
    pub page_delay: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            page_size: 100,
            max_records: 1000,
            page_delay: Duration::from_secs(1),
        }
    }
}

// ── Page fetching ─────────────────────────────────────────────────────────────

/// Fetch one raw listing page. Implemented over HTTP in production and by
/// fakes in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(
        &self,
        user_id: &str,
        start: usize,
        page_size: usize,
    ) -> Result<String, ScrapeError>;
}

/// HTTP fetcher, optionally routed through a fetch-proxy service when a
/// proxy API key is configured.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    proxy_api_key: Option<String>,
}

impl HttpPageFetcher {
    pub fn new(proxy_api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build scraper HTTP client");
        Self { client, proxy_api_key }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(
        &self,
        user_id: &str,
        start: usize,
        page_size: usize,
    ) -> Result<String, ScrapeError> {
        let profile_url = format!(
            "{SCHOLAR_BASE_URL}/citations?user={user_id}&hl=en&cstart={start}&pagesize={page_size}"
        );

        let fetch_url = match &self.proxy_api_key {
            Some(key) => Url::parse_with_params(
                PROXY_BASE_URL,
                &[("api_key", key.as_str()), ("url", profile_url.as_str())],
            )?
            .to_string(),
            None => profile_url,
        };

        debug!(start, page_size, proxied = self.proxy_api_key.is_some(), "Fetching listing page");

        let resp = self
            .client
            .get(&fetch_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ScrapeError::Upstream { status: resp.status().as_u16() });
        }

        Ok(resp.text().await?)
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse every publication row on a listing page.
///
/// Rows with an empty title are skipped; everything else is best-effort:
/// missing authors become `["Unknown"]`, an unparseable year defaults to
/// the current year, an unparseable citation count to 0.
pub fn parse_listing_page(html: &str) -> Vec<ScrapedPaper> {
    let row_sel = Selector::parse(".gsc_a_tr").unwrap();
    let title_sel = Selector::parse(".gsc_a_at").unwrap();
    let gray_sel = Selector::parse(".gs_gray").unwrap();
    let year_sel = Selector::parse(".gsc_a_y span").unwrap();
    let cites_sel = Selector::parse(".gsc_a_c a").unwrap();

    let document = Html::parse_document(html);
    let mut papers = Vec::new();

    for row in document.select(&row_sel) {
        let title_el = row.select(&title_sel).next();
        let title = title_el
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        if title.is_empty() {
            continue;
        }

        let href = title_el.and_then(|el| el.value().attr("href"));
        let source_id = href
            .and_then(|h| SOURCE_ID_RE.captures(h))
            .map(|c| c[1].to_string())
            .unwrap_or_default();

        let mut gray = row.select(&gray_sel);
        let author_text = gray
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let venue_raw = gray
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let mut authors: Vec<String> = author_text
            .split(',')
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if authors.is_empty() {
            authors.push("Unknown".to_string());
        }

        let year = row
            .select(&year_sel)
            .next()
            .and_then(|el| el.text().collect::<String>().trim().parse::<i32>().ok())
            .unwrap_or_else(|| Utc::now().year());

        let citation_count = row
            .select(&cites_sel)
            .next()
            .and_then(|el| el.text().collect::<String>().trim().parse::<u32>().ok())
            .unwrap_or(0);

        papers.push(ScrapedPaper {
            source_id,
            title,
            authors,
            year,
            venue: normalize_venue(&venue_raw),
            venue_raw,
            citation_count,
            url: href.map(|h| format!("{SCHOLAR_BASE_URL}{h}")),
            abstract_text: None,
        });
    }

    papers
}

// ── Pagination loop ───────────────────────────────────────────────────────────

/// Scrape the whole profile, page by page.
///
/// Citing-paper collection is out of scope for this pass (it would multiply
/// the scraping load); the result always carries an empty `citing_papers`
/// and the data model keeps the slot for future use.
#[instrument(skip(fetcher, config), fields(user_id = %config.user_id))]
pub async fn scrape_profile(
    fetcher: &dyn PageFetcher,
    config: &ScraperConfig,
) -> Result<ScraperResult, ScrapeError> {
    let mut all_papers: Vec<ScrapedPaper> = Vec::new();
    let mut start = 0usize;

    loop {
        let html = fetcher
            .fetch_page(&config.user_id, start, config.page_size)
            .await?;
        let page = parse_listing_page(&html);
        info!(start, count = page.len(), "Listing page parsed");

        if page.is_empty() {
            break;
        }

        let page_len = page.len();
        all_papers.extend(page);
        start += config.page_size;

        // A partial page is the last one.
        if page_len < config.page_size {
            break;
        }

        if start >= config.max_records {
            info!(cap = config.max_records, "Reached safety cap, stopping");
            break;
        }

        tokio::time::sleep(config.page_delay).await;
    }

    info!(total = all_papers.len(), "Profile scrape complete");

    Ok(ScraperResult {
        papers: all_papers,
        citing_papers: Vec::new(),
        last_updated: Utc::now().to_rfc3339(),
    })
}
