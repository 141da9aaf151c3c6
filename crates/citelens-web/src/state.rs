//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use citelens_ingestion::scholar::{HttpPageFetcher, PageFetcher, ScraperConfig};
use citelens_llm::{CompletionBackend, OpenAiCompatibleBackend};
use citelens_storage::{select_backend, RestKvStore, StorageBackend};

use crate::config::AppConfig;

pub struct AppState {
    pub config: AppConfig,
    pub storage: Arc<dyn StorageBackend>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub llm: Arc<dyn CompletionBackend>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire up production collaborators from the config: HTTP page fetcher,
    /// KV-or-local storage, OpenAI-compatible completion backend.
    pub async fn from_config(config: AppConfig) -> Self {
        let kv = match (&config.kv_rest_api_url, &config.kv_rest_api_token) {
            (Some(url), Some(token)) => Some(RestKvStore::new(url, token)),
            _ => None,
        };
        let storage = select_backend(kv, &config.cache_dir).await;
        let fetcher: Arc<dyn PageFetcher> =
            Arc::new(HttpPageFetcher::new(config.scraper_api_key.clone()));
        let llm: Arc<dyn CompletionBackend> = Arc::new(OpenAiCompatibleBackend::new(
            &config.llm_api_base_url,
            &config.llm_model,
            config.llm_api_key.clone(),
        ));
        Self { config, storage, fetcher, llm }
    }

    /// Test/builder constructor with explicit collaborators.
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn StorageBackend>,
        fetcher: Arc<dyn PageFetcher>,
        llm: Arc<dyn CompletionBackend>,
    ) -> Self {
        Self { config, storage, fetcher, llm }
    }

    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            user_id: self.config.scholar_user_id.clone(),
            page_size: 100,
            max_records: 1000,
            page_delay: Duration::from_secs(1),
        }
    }
}
