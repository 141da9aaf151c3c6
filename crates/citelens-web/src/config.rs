//! Environment-driven configuration.
//!
//! Every secret is optional: without a KV store the local file cache takes
//! over, without a cron secret the refresh endpoint is open (development),
//! and without a completion credential the chat endpoint degrades to demo
//! mode.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Profile identifier on the scholar host.
    pub scholar_user_id: String,
    /// Fetch-proxy credential for the scraper; direct fetch when absent.
    pub scraper_api_key: Option<String>,
    /// Bearer secret guarding the refresh endpoint.
    pub cron_secret: Option<String>,
    pub kv_rest_api_url: Option<String>,
    pub kv_rest_api_token: Option<String>,
    /// Local cache directory used when the KV store is not active.
    pub cache_dir: PathBuf,
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model: String,
}

fn default_port() -> u16 { 3000 }
fn default_scholar_user_id() -> String { "s0eOtD8AAAAJ".to_string() }
fn default_cache_dir() -> PathBuf { PathBuf::from(".cache") }
fn default_llm_base_url() -> String { "https://api.openai.com/v1".to_string() }
fn default_llm_model() -> String { "gpt-3.5-turbo".to_string() }

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Read configuration from the process environment (after `dotenvy`
    /// has loaded any `.env` file).
    pub fn from_env() -> Self {
        Self {
            port: env_opt("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_port),
            scholar_user_id: env_opt("SCHOLAR_USER_ID").unwrap_or_else(default_scholar_user_id),
            scraper_api_key: env_opt("SCRAPER_API_KEY"),
            cron_secret: env_opt("CRON_SECRET"),
            kv_rest_api_url: env_opt("KV_REST_API_URL"),
            kv_rest_api_token: env_opt("KV_REST_API_TOKEN"),
            cache_dir: env_opt("CACHE_DIR").map(PathBuf::from).unwrap_or_else(default_cache_dir),
            llm_api_key: env_opt("LLM_API_KEY"),
            llm_api_base_url: env_opt("LLM_API_BASE_URL").unwrap_or_else(default_llm_base_url),
            llm_model: env_opt("LLM_MODEL").unwrap_or_else(default_llm_model),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            scholar_user_id: default_scholar_user_id(),
            scraper_api_key: None,
            cron_secret: None,
            kv_rest_api_url: None,
            kv_rest_api_token: None,
            cache_dir: default_cache_dir(),
            llm_api_key: None,
            llm_api_base_url: default_llm_base_url(),
            llm_model: default_llm_model(),
        }
    }
}
