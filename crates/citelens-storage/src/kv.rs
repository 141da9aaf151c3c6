//! REST key-value store client (Upstash/Vercel-KV wire format).
//!
//! The store speaks Redis commands over HTTP: `GET {base}/get/{key}`,
//! `POST {base}/set/{key}` with the value as the request body, and
//! `GET {base}/ping` as the availability probe. Every response is
//! `{"result": ...}` with stored values returned as strings.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::backend::{Result, StorageBackend, StorageError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RestKvStore {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl RestKvStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build KV HTTP client");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl StorageBackend for RestKvStore {
    async fn available(&self) -> bool {
        match self
            .client
            .get(self.url("ping"))
            .bearer_auth(&self.token)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!(error = %e, "KV availability probe failed");
                false
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let resp = self
            .client
            .get(self.url(&format!("get/{key}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body: serde_json::Value = resp.json().await?;
        if status >= 400 {
            let message = body["error"].as_str().unwrap_or("unknown KV error").to_string();
            return Err(StorageError::Backend { status, message });
        }

        // The store returns the value stringified, or null for a miss.
        match body["result"].as_str() {
            Some(raw) => {
                debug!(key, bytes = raw.len(), "KV hit");
                Ok(serde_json::from_str(raw).ok())
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let resp = self
            .client
            .post(self.url(&format!("set/{key}")))
            .bearer_auth(&self.token)
            .body(serde_json::to_string(value)?)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status >= 400 {
            let body: serde_json::Value = resp.json().await.unwrap_or_default();
            let message = body["error"].as_str().unwrap_or("unknown KV error").to_string();
            return Err(StorageError::Backend { status, message });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "rest-kv"
    }
}
