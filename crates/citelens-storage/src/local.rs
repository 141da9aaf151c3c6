//! Local file cache backend — one `<key>.json` per logical key.
//!
//! Used in development and as the automatic fallback when the KV store is
//! not configured or unreachable.

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::backend::{Result, StorageBackend};

pub struct LocalCacheStore {
    dir: PathBuf,
}

impl LocalCacheStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl StorageBackend for LocalCacheStore {
    async fn available(&self) -> bool {
        true
    }

    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        debug!(key, path = %path.display(), "Cache file read");
        Ok(serde_json::from_str(&raw).ok())
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        debug!(key, path = %path.display(), "Cache file written");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local-cache"
    }
}
