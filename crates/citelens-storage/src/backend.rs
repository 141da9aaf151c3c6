//! Storage contract: keys, envelopes and the backend trait.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The fixed set of logical keys the pipeline writes and the API reads.
pub mod keys {
    pub const PAPERS: &str = "papers";
    pub const CITATION_GRAPH: &str = "citation_graph";
    pub const EMBEDDINGS: &str = "embeddings";
    pub const STATS: &str = "stats";
    pub const LAST_UPDATED: &str = "last_updated";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend error [{status}]: {message}")]
    Backend { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for citelens_common::CitelensError {
    fn from(e: StorageError) -> Self {
        citelens_common::CitelensError::Storage(e.to_string())
    }
}

/// Versioned wrapper around every persisted artifact.
///
/// One refresh run stamps all of its artifacts with the same `generation`,
/// so readers that combine artifacts can detect a mixed set left behind by
/// an interrupted or interleaved refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub generation: Uuid,
    pub updated_at: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(generation: Uuid, updated_at: impl Into<String>, data: T) -> Self {
        Self { generation, updated_at: updated_at.into(), data }
    }
}

/// Capability interface for the shared artifact store.
///
/// Values are opaque JSON; typed access goes through [`get_envelope`] /
/// [`put_envelope`]. A value that fails to deserialize on read is treated
/// as absent by callers, never as a fatal error.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Probe whether the backend can currently serve requests.
    async fn available(&self) -> bool;

    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Read a typed envelope; deserialization failure yields `None`, not an error.
pub async fn get_envelope<T: DeserializeOwned>(
    backend: &dyn StorageBackend,
    key: &str,
) -> Result<Option<Envelope<T>>> {
    let Some(value) = backend.get(key).await? else {
        return Ok(None);
    };
    Ok(serde_json::from_value(value).ok())
}

pub async fn put_envelope<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    envelope: &Envelope<T>,
) -> Result<()> {
    backend.set(key, &serde_json::to_value(envelope)?).await
}
