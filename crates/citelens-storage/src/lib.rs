//! citelens-storage — the narrow get/set contract behind which all cached
//! artifacts live.
//!
//! Two backends implement [`StorageBackend`]: a networked REST key-value
//! store ([`RestKvStore`]) for deployments and a local JSON file cache
//! ([`LocalCacheStore`]) for development. Backend selection happens once at
//! startup via [`select_backend`]; handlers and the refresh pipeline only
//! ever see the trait object.

pub mod backend;
pub mod kv;
pub mod local;

pub use backend::{
    get_envelope, keys, put_envelope, Envelope, StorageBackend, StorageError,
};
pub use kv::RestKvStore;
pub use local::LocalCacheStore;

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Pick the active backend: the KV store when configured and reachable,
/// the local file cache otherwise.
pub async fn select_backend(
    kv: Option<RestKvStore>,
    cache_dir: &Path,
) -> Arc<dyn StorageBackend> {
    if let Some(kv) = kv {
        if kv.available().await {
            info!(backend = kv.name(), "Storage backend selected");
            return Arc::new(kv);
        }
        warn!("KV store configured but unreachable, falling back to local cache");
    }
    let local = LocalCacheStore::new(cache_dir);
    info!(backend = local.name(), dir = %cache_dir.display(), "Storage backend selected");
    Arc::new(local)
}
