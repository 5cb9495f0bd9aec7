//! Cache configuration.
//!
//! Controls where the persistent store lives and how keys are namespaced.

use std::path::PathBuf;
use std::sync::Arc;

use super::clock::SystemClock;
use super::store::{FileStore, KvStore, MemoryStore, StorageError};
use super::ttl::TtlCache;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Location of the JSON storage file.
    pub path: PathBuf,
    /// Prefix applied to every cache key.
    pub namespace: String,
    /// Upper bound on stored bytes; `None` disables the check.
    pub quota_bytes: Option<u64>,
    /// When false, entries only live for the current process.
    pub persist: bool,
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            path: settings.path.clone(),
            namespace: settings.namespace.clone(),
            quota_bytes: settings.quota_bytes.map(std::num::NonZeroU64::get),
            persist: settings.persist,
        }
    }
}

impl CacheConfig {
    /// Opens the configured store and wraps it in a TTL cache on the system clock.
    pub fn open(&self) -> Result<TtlCache, StorageError> {
        let store: Arc<dyn KvStore> = if self.persist {
            Arc::new(FileStore::open(&self.path, self.quota_bytes)?)
        } else {
            Arc::new(match self.quota_bytes {
                Some(quota) => MemoryStore::with_quota(quota),
                None => MemoryStore::new(),
            })
        };
        Ok(TtlCache::new(store, Arc::new(SystemClock), &self.namespace))
    }
}
