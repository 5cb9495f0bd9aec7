//! Namespaced JSON cache with read-side expiry.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::clock::Clock;
use super::store::{KvStore, StorageError};

/// Lifetime applied by [`TtlCache::put`].
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// On-disk layout of one cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    data: Value,
    /// Epoch milliseconds at write time.
    timestamp: i64,
    /// Lifetime in milliseconds.
    ttl: i64,
}

impl CacheEntry {
    fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.timestamp) <= self.ttl
    }
}

#[derive(Clone)]
pub struct TtlCache {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    namespace: String,
}

impl std::fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl TtlCache {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>, namespace: &str) -> Self {
        Self {
            store,
            clock,
            namespace: namespace.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{key}", self.namespace)
    }

    /// Stores `data` for [`DEFAULT_TTL`].
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<(), StorageError> {
        self.put_with_ttl(key, data, DEFAULT_TTL)
    }

    pub fn put_with_ttl<T: Serialize + ?Sized>(
        &self,
        key: &str,
        data: &T,
        ttl: Duration,
    ) -> Result<(), StorageError> {
        let entry = CacheEntry {
            data: serde_json::to_value(data)?,
            timestamp: self.clock.now_ms(),
            ttl: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
        };
        let payload = serde_json::to_string(&entry)?;
        self.store
            .set_item(&self.namespaced(key), &payload)
            .inspect_err(|err| {
                counter!("kusi_cache_write_failed_total").increment(1);
                debug!(key, error = %err, "Cache write rejected");
            })
    }

    /// Returns the live value under `key`, evicting it when it is expired or
    /// cannot be decoded as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = self.get_value(key)?;
        match serde_json::from_value(data) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "Evicting cache entry with unexpected shape");
                self.evict(key);
                None
            }
        }
    }

    pub fn get_value(&self, key: &str) -> Option<Value> {
        let Some(raw) = self.store.get_item(&self.namespaced(key)) else {
            counter!("kusi_cache_miss_total").increment(1);
            return None;
        };
        let entry = match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(key, error = %err, "Evicting malformed cache entry");
                counter!("kusi_cache_miss_total").increment(1);
                self.evict(key);
                return None;
            }
        };
        if !entry.is_valid_at(self.clock.now_ms()) {
            debug!(key, "Cache entry expired");
            counter!("kusi_cache_expired_total").increment(1);
            self.evict(key);
            return None;
        }
        counter!("kusi_cache_hit_total").increment(1);
        Some(entry.data)
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove_item(&self.namespaced(key))
    }

    /// Removes every key under the namespace; returns how many were removed.
    pub fn clear(&self) -> Result<usize, StorageError> {
        let mut removed = 0;
        for key in self.store.keys() {
            if key.starts_with(&self.namespace) {
                self.store.remove_item(&key)?;
                removed += 1;
            }
        }
        debug!(namespace = %self.namespace, removed, "Cleared cache namespace");
        Ok(removed)
    }

    fn evict(&self, key: &str) {
        if let Err(err) = self.remove(key) {
            warn!(key, error = %err, "Failed to evict cache entry");
        }
    }
}
