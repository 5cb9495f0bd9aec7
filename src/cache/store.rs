//! Persistent key-value storage backing the TTL cache.
//!
//! `FileStore` keeps one JSON object on disk and mirrors it in memory, the
//! way browser local storage behaves for a single tab. `MemoryStore` has the
//! same semantics without touching the filesystem.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota of {quota_bytes} bytes exceeded")]
    Quota { quota_bytes: u64 },
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize storage payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String-to-string store with local-storage semantics.
pub trait KvStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Vec<String>;
}

fn usage_bytes(entries: &BTreeMap<String, String>) -> u64 {
    entries
        .iter()
        .map(|(k, v)| (k.len() + v.len()) as u64)
        .sum()
}

/// Inserts `value`, rolling back and failing if the quota would be exceeded.
fn insert_within_quota(
    entries: &mut BTreeMap<String, String>,
    key: &str,
    value: &str,
    quota_bytes: Option<u64>,
) -> Result<Option<String>, StorageError> {
    let previous = entries.insert(key.to_string(), value.to_string());
    match quota_bytes {
        Some(quota_bytes) if usage_bytes(entries) > quota_bytes => {
            restore(entries, key, previous);
            Err(StorageError::Quota { quota_bytes })
        }
        _ => Ok(previous),
    }
}

fn restore(entries: &mut BTreeMap<String, String>, key: &str, previous: Option<String>) {
    match previous {
        Some(old) => {
            entries.insert(key.to_string(), old);
        }
        None => {
            entries.remove(key);
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
    quota_bytes: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            entries: RwLock::default(),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl KvStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        rw_read(&self.entries, SOURCE, "memory.get_item")
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = rw_write(&self.entries, SOURCE, "memory.set_item");
        insert_within_quota(&mut entries, key, value, self.quota_bytes).map(|_| ())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        rw_write(&self.entries, SOURCE, "memory.remove_item").remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        rw_read(&self.entries, SOURCE, "memory.keys")
            .keys()
            .cloned()
            .collect()
    }
}

/// JSON file store rewritten atomically on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    quota_bytes: Option<u64>,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file starts empty; an unreadable
    /// one is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>, quota_bytes: Option<u64>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Discarding unreadable storage file"
                );
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "Opened storage file");
        Ok(Self {
            path,
            quota_bytes,
            entries: RwLock::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let payload = serde_json::to_vec(entries)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&payload)?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        rw_read(&self.entries, SOURCE, "file.get_item")
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = rw_write(&self.entries, SOURCE, "file.set_item");
        let previous = insert_within_quota(&mut entries, key, value, self.quota_bytes)?;
        if let Err(err) = self.persist(&entries) {
            restore(&mut entries, key, previous);
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = rw_write(&self.entries, SOURCE, "file.remove_item");
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.persist(&entries) {
            entries.insert(key.to_string(), previous);
            return Err(err);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        rw_read(&self.entries, SOURCE, "file.keys")
            .keys()
            .cloned()
            .collect()
    }
}
