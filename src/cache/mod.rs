//! Kusi cache layer
//!
//! Small JSON values persisted under a namespaced key with a time-to-live.
//! Expiry is checked on read: an expired or malformed entry is deleted and
//! reported as absent.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! path = ".kusi/storage.json"
//! namespace = "kusi_"
//! quota_bytes = 5242880
//! persist = true
//! ```

mod clock;
mod config;
mod lock;
mod store;
mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use store::{FileStore, KvStore, MemoryStore, StorageError};
pub use ttl::{DEFAULT_TTL, TtlCache};

pub(crate) use lock::mutex_lock;
