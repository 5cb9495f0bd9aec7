#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use kusi::application::editor::{EditorController, EditorError};
use kusi::application::fanout::{FanOutEngine, GenerationOptions};
use kusi::cache::{CacheConfig, StorageError, TtlCache};
use kusi::config::{LoadError, Settings};
use kusi::domain::error::DomainError;
use kusi::domain::platform::Platform;
use kusi::domain::results::BatchResults;
use kusi::infra::error::InfraError;
use kusi::infra::http::{ApiClient, ApiError, ClientOptions};

/// Cache key holding the latest batch between invocations.
pub const LAST_BATCH_KEY: &str = "last_batch";
pub const LAST_BATCH_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Telemetry(#[from] InfraError),
    #[error("cache error: {0}")]
    Storage(#[from] StorageError),
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("backend reported status `{0}`")]
    Offline(String),
    #[error("another operation is already running")]
    Busy,
    #[error("{0}")]
    BatchFailed(String),
    #[error("failed to render output: {0}")]
    Output(String),
}

/// Everything a handler needs, built once from the resolved settings.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub settings: Settings,
    pub api: ApiClient,
    pub cache: TtlCache,
}

impl Ctx {
    pub fn new(settings: Settings) -> Result<Self, CliError> {
        let options = ClientOptions {
            timeout: settings.api.timeout,
        };
        let api = ApiClient::new(settings.api.base_url.as_str(), &options)?;
        let config = CacheConfig::from(&settings.cache);
        let cache = match config.open() {
            Ok(cache) => cache,
            Err(err) => {
                warn!(
                    path = %config.path.display(),
                    error = %err,
                    "Cache storage unavailable; continuing without persistence"
                );
                CacheConfig {
                    persist: false,
                    ..config
                }
                .open()?
            }
        };
        Ok(Self {
            settings,
            api,
            cache,
        })
    }

    /// A controller over this context with the persisted draft restored.
    pub fn editor(&self) -> EditorController {
        let options = GenerationOptions {
            campaign_id: self.settings.api.campaign_id,
            journalism_mode: self.settings.api.journalism_mode,
        };
        let engine = FanOutEngine::new(Arc::new(self.api.clone()), options);
        EditorController::new(engine, self.cache.clone(), self.default_platforms())
    }

    pub fn default_platforms(&self) -> Vec<Platform> {
        self.settings.platforms.clone()
    }

    pub fn last_batch(&self) -> Option<BatchResults> {
        self.cache.get(LAST_BATCH_KEY)
    }

    /// A batch that cannot be stored is only lost for later invocations.
    pub fn remember_batch(&self, results: &BatchResults) {
        if let Err(err) = self
            .cache
            .put_with_ttl(LAST_BATCH_KEY, results, LAST_BATCH_TTL)
        {
            warn!(error = %err, "Failed to store the last batch");
        }
    }
}
