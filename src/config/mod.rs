//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU64, path::PathBuf, str::FromStr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::domain::platform::Platform;

mod cli;

pub use cli::{GlobalArgs, Overrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "kusi";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_CAMPAIGN_ID: i64 = 1;
const DEFAULT_CACHE_PATH: &str = ".kusi/storage.json";
const DEFAULT_CACHE_NAMESPACE: &str = "kusi_";
const DEFAULT_CACHE_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub timeout: Option<Duration>,
    pub campaign_id: i64,
    pub journalism_mode: bool,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub path: PathBuf,
    pub namespace: String,
    /// `None` when the configured quota is zero, which disables the check.
    pub quota_bytes: Option<NonZeroU64>,
    pub persist: bool,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(args: &GlobalArgs) -> Result<Settings, LoadError> {
    load_with_env(args, environment())
}

fn environment() -> Environment {
    Environment::with_prefix("KUSI")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("platforms.default")
}

fn load_with_env(args: &GlobalArgs, env: Environment) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = args.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(env);

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&args.overrides);
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    cache: RawCacheSettings,
    logging: RawLoggingSettings,
    platforms: RawPlatformSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = overrides.base_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(seconds) = overrides.timeout_seconds {
            self.api.timeout_secs = Some(seconds);
        }
        if let Some(id) = overrides.campaign_id {
            self.api.campaign_id = Some(id);
        }
        if let Some(path) = overrides.cache_path.as_ref() {
            self.cache.path = Some(path.clone());
        }
        if let Some(persist) = overrides.cache_persist {
            self.cache.persist = Some(persist);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            cache,
            logging,
            platforms,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            cache: build_cache_settings(cache)?,
            logging: build_logging_settings(logging)?,
            platforms: build_platforms(platforms)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("api.base_url", format!("`{raw_url}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            "scheme must be http or https",
        ));
    }

    let timeout = match api.timeout_secs {
        Some(0) => {
            return Err(LoadError::invalid(
                "api.timeout_secs",
                "must be greater than zero",
            ));
        }
        Some(seconds) => Some(Duration::from_secs(seconds)),
        None => None,
    };

    Ok(ApiSettings {
        base_url,
        timeout,
        campaign_id: api.campaign_id.unwrap_or(DEFAULT_CAMPAIGN_ID),
        journalism_mode: api.journalism_mode.unwrap_or(false),
    })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let path = cache
        .path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_PATH));
    if path.as_os_str().is_empty() {
        return Err(LoadError::invalid("cache.path", "must not be empty"));
    }

    let namespace = cache
        .namespace
        .unwrap_or_else(|| DEFAULT_CACHE_NAMESPACE.to_string());
    if namespace.trim().is_empty() {
        return Err(LoadError::invalid("cache.namespace", "must not be empty"));
    }

    Ok(CacheSettings {
        path,
        namespace,
        quota_bytes: NonZeroU64::new(cache.quota_bytes.unwrap_or(DEFAULT_CACHE_QUOTA_BYTES)),
        persist: cache.persist.unwrap_or(true),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_platforms(platforms: RawPlatformSettings) -> Result<Vec<Platform>, LoadError> {
    let Some(names) = platforms.default else {
        return Ok(Platform::ALL.to_vec());
    };
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let platform = Platform::from_str(name.trim())
            .map_err(|err| LoadError::invalid("platforms.default", err.to_string()))?;
        if !selected.contains(&platform) {
            selected.push(platform);
        }
    }
    if selected.is_empty() {
        return Err(LoadError::invalid(
            "platforms.default",
            "must name at least one platform",
        ));
    }
    Ok(selected)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    campaign_id: Option<i64>,
    journalism_mode: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    path: Option<PathBuf>,
    namespace: Option<String>,
    quota_bytes: Option<u64>,
    persist: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPlatformSettings {
    default: Option<Vec<String>>,
}
