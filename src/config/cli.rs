use std::path::PathBuf;

use clap::{Args, builder::BoolishValueParser};

/// Global flags shared by every `kusi-cli` subcommand.
#[derive(Debug, Args, Default, Clone)]
pub struct GlobalArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "KUSI_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct Overrides {
    /// Backend base URL, e.g. <http://localhost:8000>
    #[arg(long = "base-url", env = "KUSI_API_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Whole-request timeout for backend calls.
    #[arg(long = "timeout-seconds", value_name = "SECONDS", global = true)]
    pub timeout_seconds: Option<u64>,

    /// Campaign the generated content is filed under.
    #[arg(long = "campaign-id", value_name = "ID", global = true)]
    pub campaign_id: Option<i64>,

    /// Location of the persistent cache file.
    #[arg(long = "cache-path", env = "KUSI_CACHE_PATH", value_name = "PATH", global = true)]
    pub cache_path: Option<PathBuf>,

    /// Toggle cache persistence across runs.
    #[arg(
        long = "cache-persist",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub cache_persist: Option<bool>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}
