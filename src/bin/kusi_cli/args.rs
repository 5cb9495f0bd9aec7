//! Command-line surface for `kusi-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kusi::config::GlobalArgs;
use kusi::domain::platform::Platform;

#[derive(Parser, Debug)]
#[command(
    name = "kusi-cli",
    version,
    about = "Generate, score and humanize content for several platforms at once",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the backend is reachable and healthy
    Health,
    /// Generate content for every selected platform from the draft
    Generate(GenerateArgs),
    /// Re-run quality analysis on the last generated batch
    Quality,
    /// Humanize the last generated batch, then re-score it
    Humanize,
    /// Inspect or edit the persisted draft
    Draft(DraftArgs),
    /// Local cache maintenance
    Cache(CacheArgs),
    /// Analyse the voice of a text
    Voice(TextArgs),
    /// Research SEO keywords for a topic
    Seo {
        #[arg(long)]
        topic: String,
        /// Platform profile; the backend uses `general` when omitted
        #[arg(long)]
        platform: Option<String>,
    },
    /// Optimise a text for one platform
    Optimize {
        #[command(flatten)]
        text: TextArgs,
        #[arg(long)]
        platform: Platform,
    },
    /// Ask the content oracle a question
    Oracle {
        #[arg(long)]
        question: String,
        /// Extra JSON context passed through verbatim
        #[arg(long)]
        context: Option<String>,
    },
    /// Suggest visuals for a text
    Visual {
        #[command(flatten)]
        text: TextArgs,
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Show the revision history of a stored content item
    History {
        #[arg(long)]
        content_id: i64,
    },
    /// Start a planning session for a campaign
    Planning {
        /// Defaults to the configured campaign
        #[arg(long)]
        campaign_id: Option<i64>,
    },
    /// Language-model provider management
    Llm(LlmArgs),
}

#[derive(Parser, Debug, Default)]
pub struct GenerateArgs {
    /// Replaces the draft title before generating
    #[arg(long)]
    pub title: Option<String>,
    /// Replaces the draft body before generating
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,
    /// Reads the draft body from a file
    #[arg(long, value_name = "PATH")]
    pub body_file: Option<PathBuf>,
    /// Comma-separated platform list, e.g. `twitter,blog`
    #[arg(long)]
    pub platforms: Option<String>,
    /// Skip the quality pass after a fully successful generation
    #[arg(long)]
    pub no_quality: bool,
}

#[derive(Parser, Debug)]
pub struct DraftArgs {
    #[command(subcommand)]
    pub action: DraftCmd,
}

#[derive(Subcommand, Debug)]
pub enum DraftCmd {
    /// Print the current draft
    Show,
    /// Update the draft title and/or body
    Set {
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        #[arg(long, value_name = "PATH")]
        body_file: Option<PathBuf>,
    },
    /// Discard the draft
    Clear,
}

#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheCmd,
}

#[derive(Subcommand, Debug)]
pub enum CacheCmd {
    /// Remove every entry under the configured namespace
    Clear,
}

#[derive(Parser, Debug)]
pub struct TextArgs {
    #[arg(long, required_unless_present = "text_file")]
    pub text: Option<String>,
    #[arg(long, value_name = "PATH", conflicts_with = "text")]
    pub text_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct LlmArgs {
    #[command(subcommand)]
    pub action: LlmCmd,
}

#[derive(Subcommand, Debug)]
pub enum LlmCmd {
    /// List available providers
    Providers,
    /// Switch the active provider
    Switch { provider: String },
}
