//! kusi-cli: terminal front end for the Kusi content backend.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod context;
mod handlers;
mod io;
mod print;


use clap::Parser;

use args::{Cli, Commands};
use context::{CliError, Ctx};
use handlers::{backend, batch, cache, draft, generate, insights};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = kusi::config::load(&cli.global)?;
    kusi::infra::telemetry::init(&settings.logging)?;
    let ctx = Ctx::new(settings)?;
    run(&ctx, cli.command).await
}

async fn run(ctx: &Ctx, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Health => backend::health(ctx).await,
        Commands::Generate(args) => generate::handle(ctx, args).await,
        Commands::Quality => batch::quality(ctx).await,
        Commands::Humanize => batch::humanize(ctx).await,
        Commands::Draft(cmd) => draft::handle(ctx, cmd.action),
        Commands::Cache(cmd) => cache::handle(ctx, &cmd.action),
        Commands::Voice(text) => insights::voice(ctx, text).await,
        Commands::Seo { topic, platform } => insights::seo(ctx, &topic, platform.as_deref()).await,
        Commands::Optimize { text, platform } => insights::optimize(ctx, text, platform).await,
        Commands::Oracle { question, context } => insights::oracle(ctx, &question, context).await,
        Commands::Visual { text, platform } => insights::visual(ctx, text, platform).await,
        Commands::History { content_id } => backend::history(ctx, content_id).await,
        Commands::Planning { campaign_id } => backend::planning(ctx, campaign_id).await,
        Commands::Llm(cmd) => backend::llm(ctx, cmd.action).await,
    }
}
