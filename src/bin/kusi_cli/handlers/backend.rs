#![deny(clippy::all, clippy::pedantic)]

use kusi::application::editor::Connection;

use crate::args::LlmCmd;
use crate::context::{CliError, Ctx};
use crate::print::print_json;

/// Prints the connection state; an unhealthy backend exits non-zero.
pub async fn health(ctx: &Ctx) -> Result<(), CliError> {
    let connection = ctx.editor().check_connection().await?;
    print_json(&connection)?;
    match connection {
        Connection::Online => Ok(()),
        Connection::Offline { status } => Err(CliError::Offline(status)),
    }
}

pub async fn history(ctx: &Ctx, content_id: i64) -> Result<(), CliError> {
    let res = ctx.api.content_history(content_id).await?;
    print_json(&res)
}

pub async fn planning(ctx: &Ctx, campaign_id: Option<i64>) -> Result<(), CliError> {
    let campaign_id = campaign_id.unwrap_or(ctx.settings.api.campaign_id);
    let res = ctx.api.start_planning(campaign_id).await?;
    print_json(&res)
}

pub async fn llm(ctx: &Ctx, cmd: LlmCmd) -> Result<(), CliError> {
    match cmd {
        LlmCmd::Providers => {
            let res = ctx.api.llm_providers().await?;
            print_json(&res)
        }
        LlmCmd::Switch { provider } => {
            let res = ctx.api.switch_llm(&provider).await?;
            print_json(&res)
        }
    }
}
