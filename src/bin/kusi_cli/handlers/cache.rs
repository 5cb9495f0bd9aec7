#![deny(clippy::all, clippy::pedantic)]

use serde_json::json;

use crate::args::CacheCmd;
use crate::context::{CliError, Ctx};
use crate::print::print_json;

pub fn handle(ctx: &Ctx, cmd: &CacheCmd) -> Result<(), CliError> {
    match cmd {
        CacheCmd::Clear => {
            let removed = ctx.cache.clear()?;
            print_json(&json!({
                "namespace": ctx.cache.namespace(),
                "removed": removed,
            }))
        }
    }
}
