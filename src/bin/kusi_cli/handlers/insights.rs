#![deny(clippy::all, clippy::pedantic)]

use kusi::domain::platform::Platform;

use crate::args::TextArgs;
use crate::context::{CliError, Ctx};
use crate::io::{parse_json_opt, read_value};
use crate::print::print_json;

fn text(args: TextArgs) -> Result<String, CliError> {
    read_value(args.text, args.text_file)
}

pub async fn voice(ctx: &Ctx, args: TextArgs) -> Result<(), CliError> {
    let res = ctx.api.analyze_voice(&text(args)?).await?;
    print_json(&res)
}

pub async fn seo(ctx: &Ctx, topic: &str, platform: Option<&str>) -> Result<(), CliError> {
    let res = ctx.api.research_seo(topic, platform).await?;
    print_json(&res)
}

pub async fn optimize(ctx: &Ctx, args: TextArgs, platform: Platform) -> Result<(), CliError> {
    let res = ctx.api.optimize_platform(&text(args)?, platform).await?;
    print_json(&res)
}

pub async fn oracle(ctx: &Ctx, question: &str, context: Option<String>) -> Result<(), CliError> {
    let context = parse_json_opt(context)?;
    let res = ctx.api.consult_oracle(question, context).await?;
    print_json(&res)
}

pub async fn visual(
    ctx: &Ctx,
    args: TextArgs,
    platform: Option<Platform>,
) -> Result<(), CliError> {
    let res = ctx.api.suggest_visuals(&text(args)?, platform).await?;
    print_json(&res)
}
