#![deny(clippy::all, clippy::pedantic)]

use kusi::application::editor::Outcome;
use kusi::domain::platform::Platform;
use kusi::domain::summary::BatchStatus;

use crate::args::GenerateArgs;
use crate::context::{CliError, Ctx};
use crate::io::read_opt_value;
use crate::print::print_json;

/// Flags override the restored draft field by field; the merged draft is
/// persisted before any request goes out.
pub async fn handle(ctx: &Ctx, args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        title,
        body,
        body_file,
        platforms,
        no_quality,
    } = args;

    let platforms = match platforms {
        Some(raw) => Platform::parse_list(&raw)?,
        None => ctx.default_platforms(),
    };
    let editor = ctx
        .editor()
        .with_platforms(platforms)
        .with_auto_quality(!no_quality);

    if let Some(title) = title {
        editor.set_title(title);
    }
    if let Some(body) = read_opt_value(body, body_file)? {
        editor.set_body(body);
    }

    let outcome = editor.generate().await;
    editor.flush();
    let report = match outcome? {
        Outcome::Completed(report) => report,
        Outcome::Busy => return Err(CliError::Busy),
    };
    ctx.remember_batch(&report.results);
    print_json(&report)?;

    if report.summary.status == BatchStatus::Failed {
        return Err(CliError::BatchFailed(report.summary.message));
    }
    Ok(())
}
