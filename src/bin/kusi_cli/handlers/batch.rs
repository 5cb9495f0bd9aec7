#![deny(clippy::all, clippy::pedantic)]

use kusi::application::editor::{EditorController, Outcome};

use crate::context::{CliError, Ctx};
use crate::print::print_json;

fn editor_with_last_batch(ctx: &Ctx) -> EditorController {
    let editor = ctx.editor();
    if let Some(results) = ctx.last_batch() {
        editor.load_results(results);
    }
    editor
}

pub async fn quality(ctx: &Ctx) -> Result<(), CliError> {
    let editor = editor_with_last_batch(ctx);
    match editor.analyze_quality().await? {
        Outcome::Completed(qualities) => print_json(&qualities),
        Outcome::Busy => Err(CliError::Busy),
    }
}

/// Humanized text replaces the stored batch so later runs build on it.
pub async fn humanize(ctx: &Ctx) -> Result<(), CliError> {
    let editor = editor_with_last_batch(ctx);
    match editor.humanize().await? {
        Outcome::Completed(report) => {
            ctx.remember_batch(&report.results);
            print_json(&report)
        }
        Outcome::Busy => Err(CliError::Busy),
    }
}
