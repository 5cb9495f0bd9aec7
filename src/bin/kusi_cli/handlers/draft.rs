#![deny(clippy::all, clippy::pedantic)]

use serde_json::json;

use crate::args::DraftCmd;
use crate::context::{CliError, Ctx};
use crate::io::read_opt_value;
use crate::print::print_json;

pub fn handle(ctx: &Ctx, cmd: DraftCmd) -> Result<(), CliError> {
    let editor = ctx.editor();
    match cmd {
        DraftCmd::Show => print_json(&editor.draft()),
        DraftCmd::Set {
            title,
            body,
            body_file,
        } => {
            let body = read_opt_value(body, body_file)?;
            if title.is_none() && body.is_none() {
                return Err(CliError::InvalidInput(
                    "provide --title, --body or --body-file".into(),
                ));
            }
            if let Some(title) = title {
                editor.set_title(title);
            }
            if let Some(body) = body {
                editor.set_body(body);
            }
            print_json(&editor.draft())
        }
        DraftCmd::Clear => {
            editor.clear_draft();
            print_json(&json!({ "cleared": true }))
        }
    }
}
