#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use crate::context::CliError;

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    read_opt_value(val, file)?.ok_or_else(|| CliError::InvalidInput("value required".into()))
}

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(data));
    }
    Ok(val)
}

pub fn parse_json_opt(val: Option<String>) -> Result<Option<serde_json::Value>, CliError> {
    val.map(|raw| {
        serde_json::from_str(&raw).map_err(|e| CliError::InvalidInput(format!("context: {e}")))
    })
    .transpose()
}
