//! `ripfile parse`: print the normalized Pipfile mapping as JSON.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ParseArgs;
use crate::commands::{ExitStatus, load_pipfile};
use crate::printer::Printer;

/// Execute `ripfile parse`.
pub(super) fn execute(
    args: &ParseArgs,
    pipfile: Option<&Path>,
    printer: Printer,
) -> Result<ExitStatus> {
    let pipfile = load_pipfile(pipfile)?;
    let json = pipfile.data().to_json();

    let rendered = if args.compact {
        serde_json::to_string(&json)
    } else {
        serde_json::to_string_pretty(&json)
    }
    .context("failed to serialize the Pipfile mapping")?;

    printer.output(&rendered);
    Ok(ExitStatus::Success)
}
