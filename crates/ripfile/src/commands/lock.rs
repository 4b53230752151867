//! `ripfile lock`: print the `Pipfile.lock` header.
//!
//! Only the header is produced (`_meta` with the content hash, plus the
//! unresolved groups); nothing is resolved or written to disk.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::LockArgs;
use crate::commands::{ExitStatus, load_pipfile};
use crate::printer::Printer;

/// Execute `ripfile lock`.
pub(super) fn execute(
    args: &LockArgs,
    pipfile: Option<&Path>,
    printer: Printer,
) -> Result<ExitStatus> {
    let pipfile = load_pipfile(pipfile)?;
    let lock = pipfile.lock();

    let rendered = if args.compact {
        serde_json::to_string(&lock)
    } else {
        serde_json::to_string_pretty(&lock)
    }
    .context("failed to serialize Pipfile.lock")?;

    printer.output(&rendered);
    Ok(ExitStatus::Success)
}
