//! `ripfile hash`: print the Pipfile content hash.

use std::path::Path;

use anyhow::Result;

use crate::commands::{ExitStatus, load_pipfile};
use crate::printer::Printer;

/// Execute `ripfile hash`.
pub(super) fn execute(pipfile: Option<&Path>, printer: Printer) -> Result<ExitStatus> {
    let pipfile = load_pipfile(pipfile)?;
    printer.output(&pipfile.hash());
    Ok(ExitStatus::Success)
}
