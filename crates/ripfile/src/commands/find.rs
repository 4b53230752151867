//! `ripfile find`: print the path of the Pipfile that would be used.

use std::path::Path;

use anyhow::Result;

use crate::commands::{ExitStatus, resolve_path};
use crate::printer::Printer;

/// Execute `ripfile find`.
pub(super) fn execute(pipfile: Option<&Path>, printer: Printer) -> Result<ExitStatus> {
    let path = resolve_path(pipfile)?;
    if !path.is_file() {
        printer.warn(&format!("`{}` does not exist", path.display()));
        return Ok(ExitStatus::Failure);
    }
    printer.output(&path.display().to_string());
    Ok(ExitStatus::Success)
}
