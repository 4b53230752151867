//! Command dispatch for ripfile.
//!
//! Every command works on a single Pipfile: the one passed with `--pipfile`,
//! or the nearest one found by walking up from the current directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli;
use crate::pipfile::{Pipfile, find_pipfile};
use crate::printer::Printer;

mod find;
mod hash;
mod lock;
mod parse;
mod show;

/// Exit status for ripfile commands.
#[derive(Copy, Clone)]
pub enum ExitStatus {
    /// The command succeeded.
    Success,

    /// The command failed due to an error in the user input.
    Failure,

    /// The command failed with an unexpected error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}

/// Dispatch a parsed CLI command to the appropriate handler.
pub fn dispatch(
    command: cli::Commands,
    pipfile: Option<&Path>,
    printer: Printer,
) -> Result<ExitStatus> {
    debug!("Running `ripfile {}`", command.name());
    match command {
        cli::Commands::Parse(args) => parse::execute(&args, pipfile, printer),
        cli::Commands::Show(args) => show::execute(&args, pipfile, printer),
        cli::Commands::Hash(_) => hash::execute(pipfile, printer),
        cli::Commands::Lock(args) => lock::execute(&args, pipfile, printer),
        cli::Commands::Find(_) => find::execute(pipfile, printer),
    }
}

/// The Pipfile path a command should use: `--pipfile` if given, otherwise
/// the nearest Pipfile above the current directory.
fn resolve_path(pipfile: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = pipfile {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to determine the current directory")?;
    Ok(find_pipfile(&cwd)?)
}

/// Resolve and load the Pipfile a command should use.
fn load_pipfile(pipfile: Option<&Path>) -> Result<Pipfile> {
    let path = resolve_path(pipfile)?;
    Pipfile::load(&path).with_context(|| format!("failed to load `{}`", path.display()))
}
