//! ripfile: read Pipfile manifests into typed records.
//!
//! The [`pipfile`] module is the library proper: it reads a `Pipfile`,
//! expands environment variables in its string values, and produces either
//! the normalized `_meta` / `default` / `develop` mapping or a typed
//! [`pipfile::Pipfile`]. The rest of the crate is a small CLI on top of it.

#![deny(clippy::print_stdout, clippy::print_stderr)]

use std::ffi::OsString;
use std::process::ExitCode;

use anstream::eprintln;
use clap::Parser;
use owo_colors::OwoColorize;

use crate::cli::Cli;
use crate::commands::ExitStatus;
use crate::printer::Printer;

pub mod cli;
pub mod commands;
pub mod logging;
pub mod pipfile;
pub mod printer;

pub use pipfile::{Error, Pipfile, load};

/// Entry point for the ripfile CLI.
///
/// Parses CLI arguments, installs the log subscriber, and dispatches to the
/// appropriate command handler.
pub fn main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    logging::setup_logging(cli.verbose, cli.quiet);
    let printer = Printer::new(cli.quiet);

    match commands::dispatch(cli.command, cli.pipfile.as_deref(), printer) {
        Ok(code) => code.into(),
        Err(err) => {
            let mut causes = err.chain();
            // An anyhow::Error always has at least one cause (itself).
            if let Some(head) = causes.next() {
                printer.error(&head.to_string());
            }
            for cause in causes {
                eprintln!(
                    "  {}: {}",
                    "Caused by".red().bold(),
                    cause.to_string().trim()
                );
            }
            ExitStatus::Error.into()
        }
    }
}
