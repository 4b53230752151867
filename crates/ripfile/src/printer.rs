//! Output formatting for ripfile commands.
//!
//! The [`Printer`] controls whether messages are emitted based on the user's
//! `--quiet` flag. Command results go to stdout; diagnostics go to stderr.
//! Errors are always printed regardless of quiet mode.

use anstream::{eprintln, println};
use owo_colors::OwoColorize;

/// Controls output formatting for ripfile commands.
#[derive(Copy, Clone)]
pub struct Printer {
    /// Whether output is suppressed.
    quiet: bool,
}

impl Printer {
    /// Create a new printer with the given quiet setting.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print a command result to stdout.
    pub fn output(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    /// Print a section header to stdout.
    pub fn heading(&self, title: &str) {
        if !self.quiet {
            println!("{}", title.green().bold());
        }
    }

    /// Print a warning message to stderr.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}: {}", "warning".yellow().bold(), message);
        }
    }

    /// Print an error message to stderr.
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        eprintln!("{}: {}", "error".red().bold(), message);
    }
}
