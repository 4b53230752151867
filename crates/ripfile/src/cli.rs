//! CLI argument definitions for ripfile.
//!
//! All clap derive structs live here. The [`Cli`] struct is the top-level
//! parser; [`Commands`] enumerates every subcommand.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

/// Clap v3-style help menu colors.
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Inspect Pipfile manifests.
#[derive(Parser, Debug)]
#[command(
    name = "ripfile",
    author,
    version,
    about = "Inspect Pipfile manifests.",
    styles = STYLES,
    after_help = "Use `ripfile help <command>` for more information on a specific command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the Pipfile to read.
    #[arg(global = true, short, long)]
    pub pipfile: Option<PathBuf>,

    /// Increase logging verbosity.
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output.
    #[arg(global = true, short, long)]
    pub quiet: bool,
}

/// Top-level subcommands for ripfile.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the normalized Pipfile mapping as JSON.
    Parse(ParseArgs),

    /// Summarize sources, requirements, and packages.
    Show(ShowArgs),

    /// Print the Pipfile content hash.
    Hash(HashArgs),

    /// Print the Pipfile.lock header as JSON.
    Lock(LockArgs),

    /// Print the path of the Pipfile that would be used.
    Find(FindArgs),
}

impl Commands {
    /// Return the subcommand name as a static string (for diagnostics).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Show(_) => "show",
            Self::Hash(_) => "hash",
            Self::Lock(_) => "lock",
            Self::Find(_) => "find",
        }
    }
}

/// Arguments for `ripfile parse`.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Print compact JSON on a single line.
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for `ripfile show`.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Only show dev packages.
    #[arg(long, conflicts_with = "no_dev")]
    pub dev_only: bool,

    /// Do not show dev packages.
    #[arg(long = "no-dev")]
    pub no_dev: bool,
}

impl ShowArgs {
    /// Whether the `[packages]` group should be shown.
    pub fn include_default(&self) -> bool {
        !self.dev_only
    }

    /// Whether the `[dev-packages]` group should be shown.
    pub fn include_dev(&self) -> bool {
        !self.no_dev
    }
}

/// Arguments for `ripfile hash`.
#[derive(Parser, Debug)]
pub struct HashArgs;

/// Arguments for `ripfile lock`.
#[derive(Parser, Debug)]
pub struct LockArgs {
    /// Print compact JSON on a single line.
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for `ripfile find`.
#[derive(Parser, Debug)]
pub struct FindArgs;
