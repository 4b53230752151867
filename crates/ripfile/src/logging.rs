//! Logging setup for the ripfile binary.
//!
//! Library code emits `tracing` events; the binary routes them to stderr.
//! `RIPFILE_LOG` takes an `EnvFilter` directive and overrides `-v`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit log filter.
pub const LOG_ENV: &str = "RIPFILE_LOG";

/// Install the global subscriber for the given verbosity.
///
/// `0` shows warnings, `1` adds ripfile's debug events, `2+` adds trace
/// events. `--quiet` turns logging off unless `RIPFILE_LOG` is set.
pub fn setup_logging(verbosity: u8, quiet: bool) {
    let default_directive = match (quiet, verbosity) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "warn,ripfile=debug",
        (false, _) => "warn,ripfile=trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed (e.g., when `main` runs twice in
    // one process); keep the first.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
