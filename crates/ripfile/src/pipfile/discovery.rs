//! Pipfile discovery: walk up directories to find the nearest `Pipfile`.
//!
//! Respects `PIPENV_PIPFILE` (explicit path) and `PIPENV_MAX_DEPTH`
//! (maximum parent directories to traverse).

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::pipfile::error::Error;

/// Default maximum directory traversal depth.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// The filename we're looking for.
pub const PIPFILE_NAME: &str = "Pipfile";

/// Discover the Pipfile by walking up from the given directory.
///
/// Resolution order:
/// 1. `PIPENV_PIPFILE` environment variable (explicit path)
/// 2. Walk up from `start_dir` looking for `Pipfile`, up to `PIPENV_MAX_DEPTH`
///    parent directories (default: 3).
pub fn find_pipfile(start_dir: &Path) -> Result<PathBuf, Error> {
    let explicit = env::var_os("PIPENV_PIPFILE").map(PathBuf::from);
    let max_depth = env::var("PIPENV_MAX_DEPTH")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_DEPTH);

    find_pipfile_with(start_dir, explicit, max_depth)
}

/// [`find_pipfile`] with the environment already read.
pub fn find_pipfile_with(
    start_dir: &Path,
    explicit: Option<PathBuf>,
    max_depth: usize,
) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        if path.is_file() {
            debug!("Using PIPENV_PIPFILE: `{}`", path.display());
            return Ok(path);
        }
        return Err(Error::PipfileEnv { path });
    }

    let mut current = start_dir.to_path_buf();
    for _ in 0..=max_depth {
        let candidate = current.join(PIPFILE_NAME);
        if candidate.is_file() {
            debug!("Found Pipfile at `{}`", candidate.display());
            return Ok(candidate);
        }
        if !current.pop() {
            break;
        }
    }

    Err(Error::NotFound {
        start: start_dir.to_path_buf(),
        max_depth,
    })
}
