//! Errors produced while locating, reading, and interpreting a Pipfile.

use std::path::PathBuf;

/// Everything that can go wrong between a path on disk and a [`Pipfile`].
///
/// Reading and TOML decoding failures are kept apart ([`Error::FileAccess`]
/// vs. [`Error::Parse`]) so callers can tell a missing manifest from a broken
/// one.
///
/// [`Pipfile`]: crate::pipfile::Pipfile
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manifest is missing or could not be read.
    #[error("failed to read Pipfile")]
    FileAccess(#[source] std::io::Error),

    /// The manifest is not valid TOML.
    #[error("failed to parse `{}` as TOML", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A top-level section has the wrong TOML type.
    #[error("`{key}` must be {expected}, found {found}")]
    InvalidType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A `[[source]]` or `[requires]` entry does not fit its record.
    #[error("invalid {record} entry")]
    InvalidRecord {
        record: &'static str,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A package entry could not be interpreted.
    #[error("invalid entry for `{name}` in [{section}]: {reason}")]
    InvalidPackage {
        section: &'static str,
        name: String,
        reason: String,
    },

    /// Two `[[source]]` entries share a name.
    #[error("source name `{0}` is declared more than once")]
    DuplicateSource(String),

    /// No Pipfile was found while walking up from the start directory.
    #[error("No Pipfile found (searched up to {max_depth} parent directories from {})", start.display())]
    NotFound { start: PathBuf, max_depth: usize },

    /// `PIPENV_PIPFILE` points at something that is not a file.
    #[error("PIPENV_PIPFILE is set to '{}' but the file does not exist", path.display())]
    PipfileEnv { path: PathBuf },
}

/// The TOML type name of a value, for error messages.
pub(crate) fn type_name(value: &toml::Value) -> &'static str {
    match value {
        toml::Value::String(_) => "a string",
        toml::Value::Integer(_) => "an integer",
        toml::Value::Float(_) => "a float",
        toml::Value::Boolean(_) => "a boolean",
        toml::Value::Datetime(_) => "a datetime",
        toml::Value::Array(_) => "an array",
        toml::Value::Table(_) => "a table",
    }
}
