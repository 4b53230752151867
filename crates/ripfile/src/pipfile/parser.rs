//! Read a Pipfile and reshape it into the normalized `_meta` / `default` /
//! `develop` mapping.
//!
//! The reshaping mirrors pipenv: the document is merged over a built-in
//! skeleton (one `pypi` source, empty sections) one top-level key at a time,
//! so a document that declares any `[[source]]` replaces the default source
//! entirely.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::pipfile::discovery::PIPFILE_NAME;
use crate::pipfile::env::Environment;
use crate::pipfile::error::Error;

/// Index used when the Pipfile declares no `[[source]]`.
pub const DEFAULT_SOURCE_URL: &str = "https://pypi.python.org/simple";

/// Name of the built-in source.
pub const DEFAULT_SOURCE_NAME: &str = "pypi";

/// One of the two dependency partitions of a Pipfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Runtime dependencies, from `[packages]`.
    Default,
    /// Development-only dependencies, from `[dev-packages]`.
    Develop,
}

impl Group {
    /// Both groups, in output order.
    pub const ALL: [Self; 2] = [Self::Default, Self::Develop];

    /// Key of this group in the normalized mapping (and in `Pipfile.lock`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Develop => "develop",
        }
    }

    /// Name of the Pipfile section this group is read from.
    pub fn section(self) -> &'static str {
        match self {
            Self::Default => "packages",
            Self::Develop => "dev-packages",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The normalized Pipfile mapping.
///
/// Values are kept as the (substituted) TOML found in the document; turning
/// them into records is [`Pipfile::from_manifest`]'s job.
///
/// [`Pipfile::from_manifest`]: crate::pipfile::Pipfile::from_manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestData {
    /// The `_meta` section.
    pub meta: ManifestMeta,
    /// Contents of `[packages]`.
    pub default: toml::Value,
    /// Contents of `[dev-packages]`.
    pub develop: toml::Value,
}

/// The `_meta` section of the normalized mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestMeta {
    /// The `[[source]]` list, or the built-in `pypi` source.
    pub sources: toml::Value,
    /// The `[requires]` table, or an empty table.
    pub requires: toml::Value,
}

impl ManifestData {
    /// Reshape a decoded Pipfile document.
    ///
    /// String values are expanded against `env` before merging, so the
    /// built-in defaults are never subject to substitution.
    pub fn from_document(document: toml::Table, env: &Environment) -> Self {
        let mut config = default_config();
        for (key, value) in env.substitute_table(document) {
            config.insert(key, value);
        }

        let mut take = |key: &str| {
            config
                .remove(key)
                .unwrap_or_else(|| toml::Value::Table(toml::Table::new()))
        };

        Self {
            meta: ManifestMeta {
                sources: take("source"),
                requires: take("requires"),
            },
            default: take(Group::Default.section()),
            develop: take(Group::Develop.section()),
        }
    }

    /// The mapping for one dependency group.
    pub fn group(&self, group: Group) -> &toml::Value {
        match group {
            Group::Default => &self.default,
            Group::Develop => &self.develop,
        }
    }

    /// The mapping as JSON, keyed `_meta`, `default`, `develop`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "_meta": {
                "sources": toml_to_json(&self.meta.sources),
                "requires": toml_to_json(&self.meta.requires),
            },
            "default": toml_to_json(&self.default),
            "develop": toml_to_json(&self.develop),
        })
    }
}

/// Reads a Pipfile from disk into [`ManifestData`].
#[derive(Debug, Clone)]
pub struct PipfileParser {
    filename: PathBuf,
}

impl PipfileParser {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Read, decode, substitute, and reshape the Pipfile, expanding against
    /// the current process environment.
    pub fn parse(&self) -> Result<ManifestData, Error> {
        self.parse_with(&Environment::capture())
    }

    /// [`PipfileParser::parse`] against an explicit environment snapshot.
    pub fn parse_with(&self, env: &Environment) -> Result<ManifestData, Error> {
        debug!("Reading Pipfile at `{}`", self.filename.display());
        let content = fs_err::read_to_string(&self.filename).map_err(Error::FileAccess)?;

        let document: toml::Table = toml::from_str(&content).map_err(|err| Error::Parse {
            path: self.filename.clone(),
            source: Box::new(err),
        })?;

        Ok(ManifestData::from_document(document, env))
    }
}

impl Default for PipfileParser {
    fn default() -> Self {
        Self::new(PIPFILE_NAME)
    }
}

/// The skeleton every Pipfile is merged over.
fn default_config() -> toml::Table {
    let mut source = toml::Table::new();
    source.insert("url".to_owned(), DEFAULT_SOURCE_URL.into());
    source.insert("verify_ssl".to_owned(), true.into());
    source.insert("name".to_owned(), DEFAULT_SOURCE_NAME.into());

    let mut config = toml::Table::new();
    config.insert(
        "source".to_owned(),
        toml::Value::Array(vec![toml::Value::Table(source)]),
    );
    for key in ["packages", "requires", "dev-packages"] {
        config.insert(key.to_owned(), toml::Value::Table(toml::Table::new()));
    }
    config
}

/// Convert a TOML value to JSON; datetimes become their TOML string form.
pub(crate) fn toml_to_json(value: &toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(string) => serde_json::Value::String(string.clone()),
        toml::Value::Integer(integer) => serde_json::Value::from(*integer),
        toml::Value::Float(float) => serde_json::Number::from_f64(*float)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        toml::Value::Boolean(boolean) => serde_json::Value::Bool(*boolean),
        toml::Value::Datetime(datetime) => serde_json::Value::String(datetime.to_string()),
        toml::Value::Array(array) => array.iter().map(toml_to_json).collect(),
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(key, value)| (key.clone(), toml_to_json(value)))
                .collect(),
        ),
    }
}
