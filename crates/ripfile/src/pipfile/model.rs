//! Typed, immutable records built from the normalized Pipfile mapping.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::debug;

use crate::pipfile::discovery;
use crate::pipfile::error::{Error, type_name};
use crate::pipfile::normalize::PackageName;
use crate::pipfile::parser::{Group, ManifestData, PipfileParser};
use crate::pipfile::requirement::PackageRequirement;

/// A `[[source]]` entry: a package index packages can be installed from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    /// Index URL.
    #[serde(default)]
    url: String,

    /// If `false`, skip SSL certificate checks.
    #[serde(default = "default_true")]
    verify_ssl: bool,

    /// Name packages use to refer to this source (`index = "..."`).
    #[serde(default)]
    name: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            verify_ssl: true,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_verify_ssl(self, verify_ssl: bool) -> Self {
        Self { verify_ssl, ..self }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// System-level requirements from `[requires]`, named after PEP 508
/// environment markers. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Requires {
    os_name: Option<String>,
    sys_platform: Option<String>,
    platform_machine: Option<String>,
    platform_python_implementation: Option<String>,
    platform_release: Option<String>,
    platform_system: Option<String>,
    platform_version: Option<String>,
    python_version: Option<String>,
    python_full_version: Option<String>,
    implementation_name: Option<String>,
    implementation_version: Option<String>,
}

impl Requires {
    pub fn os_name(&self) -> Option<&str> {
        self.os_name.as_deref()
    }

    pub fn sys_platform(&self) -> Option<&str> {
        self.sys_platform.as_deref()
    }

    pub fn platform_machine(&self) -> Option<&str> {
        self.platform_machine.as_deref()
    }

    pub fn platform_python_implementation(&self) -> Option<&str> {
        self.platform_python_implementation.as_deref()
    }

    pub fn platform_release(&self) -> Option<&str> {
        self.platform_release.as_deref()
    }

    pub fn platform_system(&self) -> Option<&str> {
        self.platform_system.as_deref()
    }

    pub fn platform_version(&self) -> Option<&str> {
        self.platform_version.as_deref()
    }

    pub fn python_version(&self) -> Option<&str> {
        self.python_version.as_deref()
    }

    pub fn python_full_version(&self) -> Option<&str> {
        self.python_full_version.as_deref()
    }

    pub fn implementation_name(&self) -> Option<&str> {
        self.implementation_name.as_deref()
    }

    pub fn implementation_version(&self) -> Option<&str> {
        self.implementation_version.as_deref()
    }

    /// The markers that are set, as `(marker, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("os_name", &self.os_name),
            ("sys_platform", &self.sys_platform),
            ("platform_machine", &self.platform_machine),
            (
                "platform_python_implementation",
                &self.platform_python_implementation,
            ),
            ("platform_release", &self.platform_release),
            ("platform_system", &self.platform_system),
            ("platform_version", &self.platform_version),
            ("python_version", &self.python_version),
            ("python_full_version", &self.python_full_version),
            ("implementation_name", &self.implementation_name),
            ("implementation_version", &self.implementation_version),
        ]
        .into_iter()
        .filter_map(|(marker, value)| value.as_deref().map(|value| (marker, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// The requirements of one dependency group, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSet {
    group: Group,
    packages: Vec<PackageRequirement>,
}

impl RequirementSet {
    pub fn new(group: Group, packages: Vec<PackageRequirement>) -> Self {
        Self { group, packages }
    }

    /// Build the set from a group table of the normalized mapping.
    pub fn from_table(group: Group, value: &toml::Value) -> Result<Self, Error> {
        let table = value.as_table().ok_or_else(|| Error::InvalidType {
            key: group.section().to_owned(),
            expected: "a table",
            found: type_name(value),
        })?;

        let packages = table
            .iter()
            .map(|(name, entry)| {
                PackageRequirement::from_entry(name, entry).map_err(|err| Error::InvalidPackage {
                    section: group.section(),
                    name: name.clone(),
                    reason: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { group, packages })
    }

    pub fn group(&self) -> Group {
        self.group
    }

    /// Find a requirement by name; `name` is compared in normalized form.
    pub fn get(&self, name: &str) -> Option<&PackageRequirement> {
        let name: PackageName = name.parse().ok()?;
        self.packages.iter().find(|package| *package.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackageRequirement> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<'a> IntoIterator for &'a RequirementSet {
    type Item = &'a PackageRequirement;
    type IntoIter = std::slice::Iter<'a, PackageRequirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}

/// A loaded Pipfile.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipfile {
    filename: PathBuf,
    sources: Vec<Source>,
    requires: Requires,
    packages: RequirementSet,
    dev_packages: RequirementSet,
    data: ManifestData,
}

impl Pipfile {
    /// Parse the Pipfile at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let parser = PipfileParser::new(path);
        let data = parser.parse()?;
        Self::from_manifest(parser.filename(), data)
    }

    /// Locate the nearest Pipfile, starting at `start_dir`.
    ///
    /// See [`discovery::find_pipfile`] for the search rules.
    pub fn find(start_dir: &Path) -> Result<PathBuf, Error> {
        discovery::find_pipfile(start_dir)
    }

    /// Populate the records from a normalized mapping.
    pub fn from_manifest(filename: impl Into<PathBuf>, data: ManifestData) -> Result<Self, Error> {
        let sources = parse_sources(&data.meta.sources)?;

        let requires: Requires = match &data.meta.requires {
            value @ toml::Value::Table(_) => {
                value
                    .clone()
                    .try_into()
                    .map_err(|err| Error::InvalidRecord {
                        record: "[requires]",
                        source: Box::new(err),
                    })?
            }
            other => {
                return Err(Error::InvalidType {
                    key: "requires".to_owned(),
                    expected: "a table",
                    found: type_name(other),
                });
            }
        };

        let packages = RequirementSet::from_table(Group::Default, &data.default)?;
        let dev_packages = RequirementSet::from_table(Group::Develop, &data.develop)?;

        let filename = filename.into();
        debug!(
            "Loaded `{}`: {} source(s), {} package(s), {} dev package(s)",
            filename.display(),
            sources.len(),
            packages.len(),
            dev_packages.len()
        );

        Ok(Self {
            filename,
            sources,
            requires,
            packages,
            dev_packages,
            data,
        })
    }

    /// Path the Pipfile was read from.
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Look up a source by name.
    pub fn source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|source| source.name == name)
    }

    pub fn requires(&self) -> &Requires {
        &self.requires
    }

    /// Requirements from `[packages]`.
    pub fn packages(&self) -> &RequirementSet {
        &self.packages
    }

    /// Requirements from `[dev-packages]`.
    pub fn dev_packages(&self) -> &RequirementSet {
        &self.dev_packages
    }

    pub fn group(&self, group: Group) -> &RequirementSet {
        match group {
            Group::Default => &self.packages,
            Group::Develop => &self.dev_packages,
        }
    }

    /// The normalized mapping this Pipfile was built from.
    pub fn data(&self) -> &ManifestData {
        &self.data
    }
}

/// Load a Pipfile from `path`, or from the nearest Pipfile above the current
/// directory when no path is given.
pub fn load(path: Option<&Path>) -> Result<Pipfile, Error> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().map_err(Error::FileAccess)?;
            Pipfile::find(&cwd)?
        }
    };
    Pipfile::load(path)
}

fn parse_sources(value: &toml::Value) -> Result<Vec<Source>, Error> {
    let entries = value.as_array().ok_or_else(|| Error::InvalidType {
        key: "source".to_owned(),
        expected: "an array of tables",
        found: type_name(value),
    })?;

    let mut seen = FxHashSet::default();
    let mut sources = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.is_table() {
            return Err(Error::InvalidType {
                key: "source".to_owned(),
                expected: "an array of tables",
                found: type_name(entry),
            });
        }
        let source: Source = entry.clone().try_into().map_err(|err| Error::InvalidRecord {
            record: "[[source]]",
            source: Box::new(err),
        })?;
        // Unnamed sources cannot be referenced by `index`, so they never clash.
        if !source.name.is_empty() && !seen.insert(source.name.clone()) {
            return Err(Error::DuplicateSource(source.name));
        }
        sources.push(source);
    }
    Ok(sources)
}

/// Helper for serde default values.
fn default_true() -> bool {
    true
}
