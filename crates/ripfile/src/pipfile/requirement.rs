//! Package requirement records and the Pipfile dependency-specifier grammar.
//!
//! A Pipfile package entry is either a version string or a table:
//!
//! ```toml
//! [packages]
//! flask = "*"
//! requests = ">=2.32.0,<3"
//! httpx = { version = "~=0.27", extras = ["http2"], markers = "python_version >= '3.9'" }
//! my-lib = { git = "git+https://github.com/example/my-lib.git", ref = "main", editable = true }
//! local = { path = "./local", editable = true }
//! private = { version = "*", index = "internal" }
//! ```
//!
//! Version strings are comma-separated clauses of an operator followed by a
//! version; `"*"` (or an empty string) means "any version".

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::pipfile::normalize::{ExtraName, PackageName};

/// Comparison operator of a single version clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `===`
    ArbitraryEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `~=`
    TildeEqual,
    /// `<=`
    LessThanEqual,
    /// `>=`
    GreaterThanEqual,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
}

impl Operator {
    /// Longest tokens first so `==` never shadows `===`.
    const TOKENS: [(&'static str, Self); 8] = [
        ("===", Self::ArbitraryEqual),
        ("==", Self::Equal),
        ("!=", Self::NotEqual),
        ("~=", Self::TildeEqual),
        ("<=", Self::LessThanEqual),
        (">=", Self::GreaterThanEqual),
        ("<", Self::LessThan),
        (">", Self::GreaterThan),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ArbitraryEqual => "===",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::TildeEqual => "~=",
            Self::LessThanEqual => "<=",
            Self::GreaterThanEqual => ">=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<operator><version>` clause, e.g. `>=2.32.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSpecifier {
    operator: Operator,
    version: String,
}

impl VersionSpecifier {
    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

impl FromStr for VersionSpecifier {
    type Err = SpecifierError;

    fn from_str(clause: &str) -> Result<Self, Self::Err> {
        let clause = clause.trim();
        let (token, operator) = Operator::TOKENS
            .iter()
            .find(|(token, _)| clause.starts_with(token))
            .ok_or_else(|| SpecifierError::MissingOperator(clause.to_owned()))?;

        let version = clause[token.len()..].trim();
        if version.is_empty() {
            return Err(SpecifierError::MissingVersion(clause.to_owned()));
        }
        if version.contains(char::is_whitespace) {
            return Err(SpecifierError::InvalidVersion(version.to_owned()));
        }

        Ok(Self {
            operator: *operator,
            version: version.to_owned(),
        })
    }
}

/// A comma-separated set of clauses that must all hold, e.g. `>=1.0,<2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSpecifiers(Vec<VersionSpecifier>);

impl VersionSpecifiers {
    /// Parse a Pipfile version string; `"*"` and `""` mean "any version"
    /// and yield `None`.
    pub fn parse_pipfile(version: &str) -> Result<Option<Self>, SpecifierError> {
        let version = version.trim();
        if version.is_empty() || version == "*" {
            return Ok(None);
        }
        version.parse().map(Some)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionSpecifier> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for VersionSpecifiers {
    type Err = SpecifierError;

    fn from_str(specifiers: &str) -> Result<Self, Self::Err> {
        specifiers
            .split(',')
            .map(VersionSpecifier::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for VersionSpecifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, specifier) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{specifier}")?;
        }
        Ok(())
    }
}

/// Why a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecifierError {
    #[error("`{0}` does not start with a comparison operator (one of ===, ==, !=, ~=, <=, >=, <, >)")]
    MissingOperator(String),
    #[error("`{0}` is missing a version after the operator")]
    MissingVersion(String),
    #[error("`{0}` is not a valid version")]
    InvalidVersion(String),
}

/// The version-control system behind a [`VcsRequirement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsKind {
    Git,
    Mercurial,
    Subversion,
    Bazaar,
}

impl VcsKind {
    pub const ALL: [Self; 4] = [Self::Git, Self::Mercurial, Self::Subversion, Self::Bazaar];

    /// The Pipfile key (and URL scheme prefix) for this system.
    pub fn key(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Mercurial => "hg",
            Self::Subversion => "svn",
            Self::Bazaar => "bzr",
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A dependency fetched from version control instead of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsRequirement {
    kind: VcsKind,
    uri: String,
    reference: Option<String>,
    subdirectory: Option<String>,
}

impl VcsRequirement {
    /// Build a requirement, stripping a leading `<vcs>+` scheme prefix
    /// (e.g. `git+https://...` becomes `https://...`).
    pub fn new(kind: VcsKind, uri: &str) -> Self {
        let uri = uri
            .strip_prefix(kind.key())
            .and_then(|rest| rest.strip_prefix('+'))
            .unwrap_or(uri);
        Self {
            kind,
            uri: uri.to_owned(),
            reference: None,
            subdirectory: None,
        }
    }

    #[must_use]
    pub fn with_reference(self, reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_subdirectory(self, subdirectory: impl Into<String>) -> Self {
        Self {
            subdirectory: Some(subdirectory.into()),
            ..self
        }
    }

    pub fn kind(&self) -> VcsKind {
        self.kind
    }

    /// Location without the VCS scheme prefix.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Branch, tag, or commit.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn subdirectory(&self) -> Option<&str> {
        self.subdirectory.as_deref()
    }
}

/// One entry of `[packages]` or `[dev-packages]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequirement {
    name: PackageName,
    extras: Vec<ExtraName>,
    specs: Option<VersionSpecifiers>,
    version: Option<String>,
    editable: bool,
    vcs: Option<VcsRequirement>,
    markers: Option<String>,
    index: Option<String>,
    path: Option<String>,
}

impl PackageRequirement {
    /// A requirement on any version of `name`.
    pub fn new(name: PackageName) -> Self {
        Self {
            name,
            extras: Vec::new(),
            specs: None,
            version: None,
            editable: false,
            vcs: None,
            markers: None,
            index: None,
            path: None,
        }
    }

    /// Interpret a Pipfile entry (`name = <value>`).
    pub fn from_entry(name: &str, value: &toml::Value) -> Result<Self, RequirementError> {
        let package = PackageName::from_str(name).map_err(|err| RequirementError(err.to_string()))?;

        match value {
            toml::Value::String(version) => Self::new(package).with_version(version),
            toml::Value::Table(table) => {
                let entry: PackageEntry = toml::Value::Table(table.clone())
                    .try_into()
                    .map_err(|err: toml::de::Error| RequirementError(err.message().to_owned()))?;
                entry.into_requirement(package)
            }
            other => Err(RequirementError(format!(
                "expected a version string or a table, found {}",
                crate::pipfile::error::type_name(other)
            ))),
        }
    }

    /// Attach a Pipfile version string, parsing it into [`Self::specs`].
    pub fn with_version(self, version: &str) -> Result<Self, RequirementError> {
        let specs = VersionSpecifiers::parse_pipfile(version)
            .map_err(|err| RequirementError(err.to_string()))?;
        Ok(Self {
            specs,
            version: Some(version.to_owned()),
            ..self
        })
    }

    #[must_use]
    pub fn with_extras(self, extras: Vec<ExtraName>) -> Self {
        Self { extras, ..self }
    }

    #[must_use]
    pub fn with_editable(self, editable: bool) -> Self {
        Self { editable, ..self }
    }

    #[must_use]
    pub fn with_vcs(self, vcs: VcsRequirement) -> Self {
        Self {
            vcs: Some(vcs),
            ..self
        }
    }

    pub fn name(&self) -> &PackageName {
        &self.name
    }

    pub fn extras(&self) -> &[ExtraName] {
        &self.extras
    }

    /// Parsed version constraint; `None` means any version.
    pub fn specs(&self) -> Option<&VersionSpecifiers> {
        self.specs.as_ref()
    }

    /// The version string as written in the Pipfile.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn vcs(&self) -> Option<&VcsRequirement> {
        self.vcs.as_ref()
    }

    /// PEP 508 environment markers.
    pub fn markers(&self) -> Option<&str> {
        self.markers.as_deref()
    }

    /// Name of the `[[source]]` to install from.
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Local path (`path` or `file` key).
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl fmt::Display for PackageRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.extras.is_empty() {
            let extras: Vec<&str> = self.extras.iter().map(ExtraName::as_str).collect();
            write!(f, "[{}]", extras.join(","))?;
        }
        if let Some(ref specs) = self.specs {
            write!(f, "{specs}")?;
        }
        if let Some(ref vcs) = self.vcs {
            write!(f, " @ {}+{}", vcs.kind, vcs.uri)?;
            if let Some(ref reference) = vcs.reference {
                write!(f, "@{reference}")?;
            }
            if let Some(ref subdirectory) = vcs.subdirectory {
                write!(f, "#subdirectory={subdirectory}")?;
            }
        } else if let Some(ref path) = self.path {
            write!(f, " @ {path}")?;
        }
        if let Some(ref markers) = self.markers {
            write!(f, "; {markers}")?;
        }
        Ok(())
    }
}

/// Why a package entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct RequirementError(String);

/// Raw table form of a package entry.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageEntry {
    version: Option<String>,
    #[serde(default)]
    extras: Vec<String>,
    markers: Option<String>,
    #[serde(default)]
    editable: bool,
    index: Option<String>,
    path: Option<String>,
    file: Option<String>,
    git: Option<String>,
    hg: Option<String>,
    svn: Option<String>,
    bzr: Option<String>,
    #[serde(rename = "ref")]
    reference: Option<String>,
    subdirectory: Option<String>,
    /// Marker shorthands, folded into `markers`.
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

impl PackageEntry {
    fn into_requirement(self, name: PackageName) -> Result<PackageRequirement, RequirementError> {
        let mut requirement = PackageRequirement::new(name);

        if let Some(ref version) = self.version {
            requirement = requirement.with_version(version)?;
        }

        let extras = self
            .extras
            .iter()
            .map(|extra| ExtraName::from_str(extra).map_err(|err| RequirementError(err.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        let sources: Vec<(VcsKind, &String)> = VcsKind::ALL
            .into_iter()
            .zip([&self.git, &self.hg, &self.svn, &self.bzr])
            .filter_map(|(kind, uri)| uri.as_ref().map(|uri| (kind, uri)))
            .collect();
        let vcs = match sources.as_slice() {
            [] => None,
            [(kind, uri)] => {
                let mut vcs = VcsRequirement::new(*kind, uri);
                if let Some(ref reference) = self.reference {
                    vcs = vcs.with_reference(reference);
                }
                if let Some(ref subdirectory) = self.subdirectory {
                    vcs = vcs.with_subdirectory(subdirectory);
                }
                Some(vcs)
            }
            _ => {
                return Err(RequirementError(
                    "only one of `git`, `hg`, `svn`, `bzr` may be given".to_owned(),
                ));
            }
        };

        let markers = self.markers();

        Ok(PackageRequirement {
            extras,
            editable: self.editable,
            vcs,
            markers,
            index: self.index,
            path: self.path.or(self.file),
            ..requirement
        })
    }

    /// Combine `markers` with the marker shorthand keys (e.g.
    /// `sys_platform = "== 'linux'"`).
    fn markers(&self) -> Option<String> {
        let shorthands = [
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
        ];

        let parts: Vec<String> = self
            .markers
            .iter()
            .cloned()
            .chain(
                shorthands
                    .into_iter()
                    .filter_map(|(key, value)| value.as_ref().map(|value| format!("{key} {value}"))),
            )
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" and "))
        }
    }
}
