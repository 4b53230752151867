//! Pipfile parsing and data model for ripfile.
//!
//! Loading happens in two steps:
//!
//! 1. [`PipfileParser`] reads the TOML, expands `$VAR` / `${VAR}` references
//!    in string values, and reshapes the document into [`ManifestData`]:
//!    - `[[source]]` -> `_meta.sources` (default: a single `pypi` source)
//!    - `[requires]` -> `_meta.requires`
//!    - `[packages]` -> `default`
//!    - `[dev-packages]` -> `develop`
//! 2. [`Pipfile::from_manifest`] turns that mapping into typed records
//!    ([`Source`], [`Requires`], [`RequirementSet`]s of
//!    [`PackageRequirement`]s).
//!
//! [`load`] does both, discovering the Pipfile when no path is given.

pub mod discovery;
pub mod env;
mod error;
mod lockfile;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod requirement;

pub use discovery::find_pipfile;
pub use env::Environment;
pub use error::Error;
pub use lockfile::PIPFILE_SPEC;
pub use model::{Pipfile, RequirementSet, Requires, Source, load};
pub use normalize::{ExtraName, PackageName};
pub use parser::{Group, ManifestData, ManifestMeta, PipfileParser};
pub use requirement::{
    PackageRequirement, VcsKind, VcsRequirement, VersionSpecifier, VersionSpecifiers,
};
