//! Normalized package and extra names.
//!
//! Names are compared the way package indexes compare them: case-insensitive,
//! with runs of `-`, `_`, and `.` treated as a single `-`.

use std::fmt;
use std::str::FromStr;

/// A validated, normalized distribution name (e.g., `Django_REST.framework`
/// becomes `django-rest-framework`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

/// A validated, normalized extra name (e.g., `Security` becomes `security`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtraName(String);

/// The name was empty or used characters outside `[A-Za-z0-9._-]`, or did
/// not start and end with a letter or digit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid name: names must start and end with a letter or digit and only contain -, _, ., and alphanumerics")]
pub struct InvalidNameError(String);

impl PackageName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ExtraName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PackageName {
    type Err = InvalidNameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        validate_and_normalize(name).map(Self)
    }
}

impl FromStr for ExtraName {
    type Err = InvalidNameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        validate_and_normalize(name).map(Self)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ExtraName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ExtraName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_and_normalize(name: &str) -> Result<String, InvalidNameError> {
    let is_separator = |c: char| matches!(c, '-' | '_' | '.');

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_separator(c));
    let valid_ends = name.starts_with(|c: char| c.is_ascii_alphanumeric())
        && name.ends_with(|c: char| c.is_ascii_alphanumeric());
    if !valid_chars || !valid_ends {
        return Err(InvalidNameError(name.to_owned()));
    }

    let mut normalized = String::with_capacity(name.len());
    let mut last_was_separator = false;
    for c in name.chars() {
        if is_separator(c) {
            if !last_was_separator {
                normalized.push('-');
            }
            last_was_separator = true;
        } else {
            normalized.push(c.to_ascii_lowercase());
            last_was_separator = false;
        }
    }
    Ok(normalized)
}
