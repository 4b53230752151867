//! Environment-variable substitution for Pipfile values.
//!
//! String values may reference the process environment as `$NAME` or
//! `${NAME}`. References to unset variables are left exactly as written, so
//! `"$HOME/x"` expands but `"$NOT_SET/x"` survives untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use tracing::trace;

/// `$name` with an ASCII word name, or `${anything-but-a-brace}`.
static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z0-9_]+|\{[^}]*\})").expect("variable pattern is valid")
});

/// A snapshot of environment variables to expand against.
///
/// Capturing once up front keeps a parse deterministic even if the process
/// environment changes while it runs.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: FxHashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped; they can
    /// never match a reference in a TOML string anyway.
    pub fn capture() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Look up a variable in the snapshot.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Expand every `$NAME` / `${NAME}` reference in `input`.
    pub fn expand<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if !input.contains('$') {
            return Cow::Borrowed(input);
        }

        VARIABLE.replace_all(input, |caps: &Captures<'_>| {
            let reference = &caps[1];
            let name = reference
                .strip_prefix('{')
                .and_then(|name| name.strip_suffix('}'))
                .unwrap_or(reference);
            match self.get(name) {
                Some(value) => {
                    trace!("Expanding ${name}");
                    value.to_owned()
                }
                None => caps[0].to_owned(),
            }
        })
    }

    /// Expand references in every string leaf of `value`.
    ///
    /// Tables and arrays are rebuilt with the same keys and order; every
    /// other scalar is returned as-is.
    pub fn substitute(&self, value: toml::Value) -> toml::Value {
        match value {
            toml::Value::String(string) => {
                let expanded = match self.expand(&string) {
                    Cow::Owned(expanded) => Some(expanded),
                    Cow::Borrowed(_) => None,
                };
                toml::Value::String(expanded.unwrap_or(string))
            }
            toml::Value::Array(array) => toml::Value::Array(
                array
                    .into_iter()
                    .map(|element| self.substitute(element))
                    .collect(),
            ),
            toml::Value::Table(table) => toml::Value::Table(self.substitute_table(table)),
            scalar => scalar,
        }
    }

    /// [`Environment::substitute`] for a table; keys are not expanded.
    pub fn substitute_table(&self, table: toml::Table) -> toml::Table {
        table
            .into_iter()
            .map(|(key, value)| (key, self.substitute(value)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
