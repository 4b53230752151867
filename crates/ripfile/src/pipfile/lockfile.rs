//! Pipfile content hash and the `Pipfile.lock` header.
//!
//! pipenv records a SHA-256 of the normalized Pipfile mapping in
//! `Pipfile.lock` so it can tell when the lockfile is stale. The header built
//! here carries that hash plus the unresolved `default` / `develop` groups;
//! nothing is resolved.

use sha2::{Digest, Sha256};

use crate::pipfile::model::Pipfile;
use crate::pipfile::parser::ManifestData;

/// `Pipfile.lock` format version written to `_meta.pipfile-spec`.
pub const PIPFILE_SPEC: u32 = 6;

impl ManifestData {
    /// Compute the Pipfile content hash for the `_meta.hash` field.
    ///
    /// Matches pipenv's algorithm: SHA256 of a JSON string built from the
    /// normalized mapping with sorted keys and compact separators (`","`,
    /// `":"`).
    pub fn hash(&self) -> String {
        // `serde_json::Map` is a `BTreeMap`, so keys serialize sorted.
        let json = self.to_json().to_string();
        let hash = Sha256::digest(json.as_bytes());
        format!("{hash:x}")
    }

    /// The `Pipfile.lock` header: the mapping with `_meta.hash` and
    /// `_meta.pipfile-spec` added.
    pub fn lock(&self) -> serde_json::Value {
        let hash = self.hash();
        let mut lock = self.to_json();
        if let Some(meta) = lock.get_mut("_meta").and_then(serde_json::Value::as_object_mut) {
            meta.insert("hash".to_owned(), serde_json::json!({ "sha256": hash }));
            meta.insert("pipfile-spec".to_owned(), PIPFILE_SPEC.into());
        }
        lock
    }
}

impl Pipfile {
    /// See [`ManifestData::hash`].
    pub fn hash(&self) -> String {
        self.data().hash()
    }

    /// See [`ManifestData::lock`].
    pub fn lock(&self) -> serde_json::Value {
        self.data().lock()
    }
}
