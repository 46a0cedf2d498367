//! composer.json reading.
//!
//! Only two things are taken from the manifest: the `php` platform
//! requirement and the `ext-*` requirements naming native extensions.
//! Everything else in the document is ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::core::error::LarashipError;

/// File name of the dependency manifest.
pub const COMPOSER_FILE: &str = "composer.json";

/// Requirement key holding the PHP runtime constraint.
pub const RUNTIME_PACKAGE: &str = "php";

/// Prefix marking a requirement as a native PHP extension.
pub const EXTENSION_PREFIX: &str = "ext-";

/// The parts of composer.json laraship cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposerManifest {
    /// The `require` table. Kept as a raw value because PHP encodes an
    /// empty object as `[]`.
    #[serde(default)]
    require: Value,
}

impl ComposerManifest {
    /// Parse manifest contents.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Load and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, LarashipError> {
        if !path.is_file() {
            return Err(LarashipError::ManifestMissing {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| LarashipError::ManifestMissing {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let manifest = Self::parse(&contents).map_err(|e| LarashipError::ManifestMissing {
            path: path.to_path_buf(),
            reason: format!("invalid JSON: {}", e),
        })?;

        tracing::debug!(
            "loaded {} ({} requirements)",
            path.display(),
            manifest.requirements().count()
        );

        Ok(manifest)
    }

    /// Iterate `(package, constraint)` pairs of the `require` table.
    ///
    /// Non-string constraints are skipped.
    pub fn requirements(&self) -> impl Iterator<Item = (&str, &str)> {
        self.require
            .as_object()
            .into_iter()
            .flat_map(|map| map.iter())
            .filter_map(|(name, constraint)| Some((name.as_str(), constraint.as_str()?)))
    }

    /// The raw PHP constraint, e.g. `^8.1` or `^7.3|^8.0`.
    pub fn php_constraint(&self) -> Option<&str> {
        self.requirements()
            .find(|(name, _)| *name == RUNTIME_PACKAGE)
            .map(|(_, constraint)| constraint)
    }

    /// Names of required native extensions with the `ext-` prefix stripped.
    pub fn native_extensions(&self) -> Vec<String> {
        self.requirements()
            .filter_map(|(name, _)| name.strip_prefix(EXTENSION_PREFIX))
            .map(str::to_string)
            .collect()
    }
}
