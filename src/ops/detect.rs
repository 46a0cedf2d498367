//! Project inspection shared by `laraship detect` and `laraship generate`.

use std::path::{Path, PathBuf};

use crate::core::env_file::{EnvFile, ENV_FILE};
use crate::core::error::LarashipError;
use crate::core::manifest::{ComposerManifest, COMPOSER_FILE};
use crate::core::php_version::{
    Resolution, ResolutionSource, VersionResolver, SUPPORTED_VERSIONS,
};
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::shell::{Shell, Status};

/// What was learned about a Laravel project.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub root: PathBuf,
    pub php: Resolution,
    /// Required native extensions, `ext-` prefix stripped.
    pub extensions: Vec<String>,
    pub production: bool,
    /// The `.env` as read, before any rewrite.
    pub env: EnvFile,
}

impl ProjectInfo {
    pub fn env_path(&self) -> PathBuf {
        self.root.join(ENV_FILE)
    }
}

/// Check that `composer.json` and `.env` both exist under `root`.
pub fn validate_project(root: &Path) -> Result<(), LarashipError> {
    let manifest_path = root.join(COMPOSER_FILE);
    if !manifest_path.is_file() {
        return Err(LarashipError::ManifestMissing {
            path: manifest_path,
            reason: "file does not exist".to_string(),
        });
    }

    let env_path = root.join(ENV_FILE);
    if !env_path.is_file() {
        return Err(LarashipError::EnvironmentMissing { path: env_path });
    }

    Ok(())
}

/// Validate the project, then read its manifest and environment.
///
/// Reports each step on `shell`. An unsupported or missing PHP version is a
/// warning, never an error.
pub fn inspect_project(root: &Path, shell: &Shell) -> Result<ProjectInfo, LarashipError> {
    shell.status(Status::Checking, "project structure");
    validate_project(root)?;

    shell.status(Status::Reading, COMPOSER_FILE);
    let manifest_path = root.join(COMPOSER_FILE);
    let manifest = ComposerManifest::load(&manifest_path)?;

    let php = VersionResolver::default().resolve_requirement(manifest.php_constraint());
    match php_version_warning(&php, &manifest_path) {
        Some(warning) => {
            tracing::warn!("{}", warning.message);
            shell.diagnostic(&warning);
        }
        None => shell.status(Status::Detected, format!("PHP version {}", php.version)),
    }

    let extensions = manifest.native_extensions();
    if extensions.is_empty() {
        shell.diagnostic(&Diagnostic::note("No additional PHP extensions required"));
    } else {
        shell.status(
            Status::Detected,
            format!(
                "{} required PHP extensions ({})",
                extensions.len(),
                extensions.join(", ")
            ),
        );
    }

    shell.status(Status::Reading, ENV_FILE);
    let env = EnvFile::load(&root.join(ENV_FILE))?;
    let production = env.is_production();
    tracing::info!("environment loaded (production: {})", production);

    Ok(ProjectInfo {
        root: root.to_path_buf(),
        php,
        extensions,
        production,
        env,
    })
}

/// The warning for a version that was not taken from the manifest as-is.
fn php_version_warning(php: &Resolution, manifest_path: &Path) -> Option<Diagnostic> {
    match &php.source {
        ResolutionSource::Exact => None,
        ResolutionSource::Closest { requested } => Some(
            Diagnostic::warning(format!(
                "PHP {} detected but not supported. Using closest supported version {}",
                requested, php.version
            ))
            .with_location(manifest_path)
            .with_context(format!("supported versions: {}", SUPPORTED_VERSIONS.join(", "))),
        ),
        ResolutionSource::Default => Some(
            Diagnostic::warning(format!(
                "No PHP version specified in composer.json, using default {}",
                php.version
            ))
            .with_location(manifest_path)
            .with_suggestion(suggestions::NO_PHP_CONSTRAINT),
        ),
    }
}
