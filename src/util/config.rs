//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.laraship/config.toml` - user-wide defaults
//! - Project: `laraship.toml` next to `composer.json` - project overrides
//!
//! Project config takes precedence over global config. Missing files give
//! defaults; a malformed file is reported and ignored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ops::prompts::DatabaseDefaults;

pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";
pub const DEFAULT_ENTRYPOINT: &str = "docker-entrypoint.sh";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "laraship.toml";

/// Laraship configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output file names
    pub output: OutputConfig,

    /// Defaults offered for a new database container
    pub database: DatabaseSettings,
}

/// Output file names, relative to the project directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dockerfile: Option<String>,
    pub compose: Option<String>,
    pub entrypoint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub name: Option<String>,
    pub user: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.output.dockerfile.is_some() {
            self.output.dockerfile = other.output.dockerfile;
        }
        if other.output.compose.is_some() {
            self.output.compose = other.output.compose;
        }
        if other.output.entrypoint.is_some() {
            self.output.entrypoint = other.output.entrypoint;
        }

        if other.database.name.is_some() {
            self.database.name = other.database.name;
        }
        if other.database.user.is_some() {
            self.database.user = other.database.user;
        }
    }

    pub fn dockerfile_name(&self) -> &str {
        self.output.dockerfile.as_deref().unwrap_or(DEFAULT_DOCKERFILE)
    }

    pub fn compose_name(&self) -> &str {
        self.output.compose.as_deref().unwrap_or(DEFAULT_COMPOSE_FILE)
    }

    pub fn entrypoint_name(&self) -> &str {
        self.output.entrypoint.as_deref().unwrap_or(DEFAULT_ENTRYPOINT)
    }

    /// Defaults for the database name and user questions.
    pub fn database_defaults(&self) -> DatabaseDefaults {
        let mut defaults = DatabaseDefaults::default();
        if let Some(name) = &self.database.name {
            defaults.name = name.clone();
        }
        if let Some(user) = &self.database.user {
            defaults.user = user.clone();
        }
        defaults
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`laraship.toml`)
/// 2. Global config (`~/.laraship/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Load the configuration that applies to a project directory.
pub fn load_project_config(project_root: &Path) -> Config {
    let project_path = project_config_path(project_root);
    match global_config_path() {
        Some(global_path) => load_config(&global_path, &project_path),
        None => Config::load_or_default(&project_path),
    }
}

/// Get the global laraship config directory (`~/.laraship`).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".laraship"))
}

/// Get the global config path (`~/.laraship/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.dockerfile_name(), "Dockerfile");
        assert_eq!(config.compose_name(), "docker-compose.yml");
        assert_eq!(config.entrypoint_name(), "docker-entrypoint.sh");
        assert_eq!(config.database_defaults(), DatabaseDefaults::default());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[output]
compose = "compose.yaml"

[database]
name = "shop"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.compose_name(), "compose.yaml");
        assert_eq!(config.dockerfile_name(), "Dockerfile");

        let defaults = config.database_defaults();
        assert_eq!(defaults.name, "shop");
        assert_eq!(defaults.user, "laravel_user");
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.output.dockerfile = Some("Dockerfile.prod".to_string());
        base.database.user = Some("admin".to_string());

        let mut override_cfg = Config::default();
        override_cfg.output.dockerfile = Some("Containerfile".to_string());

        base.merge(override_cfg);

        assert_eq!(base.dockerfile_name(), "Containerfile");
        assert_eq!(base.database.user.as_deref(), Some("admin"));
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("laraship.toml");
        std::fs::write(&config_path, "[output\ncompose = ").unwrap();

        assert!(Config::load(&config_path).is_err());
        let config = Config::load_or_default(&config_path);
        assert_eq!(config.compose_name(), DEFAULT_COMPOSE_FILE);
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("laraship.toml");

        std::fs::write(
            &global_path,
            r#"
[output]
dockerfile = "Dockerfile.global"
compose = "compose.global.yml"
"#,
        )
        .unwrap();
        std::fs::write(
            &project_path,
            r#"
[output]
compose = "compose.yml"
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);
        assert_eq!(config.dockerfile_name(), "Dockerfile.global");
        assert_eq!(config.compose_name(), "compose.yml");
    }

    #[test]
    fn test_missing_files_give_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("a.toml"), &tmp.path().join("b.toml"));
        assert!(config.output.dockerfile.is_none());
        assert!(config.database.name.is_none());
    }
}
