//! Operator answers collected before generation.

use std::fmt;

use serde::Serialize;

/// Command that runs pending migrations.
pub const MIGRATE_COMMAND: &str = "php artisan migrate --force";

/// Command that runs database seeders.
pub const SEED_COMMAND: &str = "php artisan db:seed --force";

/// Migration and seeding choices.
///
/// The `confirm_*` flags are only asked for in production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationConfig {
    pub run_migrations: bool,
    pub confirm_migrations: bool,
    pub run_seeders: bool,
    pub confirm_seeders: bool,
}

impl MigrationConfig {
    /// Whether migrations actually run for this environment.
    pub fn migrations_enabled(&self, is_production: bool) -> bool {
        self.run_migrations && (!is_production || self.confirm_migrations)
    }

    /// Whether seeders actually run for this environment.
    pub fn seeders_enabled(&self, is_production: bool) -> bool {
        self.run_seeders && (!is_production || self.confirm_seeders)
    }

    /// The post-build command line, or `None` when nothing runs.
    pub fn post_build_command(&self, is_production: bool) -> Option<String> {
        let mut commands = Vec::new();
        if self.migrations_enabled(is_production) {
            commands.push(MIGRATE_COMMAND);
        }
        if self.seeders_enabled(is_production) {
            commands.push(SEED_COMMAND);
        }

        (!commands.is_empty()).then(|| commands.join(" && "))
    }
}

/// Where the application's database comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseMode {
    /// Keep the connection already configured in `.env`.
    #[default]
    Existing,
    /// Provision a MySQL container next to the app.
    New,
}

impl fmt::Display for DatabaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseMode::Existing => write!(f, "existing"),
            DatabaseMode::New => write!(f, "new"),
        }
    }
}

/// Credentials for a provisioned database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseCredentials {
    pub name: String,
    pub user: String,
    pub password: String,
}

/// Database choice. Credentials are present exactly when the mode is `New`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseConfig {
    credentials: Option<DatabaseCredentials>,
}

impl DatabaseConfig {
    /// Reuse the database configured in `.env`.
    pub fn existing() -> Self {
        DatabaseConfig { credentials: None }
    }

    /// Provision a new database container.
    pub fn new_container(credentials: DatabaseCredentials) -> Self {
        DatabaseConfig {
            credentials: Some(credentials),
        }
    }

    pub fn mode(&self) -> DatabaseMode {
        if self.credentials.is_some() {
            DatabaseMode::New
        } else {
            DatabaseMode::Existing
        }
    }

    /// Credentials of the provisioned database, if any.
    pub fn credentials(&self) -> Option<&DatabaseCredentials> {
        self.credentials.as_ref()
    }
}

/// Everything the operator answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub migrations: MigrationConfig,
    pub database: DatabaseConfig,
}
