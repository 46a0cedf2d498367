//! Interactive questions asked before generation.
//!
//! Questions are asked one at a time, in a fixed order. Later questions
//! are skipped based on earlier answers. The [`Prompter`] trait is the seam
//! between the question flow and the terminal, so the flow can run against
//! scripted answers or plain defaults.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use rand::Rng;

use crate::core::answers::{Answers, DatabaseConfig, DatabaseCredentials, MigrationConfig};
use crate::core::error::LarashipError;

pub const RUN_MIGRATIONS: &str = "Run database migrations after container build?";
pub const CONFIRM_MIGRATIONS: &str =
    "WARNING: You are in production environment. Are you sure you want to run migrations?";
pub const RUN_SEEDERS: &str = "Run database seeders after migrations?";
pub const CONFIRM_SEEDERS: &str =
    "WARNING: You are in production environment. Are you sure you want to run seeders?";
pub const DATABASE_SETUP: &str = "Database configuration:";
pub const DATABASE_NAME: &str = "Database name:";
pub const DATABASE_USER: &str = "Database username:";
pub const DATABASE_PASSWORD: &str = "Set MySQL root password:";

/// Choices for [`DATABASE_SETUP`]; index 0 is the default.
pub const DATABASE_CHOICES: [&str; 2] = [
    "Use existing database server (from .env)",
    "Create new MySQL container",
];

const PASSWORD_LEN: usize = 16;
const PASSWORD_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Asks the operator one question at a time.
pub trait Prompter {
    /// Yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, LarashipError>;

    /// Free-text question. An empty answer takes `default`.
    fn input(&mut self, question: &str, default: &str) -> Result<String, LarashipError>;

    /// Single choice; returns the chosen index.
    fn select(
        &mut self,
        question: &str,
        items: &[&str],
        default: usize,
    ) -> Result<usize, LarashipError>;
}

/// Prompts on the terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn aborted(question: &str, err: impl std::fmt::Display) -> LarashipError {
    LarashipError::PromptAborted {
        question: question.to_string(),
        message: err.to_string(),
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, LarashipError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(|e| aborted(question, e))
    }

    fn input(&mut self, question: &str, default: &str) -> Result<String, LarashipError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .default(default.to_string())
            .interact_text()
            .map_err(|e| aborted(question, e))
    }

    fn select(
        &mut self,
        question: &str,
        items: &[&str],
        default: usize,
    ) -> Result<usize, LarashipError> {
        Select::with_theme(&self.theme)
            .with_prompt(question)
            .items(items)
            .default(default)
            .interact()
            .map_err(|e| aborted(question, e))
    }
}

/// Answers every question with its default.
#[derive(Debug, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, LarashipError> {
        tracing::debug!("{} -> {}", question, default);
        Ok(default)
    }

    fn input(&mut self, question: &str, default: &str) -> Result<String, LarashipError> {
        tracing::debug!("{} -> {}", question, default);
        Ok(default.to_string())
    }

    fn select(
        &mut self,
        question: &str,
        items: &[&str],
        default: usize,
    ) -> Result<usize, LarashipError> {
        tracing::debug!("{} -> {}", question, items.get(default).unwrap_or(&"?"));
        Ok(default)
    }
}

/// Defaults offered when a database container is provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseDefaults {
    pub name: String,
    pub user: String,
}

impl Default for DatabaseDefaults {
    fn default() -> Self {
        DatabaseDefaults {
            name: "laravel".to_string(),
            user: "laravel_user".to_string(),
        }
    }
}

/// Ask the migration and seeding questions.
///
/// Outside production the run questions default to yes and no confirmation
/// is asked. In production they default to no, and a yes must be confirmed.
pub fn collect_migration_config(
    prompter: &mut dyn Prompter,
    is_production: bool,
) -> Result<MigrationConfig, LarashipError> {
    let mut config = MigrationConfig {
        run_migrations: prompter.confirm(RUN_MIGRATIONS, !is_production)?,
        ..MigrationConfig::default()
    };

    if is_production && config.run_migrations {
        config.confirm_migrations = prompter.confirm(CONFIRM_MIGRATIONS, false)?;
    }

    config.run_seeders = prompter.confirm(RUN_SEEDERS, !is_production)?;

    if is_production && config.run_seeders {
        config.confirm_seeders = prompter.confirm(CONFIRM_SEEDERS, false)?;
    }

    Ok(config)
}

/// Ask how the database is provided and, for a new container, its credentials.
pub fn collect_database_config<R: Rng>(
    prompter: &mut dyn Prompter,
    rng: &mut R,
    defaults: &DatabaseDefaults,
) -> Result<DatabaseConfig, LarashipError> {
    let choice = prompter.select(DATABASE_SETUP, &DATABASE_CHOICES, 0)?;
    if choice == 0 {
        return Ok(DatabaseConfig::existing());
    }

    let name = prompter.input(DATABASE_NAME, &defaults.name)?;
    let user = prompter.input(DATABASE_USER, &defaults.user)?;
    let password = prompter.input(DATABASE_PASSWORD, &generate_password(rng))?;

    Ok(DatabaseConfig::new_container(DatabaseCredentials {
        name,
        user,
        password,
    }))
}

/// Ask every question, migrations first.
pub fn collect_answers<R: Rng>(
    prompter: &mut dyn Prompter,
    rng: &mut R,
    is_production: bool,
    defaults: &DatabaseDefaults,
) -> Result<Answers, LarashipError> {
    let migrations = collect_migration_config(prompter, is_production)?;
    let database = collect_database_config(prompter, rng, defaults)?;
    Ok(Answers {
        migrations,
        database,
    })
}

/// A random 16-character lowercase alphanumeric password.
pub fn generate_password<R: Rng>(rng: &mut R) -> String {
    (0..PASSWORD_LEN)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::answers::DatabaseMode;
    use crate::test_support::{Answer, ScriptedPrompter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_local_asks_two_questions() {
        let mut prompter = ScriptedPrompter::new([Answer::Default, Answer::Default]);
        let config = collect_migration_config(&mut prompter, false).unwrap();

        assert_eq!(prompter.asked(), &[RUN_MIGRATIONS, RUN_SEEDERS]);
        assert!(config.run_migrations);
        assert!(config.run_seeders);
        assert!(!config.confirm_migrations);
        assert!(!config.confirm_seeders);
    }

    #[test]
    fn test_production_defaults_to_no() {
        let mut prompter = ScriptedPrompter::new([Answer::Default, Answer::Default]);
        let config = collect_migration_config(&mut prompter, true).unwrap();

        assert_eq!(prompter.asked(), &[RUN_MIGRATIONS, RUN_SEEDERS]);
        assert_eq!(config, MigrationConfig::default());
    }

    #[test]
    fn test_production_asks_confirmations() {
        let mut prompter = ScriptedPrompter::new([
            Answer::Yes,
            Answer::Yes,
            Answer::Yes,
            Answer::Default,
        ]);
        let config = collect_migration_config(&mut prompter, true).unwrap();

        assert_eq!(
            prompter.asked(),
            &[RUN_MIGRATIONS, CONFIRM_MIGRATIONS, RUN_SEEDERS, CONFIRM_SEEDERS]
        );
        assert!(config.confirm_migrations);
        assert!(!config.confirm_seeders);
        assert_eq!(
            config.post_build_command(true).as_deref(),
            Some("php artisan migrate --force")
        );
    }

    #[test]
    fn test_seeders_asked_even_without_migrations() {
        let mut prompter = ScriptedPrompter::new([Answer::No, Answer::Yes]);
        let config = collect_migration_config(&mut prompter, false).unwrap();
        assert!(!config.run_migrations);
        assert!(config.run_seeders);
    }

    #[test]
    fn test_existing_database_by_default() {
        let mut prompter = ScriptedPrompter::new([Answer::Default]);
        let config =
            collect_database_config(&mut prompter, &mut rng(), &DatabaseDefaults::default())
                .unwrap();

        assert_eq!(config.mode(), DatabaseMode::Existing);
        assert_eq!(prompter.asked(), &[DATABASE_SETUP]);
    }

    #[test]
    fn test_new_database_with_defaults() {
        let mut prompter = ScriptedPrompter::new([
            Answer::Choice(1),
            Answer::Default,
            Answer::Default,
            Answer::Default,
        ]);
        let config =
            collect_database_config(&mut prompter, &mut rng(), &DatabaseDefaults::default())
                .unwrap();

        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.name, "laravel");
        assert_eq!(credentials.user, "laravel_user");
        assert_eq!(credentials.password, generate_password(&mut rng()));
    }

    #[test]
    fn test_new_database_with_answers() {
        let mut prompter = ScriptedPrompter::new([
            Answer::Choice(1),
            Answer::Text("shop"),
            Answer::Text("shop_user"),
            Answer::Text("secret123"),
        ]);
        let config =
            collect_database_config(&mut prompter, &mut rng(), &DatabaseDefaults::default())
                .unwrap();

        assert_eq!(
            config.credentials(),
            Some(&DatabaseCredentials {
                name: "shop".to_string(),
                user: "shop_user".to_string(),
                password: "secret123".to_string(),
            })
        );
    }

    #[test]
    fn test_abort_propagates() {
        let mut prompter = ScriptedPrompter::new([Answer::Yes, Answer::Abort]);
        let err = collect_migration_config(&mut prompter, false).unwrap_err();
        assert!(matches!(err, LarashipError::PromptAborted { ref question, .. } if question == RUN_SEEDERS));
    }

    #[test]
    fn test_generate_password() {
        let password = generate_password(&mut rng());
        assert_eq!(password.len(), 16);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_defaults_prompter() {
        let answers = collect_answers(
            &mut DefaultsPrompter,
            &mut rng(),
            false,
            &DatabaseDefaults::default(),
        )
        .unwrap();

        assert!(answers.migrations.run_migrations);
        assert!(answers.migrations.run_seeders);
        assert_eq!(answers.database.mode(), DatabaseMode::Existing);
    }
}
