//! Implementation of `laraship generate`.
//!
//! Runs strictly in order: inspect the project, ask the questions, rewrite
//! `.env` for a new database, then write the Dockerfile, the compose file
//! and optionally the entrypoint script. Nothing is rolled back on failure;
//! files written before an error stay on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use rand::Rng;

use crate::core::answers::{Answers, DatabaseConfig};
use crate::core::env_file::EnvFile;
use crate::core::error::LarashipError;
use crate::core::php_version::Resolution;
use crate::ops::detect::inspect_project;
use crate::ops::prompts::{collect_answers, Prompter};
use crate::templates::compose::{generate_compose, PortAssignment};
use crate::templates::dockerfile::generate_dockerfile;
use crate::templates::entrypoint::generate_entrypoint;
use crate::util::config::Config;
use crate::util::fs::{set_executable, write_string};
use crate::util::shell::{Shell, Status};

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Laravel project root
    pub path: PathBuf,

    /// Also write the container entrypoint script
    pub entrypoint: bool,
}

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub php: Resolution,
    pub production: bool,
    pub answers: Answers,
    pub post_build_command: Option<String>,
    /// Written files, in write order.
    pub files: Vec<PathBuf>,
    /// Whether `.env` was rewritten.
    pub env_updated: bool,
    pub ports: PortAssignment,
}

/// Generate the container files for the project at `opts.path`.
pub fn generate<R: Rng>(
    opts: &GenerateOptions,
    config: &Config,
    prompter: &mut dyn Prompter,
    rng: &mut R,
    shell: &Arc<Shell>,
) -> Result<GenerateResult> {
    let span = shell.span(Status::Generating, "container files");
    let info = inspect_project(&opts.path, shell)?;

    if info.production {
        print_production_banner(shell);
    }

    let answers = collect_answers(prompter, rng, info.production, &config.database_defaults())?;
    tracing::info!(
        "database: {}, migrations: {:?}",
        answers.database.mode(),
        answers.migrations
    );

    let env_updated = update_env_file(&info.env_path(), &info.env, &answers.database)?;
    if env_updated {
        shell.status(Status::Updated, info.env_path().display());
    }

    let post_build_command = answers.migrations.post_build_command(info.production);
    let mut files = Vec::new();

    let dockerfile_path = opts.path.join(config.dockerfile_name());
    write_output(
        shell,
        &dockerfile_path,
        &generate_dockerfile(post_build_command.as_deref()),
    )?;
    files.push(dockerfile_path);

    let compose = generate_compose(
        &info.env,
        &answers.database,
        config.dockerfile_name(),
        rng,
    );
    let compose_path = opts.path.join(config.compose_name());
    write_output(shell, &compose_path, &compose.content)?;
    files.push(compose_path);

    if opts.entrypoint {
        let entrypoint_path = opts.path.join(config.entrypoint_name());
        write_output(
            shell,
            &entrypoint_path,
            &generate_entrypoint(post_build_command.as_deref()),
        )?;
        set_executable(&entrypoint_path)?;
        files.push(entrypoint_path);
    }

    span.finish_with_message(format!("{} files", files.len()));

    Ok(GenerateResult {
        php: info.php,
        production: info.production,
        answers,
        post_build_command,
        files,
        env_updated,
        ports: compose.ports,
    })
}

/// Point `.env` at a provisioned database container.
///
/// Does nothing unless `database` provisions a new container. Otherwise
/// rewrites the database keys of `env` and writes the whole file back to
/// `path`. Returns whether the file was written.
pub fn update_env_file(
    path: &Path,
    env: &EnvFile,
    database: &DatabaseConfig,
) -> Result<bool, LarashipError> {
    let Some(credentials) = database.credentials() else {
        return Ok(false);
    };

    let mut updated = env.clone();
    let rewritten = updated.rewrite_database(credentials);
    tracing::debug!("rewrote {} database lines in {}", rewritten, path.display());

    std::fs::write(path, updated.to_string()).map_err(|source| LarashipError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })?;

    Ok(true)
}

fn write_output(shell: &Shell, path: &Path, contents: &str) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let spinner = shell.spinner(format!("Generating {}", name));
    write_string(path, contents)?;
    spinner.finish();

    shell.status(Status::Created, name);
    Ok(())
}

fn print_production_banner(shell: &Shell) {
    shell.warn("Production environment detected");
    shell.line("You are running in a production environment.");
    shell.line("Migrations and seeders need an extra confirmation.");
}

/// Print the closing summary, or the `generated` event in JSON mode.
pub fn report(result: &GenerateResult, shell: &Shell) {
    shell.json_event(&serde_json::json!({
        "reason": "generated",
        "php_version": result.php.version,
        "production": result.production,
        "database": result.answers.database.mode(),
        "migrations": result.answers.migrations,
        "post_build_command": result.post_build_command,
        "files": result.files,
        "env_updated": result.env_updated,
        "ports": result.ports,
    }));

    shell.status(Status::Finished, "Success! Generated files:");
    for file in &result.files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        shell.line(format!("- {}", name));
    }
    if result.env_updated {
        shell.line("- Updated .env");
    }
    if let Some(port) = result.ports.database {
        shell.note(format!("MySQL will be available on port {}", port));
    }
}
