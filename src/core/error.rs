//! Fatal error kinds for a generation run.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error that terminates a run.
///
/// None of these are retried. Files written before the error stay on disk.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum LarashipError {
    /// `composer.json` is absent or is not valid JSON.
    #[error("composer.json not found. Are you in a Laravel project directory?")]
    #[diagnostic(
        code(laraship::manifest_missing),
        help("Run laraship from the root of a Laravel project")
    )]
    ManifestMissing { path: PathBuf, reason: String },

    /// `.env` is absent.
    #[error(".env file not found")]
    #[diagnostic(
        code(laraship::environment_missing),
        help("Copy `.env.example` to `.env` and fill in your settings")
    )]
    EnvironmentMissing { path: PathBuf },

    /// The operator cancelled a question, or the terminal went away.
    #[error("prompt aborted: {question}")]
    #[diagnostic(
        code(laraship::prompt_aborted),
        help("Re-run with `laraship generate --yes` to accept every default without prompting")
    )]
    PromptAborted { question: String, message: String },

    /// Reading or writing a project file failed for a reason other than absence.
    #[error("failed to {action} `{}`", path.display())]
    #[diagnostic(code(laraship::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LarashipError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LarashipError::ManifestMissing { path, reason } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_context(reason.clone())
                .with_suggestion(suggestions::NO_MANIFEST),

            LarashipError::EnvironmentMissing { path } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_suggestion(suggestions::NO_ENV),

            LarashipError::PromptAborted { message, .. } => {
                let mut diag = Diagnostic::error(self.to_string())
                    .with_suggestion(suggestions::NON_INTERACTIVE);
                if !message.is_empty() {
                    diag = diag.with_context(message.clone());
                }
                diag
            }

            LarashipError::Io { path, source, .. } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_context(source.to_string()),
        }
    }
}
