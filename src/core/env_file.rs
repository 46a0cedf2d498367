//! `.env` file model.
//!
//! The file is kept as an ordered list of lines so it can be written back
//! byte-for-byte, with only the rewritten keys changed. Each line knows its
//! `KEY=value` split when it has one.
//!
//! Variable lookups go through `dotenv`, so quoting, inline comments and the
//! `export` prefix are read the way Laravel reads them.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::answers::DatabaseCredentials;
use crate::core::error::LarashipError;

/// File name of the environment file.
pub const ENV_FILE: &str = ".env";

/// Prefix shared by all database connection keys.
pub const DB_PREFIX: &str = "DB_";

/// Value written to `DB_HOST` when a database container is provisioned.
pub const PROVISIONED_DB_HOST: &str = "db";

/// One line of an environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLine {
    raw: String,
    entry: Option<(String, String)>,
}

impl EnvLine {
    /// Classify a raw line.
    ///
    /// Only the first `=` splits; the value keeps any later `=` characters.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();

        let entry = if trimmed.is_empty() || trimmed.starts_with('#') {
            None
        } else {
            raw.split_once('=').and_then(|(key, value)| {
                let key = key.trim();
                (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
            })
        };

        EnvLine { raw, entry }
    }

    /// The line exactly as it appears in the file.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The key, for `KEY=value` lines.
    pub fn key(&self) -> Option<&str> {
        self.entry.as_ref().map(|(k, _)| k.as_str())
    }

    /// The value as written, quotes included.
    pub fn value(&self) -> Option<&str> {
        self.entry.as_ref().map(|(_, v)| v.as_str())
    }

    /// Blank lines, comments and lines without a `KEY=` part.
    pub fn is_entry(&self) -> bool {
        self.entry.is_some()
    }
}

/// An environment file as an ordered sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    lines: Vec<EnvLine>,
    vars: BTreeMap<String, String>,
}

impl EnvFile {
    /// Split contents into lines. Joining them with `\n` gives the input back.
    pub fn parse(contents: &str) -> Self {
        EnvFile {
            lines: contents.split('\n').map(EnvLine::parse).collect(),
            vars: parse_vars(contents),
        }
    }

    /// Read and parse the environment file at `path`.
    ///
    /// Only a missing file is `EnvironmentMissing`; any other read failure
    /// is reported as `Io` with its cause.
    pub fn load(path: &Path) -> Result<Self, LarashipError> {
        let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LarashipError::EnvironmentMissing {
                path: path.to_path_buf(),
            },
            _ => LarashipError::Io {
                action: "read",
                path: path.to_path_buf(),
                source,
            },
        })?;

        let env = Self::parse(&contents);
        tracing::debug!(
            "loaded {} ({} lines, {} variables)",
            path.display(),
            env.lines.len(),
            env.vars.len()
        );
        Ok(env)
    }

    /// All lines in file order.
    pub fn lines(&self) -> &[EnvLine] {
        &self.lines
    }

    /// Variables as dotenv reads them. Later definitions win.
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Look up a variable as dotenv reads it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether `APP_ENV` is exactly `production`.
    pub fn is_production(&self) -> bool {
        self.get("APP_ENV") == Some("production")
    }

    /// Point the database keys at a provisioned container.
    ///
    /// Rewrites every line starting with `DB_HOST=`, `DB_DATABASE=`,
    /// `DB_USERNAME=` or `DB_PASSWORD=`; all other lines are untouched.
    /// Returns the number of lines rewritten.
    pub fn rewrite_database(&mut self, credentials: &DatabaseCredentials) -> usize {
        let replacements = [
            ("DB_HOST", PROVISIONED_DB_HOST),
            ("DB_DATABASE", credentials.name.as_str()),
            ("DB_USERNAME", credentials.user.as_str()),
            ("DB_PASSWORD", credentials.password.as_str()),
        ];

        let mut rewritten = 0;
        for line in &mut self.lines {
            let replacement = replacements.iter().find(|(key, _)| {
                line.raw
                    .strip_prefix(key)
                    .is_some_and(|rest| rest.starts_with('='))
            });

            if let Some((key, value)) = replacement {
                *line = EnvLine::parse(format!("{}={}", key, value));
                rewritten += 1;
            }
        }

        if rewritten > 0 {
            self.vars = parse_vars(&self.to_string());
        }
        rewritten
    }
}

impl fmt::Display for EnvFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line.raw())?;
        }
        Ok(())
    }
}

fn parse_vars(contents: &str) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    for item in dotenv::from_read_iter(contents.as_bytes()) {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(err) => tracing::debug!("skipping unreadable .env line: {}", err),
        }
    }
    vars
}
