//! Laravel project fixtures.

use std::path::Path;

use crate::core::env_file::ENV_FILE;
use crate::core::manifest::COMPOSER_FILE;

/// `.env` shipped with a fresh Laravel 10 project.
pub const LOCAL_ENV: &str = "APP_NAME=Laravel
APP_ENV=local
APP_KEY=base64:Zm9vYmFy=
APP_DEBUG=true
APP_URL=http://localhost:8000

LOG_CHANNEL=stack

DB_CONNECTION=mysql
DB_HOST=127.0.0.1
DB_PORT=3306
DB_DATABASE=laravel
DB_USERNAME=root
DB_PASSWORD=

# Front-end
VITE_APP_NAME=\"${APP_NAME}\"
";

/// Production `.env` with a public URL.
pub const PRODUCTION_ENV: &str = "APP_NAME=Shop
APP_ENV=production
APP_URL=https://example.com
DB_HOST=localhost
";

/// A project fixture: composer.json plus .env.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// composer.json content, `None` to leave it out.
    pub manifest: Option<String>,
    /// .env content, `None` to leave it out.
    pub env: Option<String>,
}

impl ProjectFixture {
    /// A Laravel project requiring the given PHP constraint.
    pub fn laravel(php: &str) -> Self {
        ProjectFixture {
            manifest: Some(format!(
                r#"{{
    "name": "laravel/laravel",
    "type": "project",
    "require": {{
        "php": "{php}",
        "ext-intl": "*",
        "laravel/framework": "^10.10"
    }}
}}
"#
            )),
            env: Some(LOCAL_ENV.to_string()),
        }
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn without_env(mut self) -> Self {
        self.env = None;
        self
    }

    pub fn without_manifest(mut self) -> Self {
        self.manifest = None;
        self
    }

    /// Write the fixture files into `dir`.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<()> {
        if let Some(ref manifest) = self.manifest {
            std::fs::write(dir.join(COMPOSER_FILE), manifest)?;
        }
        if let Some(ref env) = self.env {
            std::fs::write(dir.join(ENV_FILE), env)?;
        }
        Ok(())
    }
}
