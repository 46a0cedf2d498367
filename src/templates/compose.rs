//! docker-compose.yml template.
//!
//! The app service re-exports the project's `.env` as its `environment`
//! list, in file order, with two blocks relocated:
//!
//! - the URL keys (`APP_URL`, `ASSET_URL`, `VITE_APP_URL`) collapse into one
//!   block at the position of the first `APP_URL` line, all set to its value
//! - every `DB_*` key collapses into one block at the position of the first
//!   `DB_*` line, pointing at either the provisioned MySQL service or SQLite
//!
//! Comments and blank lines keep their slot as blank entries.

use std::ops::Range;

use rand::Rng;
use serde::Serialize;

use crate::core::answers::{DatabaseConfig, DatabaseCredentials};
use crate::core::env_file::{EnvFile, DB_PREFIX};

pub const COMPOSE_VERSION: &str = "3.8";
pub const APP_NAME: &str = "laravel";
pub const NETWORK: &str = "sail";
pub const NETWORK_DRIVER: &str = "bridge";
pub const MYSQL_IMAGE: &str = "mysql:8.0";
pub const MYSQL_VOLUME: &str = "mysql-data";

/// Port the app container listens on.
pub const APP_PORT: u16 = 80;

/// Port MySQL listens on inside its container.
pub const MYSQL_PORT: u16 = 3306;

/// Host ports the MySQL container may be published on.
pub const HOST_PORT_RANGE: Range<u16> = 3307..3399;

const URL_KEYS: [&str; 3] = ["APP_URL", "ASSET_URL", "VITE_APP_URL"];
const DEFAULT_APP_URL: &str = "http://localhost";
const ENV_INDENT: &str = "            ";

/// Ports chosen for the generated services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortAssignment {
    pub app: u16,
    /// Host port of the MySQL service, when one is provisioned.
    pub database: Option<u16>,
}

/// A rendered compose file and the ports it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCompose {
    pub content: String,
    pub ports: PortAssignment,
}

/// Render the compose file.
///
/// `dockerfile` is the recipe the app service builds from. A MySQL service
/// is declared only when `database` provisions a new container; its host
/// port is drawn from [`HOST_PORT_RANGE`].
pub fn generate_compose<R: Rng>(
    env: &EnvFile,
    database: &DatabaseConfig,
    dockerfile: &str,
    rng: &mut R,
) -> GeneratedCompose {
    let environment = environment_entries(env, database).join("\n");

    let mut content = format!(
        r#"version: '{COMPOSE_VERSION}'

services:
    app:
        build:
            context: .
            dockerfile: {dockerfile}
        image: {APP_NAME}-app
        container_name: {APP_NAME}-app
        restart: unless-stopped
        working_dir: /var/www/html
        volumes:
            - .:/var/www/html
        networks:
            - {NETWORK}
        environment:
{environment}
"#
    );

    let mut ports = PortAssignment {
        app: APP_PORT,
        database: None,
    };

    if let Some(credentials) = database.credentials() {
        let port = rng.gen_range(HOST_PORT_RANGE);
        tracing::debug!("publishing mysql on host port {}", port);
        content.push_str(&mysql_service(credentials, port));
        ports.database = Some(port);
    }

    content.push_str(&format!(
        "\nnetworks:\n    {NETWORK}:\n        driver: {NETWORK_DRIVER}\n"
    ));

    if ports.database.is_some() {
        content.push_str(&format!("\nvolumes:\n    {MYSQL_VOLUME}:\n        driver: local\n"));
    }

    GeneratedCompose { content, ports }
}

/// The app service's `environment` entries, indented for the document.
fn environment_entries(env: &EnvFile, database: &DatabaseConfig) -> Vec<String> {
    // The empty remainder after a final newline is not a line of its own.
    let lines = match env.lines().split_last() {
        Some((last, rest)) if last.raw().is_empty() => rest,
        _ => env.lines(),
    };
    let url_at = lines.iter().position(|l| l.key() == Some("APP_URL"));
    let db_at = lines.iter().position(|l| is_database_key(l.key()));

    let base_url = url_at
        .and_then(|i| lines[i].value())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_APP_URL);

    let mut entries = Vec::with_capacity(lines.len() + URL_KEYS.len());
    for (i, line) in lines.iter().enumerate() {
        if Some(i) == url_at {
            entries.extend(url_block(base_url));
            continue;
        }
        if Some(i) == db_at {
            entries.extend(database_block(database));
            continue;
        }

        match (line.key(), line.value()) {
            (Some(key), _) if is_database_key(Some(key)) || URL_KEYS.contains(&key) => {}
            (Some(key), Some(value)) => entries.push(format!("{ENV_INDENT}- {key}={value}")),
            _ => entries.push(ENV_INDENT.to_string()),
        }
    }

    if url_at.is_none() {
        let mut block = url_block(base_url);
        block.append(&mut entries);
        entries = block;
    }
    if db_at.is_none() {
        entries.extend(database_block(database));
    }

    entries
}

fn is_database_key(key: Option<&str>) -> bool {
    key.is_some_and(|k| k.starts_with(DB_PREFIX))
}

fn url_block(base_url: &str) -> Vec<String> {
    URL_KEYS
        .iter()
        .map(|key| format!("{ENV_INDENT}- {key}={base_url}"))
        .collect()
}

fn database_block(database: &DatabaseConfig) -> Vec<String> {
    let pairs = match database.credentials() {
        Some(c) => vec![
            ("DB_CONNECTION", "mysql".to_string()),
            ("DB_HOST", "mysql".to_string()),
            ("DB_PORT", MYSQL_PORT.to_string()),
            ("DB_DATABASE", format!("'{}'", c.name)),
            ("DB_USERNAME", format!("'{}'", c.user)),
            ("DB_PASSWORD", format!("'{}'", c.password)),
        ],
        None => vec![("DB_CONNECTION", "sqlite".to_string())],
    };

    pairs
        .into_iter()
        .map(|(key, value)| format!("{ENV_INDENT}- {key}={value}"))
        .collect()
}

fn mysql_service(credentials: &DatabaseCredentials, host_port: u16) -> String {
    let password = yaml_quote(&credentials.password);
    let name = yaml_quote(&credentials.name);
    let user = yaml_quote(&credentials.user);

    format!(
        r#"
    mysql:
        image: {MYSQL_IMAGE}
        container_name: {APP_NAME}-mysql
        restart: unless-stopped
        environment:
            MYSQL_ROOT_PASSWORD: {password}
            MYSQL_DATABASE: {name}
            MYSQL_USER: {user}
            MYSQL_PASSWORD: {password}
        volumes:
            - {MYSQL_VOLUME}:/var/lib/mysql
        networks:
            - {NETWORK}
        ports:
            - "{host_port}:{MYSQL_PORT}"
"#
    )
}

/// Single-quoted YAML scalar.
fn yaml_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
