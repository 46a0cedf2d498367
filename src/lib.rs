//! Laraship - Docker files for Laravel projects
//!
//! This crate provides the library behind the `laraship` CLI: reading a
//! project's `composer.json` and `.env`, asking the operator how the
//! database and migrations should be handled, and rendering a Dockerfile
//! and docker-compose.yml.

pub mod core;
pub mod ops;
pub mod templates;
pub mod util;

/// Test utilities for laraship unit tests.
///
/// Only available under `cfg(test)`. Provides a scripted prompter and
/// Laravel project fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    answers::Answers, env_file::EnvFile, error::LarashipError, manifest::ComposerManifest,
    php_version::VersionResolver,
};
pub use util::shell::Shell;
