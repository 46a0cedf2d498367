//! Core data structures for laraship.
//!
//! - The composer manifest and the `.env` file of a Laravel project
//! - PHP version resolution against the supported runtime images
//! - The operator's answers
//! - Fatal errors

pub mod answers;
pub mod env_file;
pub mod error;
pub mod manifest;
pub mod php_version;

pub use answers::{Answers, DatabaseConfig, DatabaseCredentials, DatabaseMode, MigrationConfig};
pub use env_file::{EnvFile, EnvLine};
pub use error::LarashipError;
pub use manifest::ComposerManifest;
pub use php_version::{Resolution, ResolutionSource, VersionResolver};
