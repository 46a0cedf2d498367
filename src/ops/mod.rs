//! High-level operations.
//!
//! This module contains the implementation of laraship commands.

pub mod detect;
pub mod laraship_generate;
pub mod prompts;

pub use detect::{inspect_project, validate_project, ProjectInfo};
pub use laraship_generate::{generate, report, update_env_file, GenerateOptions, GenerateResult};
pub use prompts::{DefaultsPrompter, Prompter, TerminalPrompter};
