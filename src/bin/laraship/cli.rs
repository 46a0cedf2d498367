//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use laraship::util::shell::ColorChoice;

/// Laraship - generate Docker files for a Laravel project
#[derive(Parser)]
#[command(name = "laraship")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for messages
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub message_format: MessageFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Dockerfile and docker-compose.yml
    Generate(GenerateArgs),

    /// Show the detected PHP version, extensions and environment
    Detect(DetectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Laravel project directory
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Accept every default without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Also write docker-entrypoint.sh
    #[arg(long)]
    pub entrypoint: bool,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Laravel project directory
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
