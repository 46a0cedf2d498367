//! Laraship CLI - Docker files for Laravel projects

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, MessageFormat};
use laraship::util::diagnostic;
use laraship::{LarashipError, Shell};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("laraship=debug")
    } else {
        EnvFilter::new("laraship=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let shell = Arc::new(Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color,
        cli.message_format == MessageFormat::Json,
    ));

    if let Err(e) = run(cli.command, &shell) {
        report_error(&e, &shell);
        std::process::exit(1);
    }
}

fn run(command: Commands, shell: &Arc<Shell>) -> Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, shell),
        Commands::Detect(args) => commands::detect::execute(args, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// One `error:` line with the cause chain. `--verbose` prints the full
/// diagnostic instead.
fn report_error(e: &anyhow::Error, shell: &Shell) {
    if shell.is_json() {
        shell.error(format!("{:#}", e));
        return;
    }

    match e.downcast_ref::<LarashipError>() {
        Some(err) if shell.is_verbose() => {
            diagnostic::emit(&err.to_diagnostic(), shell.use_color())
        }
        _ => eprintln!("error: {:#}", e),
    }
}
