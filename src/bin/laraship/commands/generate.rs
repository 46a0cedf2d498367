//! `laraship generate` command

use std::sync::Arc;

use anyhow::Result;

use crate::cli::GenerateArgs;
use laraship::ops::laraship_generate::{generate, report, GenerateOptions};
use laraship::ops::prompts::{DefaultsPrompter, Prompter, TerminalPrompter};
use laraship::util::config::load_project_config;
use laraship::Shell;

pub fn execute(args: GenerateArgs, shell: &Arc<Shell>) -> Result<()> {
    let config = load_project_config(&args.path);

    let mut prompter: Box<dyn Prompter> = if args.yes {
        Box::new(DefaultsPrompter)
    } else {
        Box::new(TerminalPrompter::new())
    };

    let opts = GenerateOptions {
        path: args.path,
        entrypoint: args.entrypoint,
    };

    let result = generate(
        &opts,
        &config,
        prompter.as_mut(),
        &mut rand::thread_rng(),
        shell,
    )?;
    report(&result, shell);

    Ok(())
}
