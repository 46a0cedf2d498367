//! `laraship detect` command

use std::sync::Arc;

use anyhow::Result;

use crate::cli::DetectArgs;
use laraship::ops::detect::inspect_project;
use laraship::util::shell::Status;
use laraship::Shell;

pub fn execute(args: DetectArgs, shell: &Arc<Shell>) -> Result<()> {
    let info = inspect_project(&args.path, shell)?;

    if shell.is_json() {
        shell.json_event(&serde_json::json!({
            "reason": "detected",
            "php_version": info.php.version,
            "php_fallback": info.php.is_fallback(),
            "extensions": info.extensions,
            "production": info.production,
        }));
        return Ok(());
    }

    let environment = if info.production {
        "production"
    } else {
        "non-production"
    };
    shell.status(Status::Detected, format!("{} environment", environment));

    if shell.is_quiet() {
        println!("{}", info.php.version);
    }

    Ok(())
}
