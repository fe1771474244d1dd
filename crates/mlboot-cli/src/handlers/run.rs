//! Default command: make the environment ready, then run the script.

use std::process::ExitCode;

use anyhow::Result;
use mlboot_core::{LaunchTarget, Ready};
use tracing::info;

use super::print_warnings;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the script with the environment's interpreter.
///
/// A missing script is reported before any bootstrap work. The script's
/// exit status becomes ours; termination by signal maps to 1.
pub fn execute(ctx: &CliContext, target: &LaunchTarget) -> Result<ExitCode> {
    if !target.exists() {
        return Err(CliError::ScriptNotFound(target.script.clone()).into());
    }

    let bootstrapper = ctx.bootstrapper();
    let ready = bootstrapper.ensure_ready().map_err(CliError::from)?;
    if let Ready::Bootstrapped { report, .. } = &ready {
        print_warnings(report);
    }

    let output = bootstrapper
        .launch(target)
        .map_err(|e| CliError::Launch {
            script: target.script.clone(),
            reason: e.to_string(),
        })?;

    info!(script = %target.script.display(), exit = %output.describe_exit(), "Script finished");
    Ok(exit_status(output.code))
}

fn exit_status(code: Option<i32>) -> ExitCode {
    code.and_then(|c| u8::try_from(c).ok())
        .map_or(ExitCode::FAILURE, ExitCode::from)
}
