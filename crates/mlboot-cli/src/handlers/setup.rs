//! Setup command handler.

use std::process::ExitCode;

use anyhow::Result;
use mlboot_core::Ready;

use super::print_warnings;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Make the environment ready without launching anything.
pub fn execute(ctx: &CliContext) -> Result<ExitCode> {
    let ready = ctx.bootstrapper().ensure_ready().map_err(CliError::from)?;
    let venv = ready.state().venv_path().display().to_string();

    match &ready {
        Ready::AlreadyReady(_) => println!("Environment already ready at {venv}"),
        Ready::Bootstrapped { report, .. } => {
            print_warnings(report);
            if report.is_degraded() {
                println!("Environment ready at {venv} (with warnings)");
            } else {
                println!("Environment ready at {venv}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
