//! Check command handler.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use crate::bootstrap::CliContext;

/// Exit code when the environment is not ready.
pub const NOT_READY: u8 = 2;

#[derive(Debug, Serialize)]
struct CheckReport {
    ready: bool,
    root: PathBuf,
    venv: PathBuf,
    venv_exists: bool,
    marker_present: bool,
    required_modules: Vec<String>,
}

/// Report readiness without changing anything.
pub fn execute(ctx: &CliContext, json: bool) -> Result<ExitCode> {
    let bootstrapper = ctx.bootstrapper();
    let state = bootstrapper.observe();
    let report = CheckReport {
        ready: bootstrapper.is_ready(),
        root: ctx.layout.root.clone(),
        venv: ctx.layout.venv.clone(),
        venv_exists: state.venv_exists(),
        marker_present: state.marker_present,
        required_modules: state.required_modules.iter().cloned().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("root     = {}", report.root.display());
        println!("venv     = {} ({})", report.venv.display(), present(report.venv_exists));
        println!("marker   = {}", present(report.marker_present));
        println!("modules  = {}", report.required_modules.join(", "));
        println!("ready    = {}", if report.ready { "yes" } else { "no" });
    }

    Ok(if report.ready {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(NOT_READY)
    })
}

const fn present(yes: bool) -> &'static str {
    if yes { "present" } else { "missing" }
}
