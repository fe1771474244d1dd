//! Readiness probing.
//!
//! Every probe is a separate interpreter process; its exit status is the
//! only signal. Probes fail soft: a spawn error counts as "not importable".

use std::path::Path;

use tracing::debug;

use crate::domain::{EnvironmentState, Platform};
use crate::ports::{CommandRunner, Invocation};

/// Whether `python -c "import <module>"` exits 0.
pub fn probe_import(runner: &dyn CommandRunner, python: &Path, module: &str) -> bool {
    let invocation = Invocation::new(python)
        .arg("-c")
        .arg(format!("import {module}"));

    match runner.run(&invocation) {
        Ok(output) if output.success() => true,
        Ok(output) => {
            debug!(module, exit = %output.describe_exit(), "Import probe failed");
            false
        }
        Err(e) => {
            debug!(module, error = %e, "Import probe could not start");
            false
        }
    }
}

/// Modules from `modules` that fail to import, in iteration order.
pub fn failed_imports<'a, I>(runner: &dyn CommandRunner, python: &Path, modules: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    modules
        .into_iter()
        .filter(|module| !probe_import(runner, python, module))
        .cloned()
        .collect()
}

/// Ready iff the marker exists, or the venv interpreter exists and every
/// required module imports.
pub fn is_ready(runner: &dyn CommandRunner, state: &EnvironmentState, platform: Platform) -> bool {
    if state.marker_present {
        debug!(marker = %state.layout.marker.display(), "Marker present");
        return true;
    }

    let python = state.venv_python(platform);
    if !python.exists() {
        debug!(python = %python.display(), "Environment interpreter missing");
        return false;
    }

    let missing = failed_imports(runner, &python, &state.required_modules);
    if missing.is_empty() {
        debug!("All required modules import");
        true
    } else {
        debug!(?missing, "Environment exists but modules are missing");
        false
    }
}
