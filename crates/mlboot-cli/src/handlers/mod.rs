//! Command handlers.
//!
//! Handlers are thin: they call the core services through the
//! [`CliContext`](crate::bootstrap::CliContext), format output for the
//! terminal, and return the process exit code.

pub mod check;
pub mod detect;
pub mod run;
pub mod setup;
pub mod uninstall;

use mlboot_core::BootstrapReport;

/// Print advisory failures left over from a bootstrap run.
fn print_warnings(report: &BootstrapReport) {
    for (step, reason) in report.warnings() {
        eprintln!("Warning: {step}: {reason}");
    }
}
