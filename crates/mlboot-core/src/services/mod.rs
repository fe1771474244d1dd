//! Services built on the ports.
//!
//! All services are synchronous: every external command is waited on
//! before the next one starts.

mod bootstrapper;
mod detect;
mod interpreter;
mod launcher;
mod readiness;
mod uninstaller;

pub use bootstrapper::Bootstrapper;
pub use detect::detect_accelerator;
pub use interpreter::{InstallPlan, PackageManager, ensure_interpreter, find_interpreter};
pub use launcher::{DEFAULT_SCRIPT, LaunchTarget};
pub use readiness::{failed_imports, is_ready, probe_import};
pub use uninstaller::{RemovalOutcome, RemovalRecord, UninstallReport, UninstallTarget, uninstall};
