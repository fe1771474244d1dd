//! Tracing setup.
//!
//! Log lines go to stderr, filtered by `RUST_LOG` (default `warn`, `debug`
//! with `--verbose`). Commands that install things also append every
//! mlboot event at debug level to the root's `bootstrap.log`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Crates whose events are written to the log file.
const FILE_DIRECTIVES: &str = "mlboot_core=debug,mlboot_runtime=debug,mlboot_cli=debug";

/// Flushes the file writer when dropped; hold it for the life of `main`.
#[must_use]
pub struct LogGuard(Option<WorkerGuard>);

fn console_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. `log_file`, when given, is appended to;
/// failure to open it only disables the file layer.
pub fn init(verbose: bool, log_file: Option<&Path>) -> LogGuard {
    let mut guard = None;
    let file_layer = log_file.and_then(|path| match open_appender(path) {
        Ok(appender) => {
            let (writer, worker) = tracing_appender::non_blocking(appender);
            guard = Some(worker);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(EnvFilter::new(FILE_DIRECTIVES)),
            )
        }
        Err(e) => {
            eprintln!("Warning: cannot write log file {}: {e}", path.display());
            None
        }
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_filter(console_filter(verbose)),
        )
        .with(file_layer)
        .try_init()
        .ok(); // Ignore error if already initialized

    LogGuard(guard)
}

fn open_appender(path: &Path) -> Result<RollingFileAppender, String> {
    let dir = path
        .parent()
        .ok_or_else(|| "log path has no parent directory".to_string())?;
    let name = path
        .file_name()
        .ok_or_else(|| "log path has no file name".to_string())?;

    std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .map_err(|e| e.to_string())
}
