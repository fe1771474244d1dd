//! CLI-specific error types and exit-code mapping.

use std::path::PathBuf;

use mlboot_core::{BootstrapError, PathError, PromptError};
use thiserror::Error;

/// Errors that end the CLI with a nonzero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// The target script does not exist.
    #[error("Script not found: {}", .0.display())]
    ScriptNotFound(PathBuf),

    /// A confirmation was needed but stdin is not a terminal.
    #[error("{0}. Re-run in a terminal or pass --yes")]
    PromptRequired(PromptError),

    /// Fatal bootstrap failure.
    #[error(transparent)]
    Bootstrap(BootstrapError),

    /// Root directory could not be resolved.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The script could not be started.
    #[error("Failed to launch {}: {reason}", script.display())]
    Launch { script: PathBuf, reason: String },

    /// Some removals failed.
    #[error("Uninstall incomplete: {0}")]
    UninstallIncomplete(String),
}

impl CliError {
    /// Map error to exit code.
    ///
    /// - 1: fatal error
    /// - 2: usage error (missing script, confirmation unavailable)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::ScriptNotFound(_) | Self::PromptRequired(_) => 2,
            Self::Bootstrap(_) | Self::Path(_) | Self::Launch { .. } | Self::UninstallIncomplete(_) => 1,
        }
    }
}

impl From<PromptError> for CliError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::PromptRequired { .. } => Self::PromptRequired(err),
            PromptError::Io(_) => Self::Bootstrap(BootstrapError::Prompt(err)),
        }
    }
}

impl From<BootstrapError> for CliError {
    fn from(err: BootstrapError) -> Self {
        match err {
            BootstrapError::Prompt(prompt) => prompt.into(),
            BootstrapError::Path(path) => Self::Path(path),
            other => Self::Bootstrap(other),
        }
    }
}

/// Exit code for an error returned from a handler.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
