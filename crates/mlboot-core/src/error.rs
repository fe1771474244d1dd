//! Error types for environment bootstrapping.
//!
//! Only fatal-tier failures become errors. Advisory failures are recorded
//! as `StepOutcome::Degraded` in the report instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::paths::PathError;
use crate::ports::PromptError;

/// Errors that abort a bootstrap run.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// No acceptable interpreter, and none could be installed
    #[error("No usable Python interpreter (tried: {tried}): {reason}")]
    InterpreterMissing { tried: String, reason: String },

    /// `python -m venv` failed
    #[error("Failed to create virtual environment at {path}: {reason}")]
    EnvCreationFailed { path: PathBuf, reason: String },

    /// The fixed dependency set did not install
    #[error("Failed to install core packages: {0}")]
    CorePackagesFailed(String),

    /// Required modules still fail to import (strict verification only)
    #[error("Required modules failed to import: {}", modules.join(", "))]
    VerificationFailed { modules: Vec<String> },

    /// The completion marker could not be written
    #[error("Failed to write marker file {path}: {reason}")]
    MarkerWriteFailed { path: PathBuf, reason: String },

    /// A marker from an earlier run could not be removed before rebuilding
    #[error("Failed to remove stale marker file {path}: {reason}")]
    MarkerClearFailed { path: PathBuf, reason: String },

    /// Asking the user failed
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Root directory resolution or creation failed
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Result type alias for bootstrap operations
pub type BootstrapResult<T> = Result<T, BootstrapError>;
