//! User prompt abstraction for bootstrap and uninstall operations.
//!
//! This module provides a trait-based prompt system that lets the CLI (or
//! any other front end) handle confirmations and notices without the
//! services knowing about terminals.
//!
//! The default `NonInteractivePrompt` returns `Err(PromptError::PromptRequired)`
//! rather than silently auto-confirming. Installing an interpreter or deleting
//! an environment must never happen without an explicit answer.

use thiserror::Error;

/// Errors raised while asking the user something.
#[derive(Debug, Error)]
pub enum PromptError {
    /// User confirmation was required but not available (non-interactive mode)
    #[error("User confirmation required: {message}")]
    PromptRequired { message: String },

    /// Reading the answer failed
    #[error("Failed to read answer: {0}")]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// Create a `PromptRequired` error with a message
    pub fn prompt_required(message: impl Into<String>) -> Self {
        Self::PromptRequired {
            message: message.into(),
        }
    }
}

/// Trait for handling user prompts and notices.
///
/// Implementors can show dialogs, prompt on stdin, or return errors
/// for non-interactive contexts.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait InstallPrompt: Send + Sync {
    /// Ask the user to confirm an action.
    ///
    /// # Arguments
    /// * `message` - The question to ask (e.g., "Install Python 3.11.9 now?")
    /// * `default` - The default answer if user just presses Enter
    ///
    /// # Returns
    /// - `Ok(true)` if user confirmed
    /// - `Ok(false)` if user declined
    /// - `Err(PromptError::PromptRequired)` if prompting is not supported
    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError>;

    /// Display an informational message to the user.
    fn info(&self, message: &str);

    /// Display a warning message to the user.
    fn warn(&self, message: &str);
}

/// Non-interactive prompt that returns errors instead of prompting.
///
/// Use this when stdin is not a terminal. Notices are dropped; the
/// `tracing` output still records them.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompt;

impl InstallPrompt for NonInteractivePrompt {
    fn confirm(&self, message: &str, _default: bool) -> Result<bool, PromptError> {
        Err(PromptError::prompt_required(message))
    }

    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}

/// Auto-confirm prompt that always returns true.
///
/// Backs the `--yes` flag for scripted setups.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirmPrompt;

impl InstallPrompt for AutoConfirmPrompt {
    fn confirm(&self, _message: &str, _default: bool) -> Result<bool, PromptError> {
        Ok(true)
    }

    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("Warning: {message}");
    }
}
