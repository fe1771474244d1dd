//! Port definitions for the bootstrapper's external collaborators.
//!
//! The bootstrapper never spawns processes or talks to the terminal
//! directly. Both concerns sit behind traits so adapters can provide the
//! real implementation and tests can substitute fakes.

mod command_runner;
mod prompt;

pub use command_runner::{CommandOutput, CommandRunner, Invocation, StdioMode};
pub use prompt::{AutoConfirmPrompt, InstallPrompt, NonInteractivePrompt, PromptError};

#[cfg(any(test, feature = "test-utils"))]
pub use prompt::MockInstallPrompt;
