//! OS adapters for mlboot.
//!
//! - [`SystemCommandRunner`]: the `CommandRunner` port over `std::process`
//! - `CliPrompt` (feature `cli`): the `InstallPrompt` port over stdin/stdout

#![deny(unused_crate_dependencies)]

mod prompt;
mod runner;

#[cfg(feature = "cli")]
pub use prompt::CliPrompt;
pub use prompt::parse_answer;
pub use runner::SystemCommandRunner;

#[cfg(test)]
use tempfile as _;
