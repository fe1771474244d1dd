//! Subcommands.

use clap::Subcommand;

/// Operations besides the default "bootstrap and run".
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Create or repair the environment without running a script
    Setup {
        /// Re-run every step even if the environment looks ready
        #[arg(long)]
        force: bool,
    },

    /// Report whether the environment is ready (exit code 2 if not)
    Check {
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the detected accelerator and the package variant it selects
    Detect {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the environment, setup marker and log file
    Uninstall,
}
