//! The `mlboot` command-line adapter.
//!
//! `main.rs` loads `.env`, parses arguments, installs logging and hands
//! off to [`dispatch`]; everything else lives here so it can be tested.

#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by main.rs
use dotenvy as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;

use std::process::ExitCode;

use anyhow::Result;
use mlboot_core::LaunchTarget;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::{CliError, exit_code_for};
pub use parser::Cli;

/// Route a parsed command line to its handler.
pub fn dispatch(
    ctx: &CliContext,
    command: Option<Commands>,
    target: LaunchTarget,
) -> Result<ExitCode> {
    match command {
        None => handlers::run::execute(ctx, &target),
        Some(Commands::Setup { .. }) => handlers::setup::execute(ctx),
        Some(Commands::Check { json }) => handlers::check::execute(ctx, json),
        Some(Commands::Detect { json }) => handlers::detect::execute(ctx, json),
        Some(Commands::Uninstall) => handlers::uninstall::execute(ctx),
    }
}
