//! CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use mlboot_cli::{CliConfig, Cli, Commands, bootstrap, dispatch, exit_code_for, logging};
use mlboot_core::EnvLayout;

fn main() -> ExitCode {
    // Load .env before parsing so it can feed the `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let target = cli.launch_target();
    let log_file = cli
        .writes_log(&target)
        .then(|| EnvLayout::resolve(cli.home.as_deref()).ok())
        .flatten()
        .map(|layout| layout.log);
    let _log_guard = logging::init(cli.verbose, log_file.as_deref());

    let force = matches!(cli.command, Some(Commands::Setup { force: true }));
    let config = CliConfig::from_cli(&cli).with_force(force);

    let result = bootstrap(&config)
        .map_err(anyhow::Error::from)
        .and_then(|ctx| dispatch(&ctx, cli.command, target));

    match result {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}
