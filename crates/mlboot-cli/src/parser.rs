//! Main CLI parser and top-level argument handling.
//!
//! With no subcommand, `mlboot` makes the environment ready and runs the
//! target script with any remaining arguments.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use mlboot_core::{LaunchTarget, VariantChoice};

use crate::commands::Commands;

/// Prepare a Python ML environment and run a script inside it.
#[derive(Debug, Parser)]
#[command(name = "mlboot")]
#[command(about = "Bootstrap an Ultralytics/PyTorch environment and run a script in it")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Root directory for the environment, marker and log
    #[arg(long, global = true, env = "MLBOOT_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Package variant: auto, cpu, cu118, cu121, cu124, cu126 or cu128
    #[arg(
        long,
        global = true,
        env = "MLBOOT_ACCELERATOR",
        default_value = "auto",
        value_name = "VARIANT"
    )]
    pub accelerator: VariantChoice,

    /// Fail setup when required modules do not import afterwards
    #[arg(long, global = true)]
    pub strict_verify: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Script to run [default: BehaveAI.py]
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Arguments passed to the script
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

impl Cli {
    /// The script this invocation would launch.
    pub fn launch_target(&self) -> LaunchTarget {
        LaunchTarget::new(self.script.clone(), self.args.clone())
    }

    /// Commands that install things and keep a log file. A default run
    /// whose script is missing stops before any work and writes nothing.
    pub fn writes_log(&self, target: &LaunchTarget) -> bool {
        match self.command {
            None => target.exists(),
            Some(Commands::Setup { .. }) => true,
            Some(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use mlboot_core::Variant;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_runs_default_script() {
        let cli = Cli::parse_from(["mlboot"]);
        assert!(cli.command.is_none());
        assert!(cli.script.is_none());
        assert!(cli.args.is_empty());
        assert_eq!(cli.accelerator, VariantChoice::Auto);
    }

    #[test]
    fn test_script_arguments_are_forwarded_verbatim() {
        let cli = Cli::parse_from(["mlboot", "-y", "train.py", "--epochs", "5", "-v"]);
        assert!(cli.yes);
        assert!(!cli.verbose);
        assert_eq!(cli.script, Some(PathBuf::from("train.py")));
        assert_eq!(cli.args, ["--epochs", "5", "-v"]);
    }

    #[test]
    fn test_subcommand_with_global_args() {
        let cli = Cli::parse_from([
            "mlboot",
            "setup",
            "--force",
            "--home",
            "/tmp/mlboot",
            "--accelerator",
            "cu121",
        ]);
        assert_eq!(cli.command, Some(Commands::Setup { force: true }));
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/mlboot")));
        assert_eq!(cli.accelerator, VariantChoice::Explicit(Variant::Cu121));
        assert!(cli.writes_log(&cli.launch_target()));
    }

    #[test]
    fn test_read_only_commands_do_not_write_log() {
        for args in [["mlboot", "check"], ["mlboot", "detect"], ["mlboot", "uninstall"]] {
            let cli = Cli::parse_from(args);
            assert!(!cli.writes_log(&cli.launch_target()));
        }
    }

    #[test]
    fn test_missing_script_does_not_write_log() {
        let temp = tempfile::tempdir().unwrap();
        let script = temp.path().join("train.py");
        let cli = Cli::parse_from([OsString::from("mlboot"), script.clone().into_os_string()]);
        assert!(!cli.writes_log(&cli.launch_target()));

        std::fs::write(&script, b"print('hi')").unwrap();
        assert!(cli.writes_log(&cli.launch_target()));
    }

    #[test]
    fn test_unknown_accelerator_is_rejected() {
        let err = Cli::try_parse_from(["mlboot", "--accelerator", "rocm", "detect"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
