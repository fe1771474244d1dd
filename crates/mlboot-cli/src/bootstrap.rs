//! CLI bootstrap - the composition root.
//!
//! This is the only place where the concrete runner and prompt are chosen.
//! Handlers receive a [`CliContext`] and work through the core services.

use std::io::IsTerminal;
use std::path::PathBuf;

use mlboot_core::{
    AutoConfirmPrompt, BootstrapConfig, Bootstrapper, CommandRunner, EnvLayout, InstallPrompt,
    NonInteractivePrompt, Platform, VariantChoice,
};
use mlboot_runtime::{CliPrompt, SystemCommandRunner};

use crate::error::CliError;
use crate::parser::Cli;

/// Settings taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub home: Option<PathBuf>,
    pub assume_yes: bool,
    pub accelerator: VariantChoice,
    pub strict_verify: bool,
    pub force: bool,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            home: cli.home.clone(),
            assume_yes: cli.yes,
            accelerator: cli.accelerator,
            strict_verify: cli.strict_verify,
            force: false,
        }
    }

    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn bootstrap_config(&self) -> BootstrapConfig {
        BootstrapConfig::default()
            .with_variant(self.accelerator)
            .with_strict_verify(self.strict_verify)
            .with_force(self.force)
    }
}

/// Everything a handler needs.
pub struct CliContext {
    pub layout: EnvLayout,
    pub config: BootstrapConfig,
    pub platform: Platform,
    pub runner: Box<dyn CommandRunner>,
    pub prompt: Box<dyn InstallPrompt>,
}

impl CliContext {
    pub fn new(
        layout: EnvLayout,
        config: BootstrapConfig,
        runner: Box<dyn CommandRunner>,
        prompt: Box<dyn InstallPrompt>,
    ) -> Self {
        Self {
            layout,
            config,
            platform: Platform::current(),
            runner,
            prompt,
        }
    }

    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn bootstrapper(&self) -> Bootstrapper<'_> {
        Bootstrapper::new(
            self.runner.as_ref(),
            self.prompt.as_ref(),
            self.layout.clone(),
            self.config.clone(),
        )
        .with_platform(self.platform)
    }
}

/// `--yes` auto-confirms; otherwise ask on a terminal, or refuse to
/// guess when stdin is not one.
pub fn select_prompt(assume_yes: bool, interactive: bool) -> Box<dyn InstallPrompt> {
    if assume_yes {
        Box::new(AutoConfirmPrompt)
    } else if interactive {
        Box::new(CliPrompt::new())
    } else {
        Box::new(NonInteractivePrompt)
    }
}

/// Wire the real adapters.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let layout = EnvLayout::resolve(config.home.as_deref())?;
    tracing::debug!(root = %layout.root.display(), "Resolved environment root");

    let prompt = select_prompt(config.assume_yes, std::io::stdin().is_terminal());
    Ok(CliContext::new(
        layout,
        config.bootstrap_config(),
        Box::new(SystemCommandRunner::new()),
        prompt,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mlboot_core::{PromptError, Variant};

    #[test]
    fn test_flags_reach_bootstrap_config() {
        let cli = Cli::parse_from(["mlboot", "--strict-verify", "--accelerator", "cpu", "setup"]);
        let config = CliConfig::from_cli(&cli).with_force(true).bootstrap_config();

        assert!(config.strict_verify);
        assert!(config.force);
        assert_eq!(config.variant, VariantChoice::Explicit(Variant::Cpu));
    }

    #[test]
    fn test_non_interactive_prompt_refuses() {
        let prompt = select_prompt(false, false);
        assert!(matches!(
            prompt.confirm("Install?", true),
            Err(PromptError::PromptRequired { .. })
        ));
    }

    #[test]
    fn test_yes_wins_over_terminal_detection() {
        let prompt = select_prompt(true, false);
        assert!(prompt.confirm("Remove?", false).unwrap());
    }

    #[test]
    fn test_explicit_home_is_used() {
        let temp = tempfile::tempdir().unwrap();
        let config = CliConfig {
            home: Some(temp.path().to_path_buf()),
            ..CliConfig::default()
        };
        let ctx = bootstrap(&config).unwrap();
        assert_eq!(ctx.layout.root, temp.path());
    }
}
