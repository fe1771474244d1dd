//! The environment bootstrapper.
//!
//! `ensure_ready` drives `NotReady -> Bootstrapping -> {Ready, Failed}`.
//! Each step checks its own precondition, so re-running after a failure
//! only redoes what is missing. The marker is written last and is the
//! commit point.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use super::detect::detect_accelerator;
use super::interpreter::ensure_interpreter;
use super::launcher::LaunchTarget;
use super::readiness::{failed_imports, is_ready};
use crate::domain::{
    BootstrapConfig, BootstrapPhase, BootstrapReport, EnvironmentState, Interpreter, Platform,
    Ready, Step, Variant, select_variant,
};
use crate::error::{BootstrapError, BootstrapResult};
use crate::paths::EnvLayout;
use crate::ports::{CommandOutput, CommandRunner, InstallPrompt, Invocation};

/// Brings an [`EnvLayout`] to a ready state exactly once.
pub struct Bootstrapper<'a> {
    runner: &'a dyn CommandRunner,
    prompt: &'a dyn InstallPrompt,
    layout: EnvLayout,
    config: BootstrapConfig,
    platform: Platform,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        prompt: &'a dyn InstallPrompt,
        layout: EnvLayout,
        config: BootstrapConfig,
    ) -> Self {
        Self {
            runner,
            prompt,
            layout,
            config,
            platform: Platform::current(),
        }
    }

    /// Override the platform (interpreter names, installers, venv layout).
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub const fn layout(&self) -> &EnvLayout {
        &self.layout
    }

    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Current on-disk state.
    pub fn observe(&self) -> EnvironmentState {
        EnvironmentState::observe(&self.layout, &self.config.required_modules)
    }

    /// Readiness check; never errors.
    pub fn is_ready(&self) -> bool {
        is_ready(self.runner, &self.observe(), self.platform)
    }

    /// Make the environment ready, bootstrapping it if needed.
    pub fn ensure_ready(&self) -> BootstrapResult<Ready> {
        let mut state = self.observe();

        if self.config.force {
            info!("Forced bootstrap requested; skipping readiness check");
        } else if is_ready(self.runner, &state, self.platform) {
            debug!(root = %self.layout.root.display(), "Environment already ready");
            state.phase = BootstrapPhase::Ready;
            return Ok(Ready::AlreadyReady(state));
        }

        state.phase = BootstrapPhase::Bootstrapping;
        info!(venv = %self.layout.venv.display(), "Bootstrapping environment");

        let mut report = BootstrapReport::default();
        match self.bootstrap(&mut state, &mut report) {
            Ok(()) => {
                state.phase = BootstrapPhase::Ready;
                state.marker_present = true;
                if report.is_degraded() {
                    warn!("Environment ready with warnings");
                } else {
                    info!("Environment ready");
                }
                Ok(Ready::Bootstrapped { state, report })
            }
            Err(e) => {
                state.phase = BootstrapPhase::Failed;
                warn!(error = %e, records = ?report.records, "Bootstrap failed");
                Err(e)
            }
        }
    }

    /// Run `target` with the environment's interpreter.
    pub fn launch(&self, target: &LaunchTarget) -> io::Result<CommandOutput> {
        let python = self.layout.venv_python(self.platform);
        let invocation = target.invocation(&python);
        info!(command = %invocation.command_line(), "Launching script");
        self.runner.run(&invocation)
    }

    fn bootstrap(
        &self,
        state: &mut EnvironmentState,
        report: &mut BootstrapReport,
    ) -> BootstrapResult<()> {
        self.layout.ensure_root()?;
        self.clear_marker(state, report)?;

        let interpreter = ensure_interpreter(
            self.runner,
            self.prompt,
            self.platform,
            &self.config.interpreter,
        )
        .inspect_err(|e| report.fatal(Step::Interpreter, e.to_string()))?;
        report.ok(Step::Interpreter);

        self.create_env(state, &interpreter, report)?;

        state.accelerator = detect_accelerator(self.runner, self.platform);
        info!(accelerator = %state.accelerator, "Accelerator detected");
        report.ok(Step::DetectAccelerator);

        let selection = select_variant(&state.accelerator, self.config.variant);
        if let Some(reason) = selection.fallback_reason() {
            warn!(reason, "Falling back to CPU packages");
            self.prompt
                .warn(&format!("{reason}; installing CPU-only packages."));
            report.degraded(Step::SelectVariant, reason);
        } else {
            report.ok(Step::SelectVariant);
        }
        info!(variant = %selection.variant, source = ?selection.source, "Package variant selected");

        let python = state.venv_python(self.platform);
        self.install_packages(&python, selection.variant, report)?;
        self.verify(state, &python, report)?;
        self.commit(report)
    }

    /// Drop any marker left by an earlier run so that a failure below
    /// leaves the environment not ready.
    fn clear_marker(
        &self,
        state: &mut EnvironmentState,
        report: &mut BootstrapReport,
    ) -> BootstrapResult<()> {
        let marker = &self.layout.marker;
        match fs::remove_file(marker) {
            Ok(()) => debug!(marker = %marker.display(), "Stale marker removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                report.fatal(Step::Commit, e.to_string());
                return Err(BootstrapError::MarkerClearFailed {
                    path: marker.clone(),
                    reason: e.to_string(),
                });
            }
        }
        state.marker_present = false;
        Ok(())
    }

    fn create_env(
        &self,
        state: &EnvironmentState,
        interpreter: &Interpreter,
        report: &mut BootstrapReport,
    ) -> BootstrapResult<()> {
        if state.venv_exists() {
            debug!(venv = %state.venv_path().display(), "Environment directory exists; skipping creation");
            report.ok(Step::CreateEnv);
            return Ok(());
        }

        self.prompt.info(&format!(
            "Creating Python environment at {}...",
            state.venv_path().display()
        ));

        let invocation = interpreter
            .invocation()
            .args(["-m", "venv"])
            .arg(state.venv_path())
            .inherit();

        let failure = match self.runner.run(&invocation) {
            Ok(output) if output.success() => None,
            Ok(output) => Some(format!(
                "python -m venv exited with {}",
                output.describe_exit()
            )),
            Err(e) => Some(e.to_string()),
        };

        if let Some(reason) = failure {
            report.fatal(Step::CreateEnv, &reason);
            return Err(BootstrapError::EnvCreationFailed {
                path: state.venv_path().to_path_buf(),
                reason,
            });
        }

        report.ok(Step::CreateEnv);
        Ok(())
    }

    fn install_packages(
        &self,
        python: &Path,
        variant: Variant,
        report: &mut BootstrapReport,
    ) -> BootstrapResult<()> {
        let pip = || {
            Invocation::new(python)
                .args(["-m", "pip", "install"])
                .inherit()
        };

        match self.run_pip(&pip().args(["--upgrade", "pip"])) {
            Ok(()) => report.ok(Step::UpgradePip),
            Err(reason) => {
                warn!(%reason, "pip self-upgrade failed; continuing");
                report.degraded(Step::UpgradePip, reason);
            }
        }

        self.prompt.info(&format!(
            "Installing {} from the {variant} index...",
            self.config.accelerator_packages.join(", ")
        ));
        let accelerator = pip()
            .args(&self.config.accelerator_packages)
            .arg("--index-url")
            .arg(variant.index_url());
        match self.run_pip(&accelerator) {
            Ok(()) => report.ok(Step::AcceleratorPackages),
            Err(reason) => {
                warn!(%reason, %variant, "Accelerator packages failed; continuing in degraded mode");
                self.prompt.warn(&format!(
                    "Could not install {variant} packages ({reason}). Continuing; GPU acceleration may be unavailable."
                ));
                report.degraded(Step::AcceleratorPackages, reason);
            }
        }

        self.prompt.info(&format!(
            "Installing {}...",
            self.config.core_packages.join(", ")
        ));
        let core = pip().arg("--upgrade").args(&self.config.core_packages);
        if let Err(reason) = self.run_pip(&core) {
            report.fatal(Step::CorePackages, &reason);
            return Err(BootstrapError::CorePackagesFailed(reason));
        }
        report.ok(Step::CorePackages);
        Ok(())
    }

    fn run_pip(&self, invocation: &Invocation) -> Result<(), String> {
        info!(command = %invocation.command_line(), "Running pip");
        match self.runner.run(invocation) {
            Ok(output) if output.success() => Ok(()),
            Ok(output) => Err(format!("pip exited with {}", output.describe_exit())),
            Err(e) => Err(format!("pip could not start: {e}")),
        }
    }

    fn verify(
        &self,
        state: &EnvironmentState,
        python: &Path,
        report: &mut BootstrapReport,
    ) -> BootstrapResult<()> {
        let failed = failed_imports(self.runner, python, &state.required_modules);

        for module in &state.required_modules {
            if failed.contains(module) {
                warn!(module = %module, "Module failed to import");
            } else {
                info!(module = %module, "Module imports");
            }
        }

        if failed.is_empty() {
            report.ok(Step::Verify);
            return Ok(());
        }

        let reason = format!("failed to import: {}", failed.join(", "));
        if self.config.strict_verify {
            report.fatal(Step::Verify, &reason);
            return Err(BootstrapError::VerificationFailed { modules: failed });
        }

        self.prompt.warn(&format!(
            "Installed, but {reason}. The script may not start."
        ));
        report.degraded(Step::Verify, reason);
        Ok(())
    }

    fn commit(&self, report: &mut BootstrapReport) -> BootstrapResult<()> {
        let marker = &self.layout.marker;
        if let Err(e) = fs::write(marker, b"") {
            report.fatal(Step::Commit, e.to_string());
            return Err(BootstrapError::MarkerWriteFailed {
                path: marker.clone(),
                reason: e.to_string(),
            });
        }
        debug!(marker = %marker.display(), "Marker written");
        report.ok(Step::Commit);
        Ok(())
    }
}
