//! System interpreter resolution and installation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{Interpreter, InterpreterSettings, InvocationForm, Platform, PythonVersion};
use crate::error::{BootstrapError, BootstrapResult};
use crate::ports::{CommandRunner, InstallPrompt, Invocation};

/// Probe `forms` in order with `--version`; the first that exits 0 and
/// reports at least `minimum` wins.
pub fn find_interpreter(
    runner: &dyn CommandRunner,
    forms: &[InvocationForm],
    minimum: (u32, u32),
) -> Option<Interpreter> {
    for form in forms {
        let output = match runner.run(&form.invocation().arg("--version")) {
            Ok(output) if output.success() => output,
            Ok(output) => {
                debug!(form = %form, exit = %output.describe_exit(), "Interpreter probe failed");
                continue;
            }
            Err(e) => {
                debug!(form = %form, error = %e, "Interpreter not found");
                continue;
            }
        };

        // Python 2 printed its version to stderr
        let text = if output.stdout.trim().is_empty() {
            &output.stderr
        } else {
            &output.stdout
        };

        match PythonVersion::parse(text) {
            Some(version) if version.at_least(minimum) => {
                debug!(form = %form, %version, "Interpreter accepted");
                return Some(Interpreter {
                    form: form.clone(),
                    version,
                });
            }
            Some(version) => debug!(form = %form, %version, "Interpreter too old"),
            None => debug!(form = %form, output = %text.trim(), "Unrecognized version output"),
        }
    }

    None
}

/// Find a usable system interpreter, offering to install one if none is
/// found.
///
/// Returns `InterpreterMissing` if the user declines, the install fails, or
/// the interpreter is still missing afterwards.
pub fn ensure_interpreter(
    runner: &dyn CommandRunner,
    prompt: &dyn InstallPrompt,
    platform: Platform,
    settings: &InterpreterSettings,
) -> BootstrapResult<Interpreter> {
    let forms = platform.interpreter_forms();
    if let Some(found) = find_interpreter(runner, &forms, settings.minimum) {
        info!(interpreter = %found.form, version = %found.version, "Using system Python");
        return Ok(found);
    }

    let tried = describe(&forms);
    let (major, minor) = settings.minimum;
    prompt.warn(&format!(
        "No Python {major}.{minor}+ interpreter found (tried: {tried})."
    ));

    let question = format!("Download and install Python {} now?", settings.pinned_version);
    if !prompt.confirm(&question, true)? {
        return Err(BootstrapError::InterpreterMissing {
            tried,
            reason: "installation declined".to_string(),
        });
    }

    let plan = InstallPlan::for_platform(platform, &settings.pinned_version, &env::temp_dir());
    plan.execute(runner, prompt)
        .map_err(|reason| BootstrapError::InterpreterMissing {
            tried: tried.clone(),
            reason,
        })?;

    let mut retry = forms;
    retry.extend(platform.post_install_forms(&settings.pinned_version));
    find_interpreter(runner, &retry, settings.minimum).ok_or_else(|| {
        BootstrapError::InterpreterMissing {
            tried: describe(&retry),
            reason: "still not found after installation; open a new terminal and retry"
                .to_string(),
        }
    })
}

fn describe(forms: &[InvocationForm]) -> String {
    forms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// An OS package manager able to install Python.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    pub name: &'static str,
    /// Exits 0 when the manager is present.
    pub probe: Invocation,
    /// Run in order; each must succeed.
    pub steps: Vec<Invocation>,
}

impl PackageManager {
    fn new(name: &'static str, steps: Vec<Invocation>) -> Self {
        Self {
            name,
            probe: Invocation::new(name).arg("--version"),
            steps: steps.into_iter().map(Invocation::inherit).collect(),
        }
    }

    fn linux_candidates() -> Vec<Self> {
        let sudo = |args: &[&str]| Invocation::new("sudo").args(args.iter().copied());
        vec![
            Self::new(
                "apt-get",
                vec![
                    sudo(&["apt-get", "update"]),
                    sudo(&["apt-get", "install", "-y", "python3", "python3-venv", "python3-pip"]),
                ],
            ),
            Self::new(
                "dnf",
                vec![sudo(&["dnf", "install", "-y", "python3", "python3-pip"])],
            ),
            Self::new(
                "pacman",
                vec![sudo(&["pacman", "-S", "--needed", "--noconfirm", "python", "python-pip"])],
            ),
            Self::new(
                "zypper",
                vec![sudo(&["zypper", "--non-interactive", "install", "python3", "python3-pip"])],
            ),
        ]
    }
}

/// How to obtain an interpreter on a given platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallPlan {
    /// Fetch the official installer and run it unattended.
    Download {
        url: String,
        destination: PathBuf,
        fetch: Invocation,
        install: Invocation,
    },
    /// Use the first package manager that answers its probe.
    PackageManager(Vec<PackageManager>),
}

impl InstallPlan {
    /// Plan for `platform`; installers are downloaded into `download_dir`.
    ///
    /// Linux installs the distribution's Python 3 rather than `version`.
    pub fn for_platform(platform: Platform, version: &str, download_dir: &Path) -> Self {
        match platform {
            Platform::Windows => {
                let file = format!("python-{version}-amd64.exe");
                let url = format!("https://www.python.org/ftp/python/{version}/{file}");
                let destination = download_dir.join(file);
                let fetch = Invocation::new("powershell")
                    .args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command"])
                    .arg(format!(
                        "Invoke-WebRequest -Uri '{url}' -OutFile '{}'",
                        destination.display()
                    ))
                    .inherit();
                let install = Invocation::new(&destination)
                    .args([
                        "/quiet",
                        "InstallAllUsers=0",
                        "PrependPath=1",
                        "Include_launcher=1",
                        "Include_test=0",
                    ])
                    .inherit();
                Self::Download {
                    url,
                    destination,
                    fetch,
                    install,
                }
            }
            Platform::MacOs => {
                let file = format!("python-{version}-macos11.pkg");
                let url = format!("https://www.python.org/ftp/python/{version}/{file}");
                let destination = download_dir.join(file);
                let fetch = Invocation::new("curl")
                    .args(["-fL", "--progress-bar", "-o"])
                    .arg(&destination)
                    .arg(&url)
                    .inherit();
                let install = Invocation::new("sudo")
                    .args(["installer", "-pkg"])
                    .arg(&destination)
                    .args(["-target", "/"])
                    .inherit();
                Self::Download {
                    url,
                    destination,
                    fetch,
                    install,
                }
            }
            Platform::Linux => Self::PackageManager(PackageManager::linux_candidates()),
        }
    }

    /// Run the plan. Errors carry a human-readable reason.
    pub fn execute(
        &self,
        runner: &dyn CommandRunner,
        prompt: &dyn InstallPrompt,
    ) -> Result<(), String> {
        match self {
            Self::Download {
                url,
                destination,
                fetch,
                install,
            } => {
                prompt.info(&format!("Downloading {url}..."));
                run_step(runner, fetch, "download")?;

                prompt.info("Running the Python installer...");
                let result = run_step(runner, install, "installer");

                if let Err(e) = fs::remove_file(destination) {
                    debug!(path = %destination.display(), error = %e, "Installer cleanup skipped");
                }
                result
            }
            Self::PackageManager(candidates) => {
                let manager = candidates
                    .iter()
                    .find(|m| runner.run(&m.probe).is_ok_and(|o| o.success()))
                    .ok_or_else(|| {
                        let names: Vec<_> = candidates.iter().map(|m| m.name).collect();
                        format!("no supported package manager found ({})", names.join(", "))
                    })?;

                prompt.info(&format!("Installing Python with {}...", manager.name));
                for step in &manager.steps {
                    run_step(runner, step, manager.name)?;
                }
                Ok(())
            }
        }
    }
}

fn run_step(runner: &dyn CommandRunner, invocation: &Invocation, what: &str) -> Result<(), String> {
    info!(command = %invocation.command_line(), "Running {what}");
    match runner.run(invocation) {
        Ok(output) if output.success() => Ok(()),
        Ok(output) => {
            warn!(exit = %output.describe_exit(), "{what} failed");
            Err(format!("{what} failed with {}", output.describe_exit()))
        }
        Err(e) => Err(format!("{what} could not start: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockInstallPrompt, PromptError};
    use crate::testing::FakeRunner;

    fn quiet_prompt(answer: bool) -> MockInstallPrompt {
        let mut prompt = MockInstallPrompt::new();
        prompt.expect_confirm().returning(move |_, _| Ok(answer));
        prompt.expect_info().return_const(());
        prompt.expect_warn().return_const(());
        prompt
    }

    #[test]
    fn test_first_acceptable_form_wins() {
        let runner = FakeRunner::new()
            .on_output("python3 --version", 0, "Python 3.10.12\n")
            .on_output("python --version", 0, "Python 3.12.1\n");

        let forms = Platform::Linux.interpreter_forms();
        let found = find_interpreter(&runner, &forms, (3, 8)).unwrap();
        assert_eq!(found.form.program, "python3");
        assert_eq!(found.version.to_string(), "3.10.12");
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_too_old_interpreter_is_skipped() {
        let runner = FakeRunner::new()
            .on_output("python3 --version", 0, "Python 3.6.9")
            .on_output("python --version", 0, "Python 3.9.2");

        let forms = Platform::Linux.interpreter_forms();
        let found = find_interpreter(&runner, &forms, (3, 8)).unwrap();
        assert_eq!(found.form.program, "python");
    }

    #[test]
    fn test_declined_install_is_interpreter_missing() {
        let runner = FakeRunner::new();
        let prompt = quiet_prompt(false);

        let err = ensure_interpreter(&runner, &prompt, Platform::Linux, &InterpreterSettings::default())
            .unwrap_err();
        match err {
            BootstrapError::InterpreterMissing { tried, reason } => {
                assert_eq!(tried, "python3, python");
                assert!(reason.contains("declined"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Only the two probes ran; nothing was installed
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_non_interactive_prompt_surfaces_prompt_error() {
        let runner = FakeRunner::new();
        let mut prompt = MockInstallPrompt::new();
        prompt.expect_warn().return_const(());
        prompt
            .expect_confirm()
            .returning(|msg, _| Err(PromptError::prompt_required(msg)));

        let err = ensure_interpreter(&runner, &prompt, Platform::Linux, &InterpreterSettings::default())
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Prompt(_)));
    }

    #[test]
    fn test_linux_install_uses_first_present_package_manager() {
        // Bare names stay unresolvable after the install; only the absolute
        // post-install location answers.
        let runner = FakeRunner::new()
            .on("apt-get --version", 127)
            .on("dnf --version", 0)
            .on("sudo dnf install", 0)
            .on_output("/usr/bin/python3 --version", 0, "Python 3.12.3");

        let prompt = quiet_prompt(true);
        let found =
            ensure_interpreter(&runner, &prompt, Platform::Linux, &InterpreterSettings::default())
                .unwrap();

        assert_eq!(found.form.program, "/usr/bin/python3");
        assert_eq!(runner.count_matching("sudo dnf install -y python3"), 1);
        assert_eq!(runner.count_matching("apt-get install"), 0);
    }

    #[test]
    fn test_failed_package_manager_install_is_interpreter_missing() {
        let runner = FakeRunner::new()
            .on("apt-get --version", 0)
            .on("sudo apt-get update", 0)
            .on("sudo apt-get install", 100);

        let prompt = quiet_prompt(true);
        let err =
            ensure_interpreter(&runner, &prompt, Platform::Linux, &InterpreterSettings::default())
                .unwrap_err();

        match err {
            BootstrapError::InterpreterMissing { reason, .. } => {
                assert!(reason.contains("apt-get failed"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_windows_plan_downloads_pinned_installer() {
        let plan = InstallPlan::for_platform(Platform::Windows, "3.11.9", Path::new("C:/tmp"));
        let InstallPlan::Download {
            url, fetch, install, ..
        } = plan
        else {
            panic!("expected a download plan");
        };

        assert_eq!(
            url,
            "https://www.python.org/ftp/python/3.11.9/python-3.11.9-amd64.exe"
        );
        assert!(fetch.command_line().starts_with("powershell"));
        assert!(install.command_line().contains("/quiet"));
        assert!(install.command_line().contains("PrependPath=1"));
    }

    #[test]
    fn test_macos_plan_runs_pkg_installer_after_download() {
        let temp = tempfile::tempdir().unwrap();
        let plan = InstallPlan::for_platform(Platform::MacOs, "3.11.9", temp.path());
        let runner = FakeRunner::new().on("curl", 0).on("installer -pkg", 0);
        let prompt = quiet_prompt(true);

        plan.execute(&runner, &prompt).unwrap();

        let lines = runner.command_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("curl"));
        assert!(lines[1].starts_with("sudo installer -pkg"));
    }

    #[test]
    fn test_failed_download_skips_installer() {
        let temp = tempfile::tempdir().unwrap();
        let plan = InstallPlan::for_platform(Platform::MacOs, "3.11.9", temp.path());
        let runner = FakeRunner::new().on("curl", 22);
        let prompt = quiet_prompt(true);

        let err = plan.execute(&runner, &prompt).unwrap_err();
        assert!(err.contains("download failed"));
        assert_eq!(runner.calls().len(), 1);
    }
}
