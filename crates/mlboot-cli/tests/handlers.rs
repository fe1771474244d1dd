//! Handler tests against a scripted runner and a temporary root.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use mlboot_cli::{CliContext, CliError, Commands, dispatch, exit_code_for};
use mlboot_core::testing::FakeRunner;
use mlboot_core::{
    AutoConfirmPrompt, BootstrapConfig, EnvLayout, InstallPrompt, LaunchTarget,
    NonInteractivePrompt, Platform,
};

fn context(
    root: &Path,
    runner: &Arc<FakeRunner>,
    prompt: impl InstallPrompt + 'static,
) -> CliContext {
    CliContext::new(
        EnvLayout::at(root),
        BootstrapConfig::default(),
        Box::new(Arc::clone(runner)),
        Box::new(prompt),
    )
    .with_platform(Platform::Linux)
}

fn healthy_host(layout: &EnvLayout) -> FakeRunner {
    FakeRunner::new()
        .on_output("python3 --version", 0, "Python 3.11.9\n")
        .on_creating("-m venv", 0, layout.venv.clone())
        .on("--upgrade pip", 0)
        .on("--index-url", 0)
        .on("ultralytics opencv-python", 0)
        .on("-c import", 0)
}

#[test]
fn missing_script_is_a_usage_error_before_any_work() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("home");
    let runner = Arc::new(FakeRunner::new());
    let ctx = context(&root, &runner, AutoConfirmPrompt);

    let target = LaunchTarget::new(Some(temp.path().join("BehaveAI.py")), Vec::new());
    let err = dispatch(&ctx, None, target).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CliError>(),
        Some(CliError::ScriptNotFound(_))
    ));
    assert_eq!(exit_code_for(&err), 2);
    assert!(runner.calls().is_empty());
    assert!(!root.exists());
}

#[test]
fn run_bootstraps_then_propagates_script_exit_code() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("home");
    let scripts = temp.path().join("project");
    std::fs::create_dir_all(&scripts).unwrap();
    let script = scripts.join("BehaveAI.py");
    std::fs::write(&script, b"raise SystemExit(4)").unwrap();

    let layout = EnvLayout::at(&root);
    let runner = Arc::new(healthy_host(&layout).on("BehaveAI.py --fast", 4));
    let ctx = context(&root, &runner, AutoConfirmPrompt);

    let target = LaunchTarget::new(Some(script), vec!["--fast".into()]);
    let code = dispatch(&ctx, None, target).unwrap();

    assert_eq!(code, ExitCode::from(4));
    assert!(layout.marker_present());
    assert_eq!(runner.count_matching("BehaveAI.py --fast"), 1);
}

#[test]
fn check_reports_not_ready_with_exit_2() {
    let temp = tempfile::tempdir().unwrap();
    let runner = Arc::new(FakeRunner::new());
    let ctx = context(temp.path(), &runner, NonInteractivePrompt);
    let target = LaunchTarget::new(None, Vec::new());

    let code = dispatch(&ctx, Some(Commands::Check { json: true }), target.clone()).unwrap();
    assert_eq!(code, ExitCode::from(2));

    std::fs::write(&ctx.layout.marker, b"").unwrap();
    let code = dispatch(&ctx, Some(Commands::Check { json: false }), target).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(runner.calls().is_empty());
}

#[test]
fn detect_changes_nothing_on_disk() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("home");
    let runner = Arc::new(FakeRunner::new().on_output("nvidia-smi", 0, "CUDA Version: 12.1"));
    let ctx = context(&root, &runner, NonInteractivePrompt);

    let code = dispatch(
        &ctx,
        Some(Commands::Detect { json: true }),
        LaunchTarget::new(None, Vec::new()),
    )
    .unwrap();

    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(runner.command_lines(), ["nvidia-smi"]);
    assert!(!root.exists());
}

#[test]
fn setup_without_terminal_or_python_asks_for_yes() {
    let temp = tempfile::tempdir().unwrap();
    let runner = Arc::new(FakeRunner::new());
    let ctx = context(temp.path(), &runner, NonInteractivePrompt);

    let err = dispatch(
        &ctx,
        Some(Commands::Setup { force: false }),
        LaunchTarget::new(None, Vec::new()),
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CliError>(),
        Some(CliError::PromptRequired(_))
    ));
    assert_eq!(exit_code_for(&err), 2);
    assert!(err.to_string().contains("--yes"));
}

#[test]
fn setup_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let layout = EnvLayout::at(temp.path());
    let runner = Arc::new(healthy_host(&layout));
    let ctx = context(temp.path(), &runner, AutoConfirmPrompt);
    let setup = || {
        dispatch(
            &ctx,
            Some(Commands::Setup { force: false }),
            LaunchTarget::new(None, Vec::new()),
        )
        .unwrap()
    };

    assert_eq!(setup(), ExitCode::SUCCESS);
    let after_first = runner.calls().len();
    assert_eq!(setup(), ExitCode::SUCCESS);
    assert_eq!(runner.calls().len(), after_first);
}

#[test]
fn uninstall_removes_confirmed_items() {
    let temp = tempfile::tempdir().unwrap();
    let layout = EnvLayout::at(temp.path());
    std::fs::create_dir_all(&layout.venv).unwrap();
    std::fs::write(&layout.marker, b"").unwrap();

    let runner = Arc::new(FakeRunner::new());
    let ctx = context(temp.path(), &runner, AutoConfirmPrompt);
    let code = dispatch(&ctx, Some(Commands::Uninstall), LaunchTarget::new(None, Vec::new())).unwrap();

    assert_eq!(code, ExitCode::SUCCESS);
    assert!(!layout.venv.exists());
    assert!(!layout.marker.exists());
}

#[test]
fn uninstall_without_terminal_keeps_everything() {
    let temp = tempfile::tempdir().unwrap();
    let layout = EnvLayout::at(temp.path());
    std::fs::create_dir_all(&layout.venv).unwrap();

    let runner = Arc::new(FakeRunner::new());
    let ctx = context(temp.path(), &runner, NonInteractivePrompt);
    let err = dispatch(&ctx, Some(Commands::Uninstall), LaunchTarget::new(None, Vec::new()))
        .unwrap_err();

    assert_eq!(exit_code_for(&err), 2);
    assert!(layout.venv.exists());
}
