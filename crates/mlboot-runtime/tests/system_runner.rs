//! Integration tests for the process runner against real programs.

use mlboot_core::{CommandRunner, Invocation};
use mlboot_runtime::SystemCommandRunner;

#[test]
fn missing_program_is_a_spawn_error() {
    let runner = SystemCommandRunner::new();
    let err = runner
        .run(&Invocation::new("mlboot-no-such-tool").arg("--version"))
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn missing_absolute_program_is_a_spawn_error() {
    let temp = tempfile::tempdir().unwrap();
    let runner = SystemCommandRunner::new();
    let err = runner
        .run(&Invocation::new(temp.path().join("python")))
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[cfg(unix)]
#[test]
fn captures_stdout_and_exit_code() {
    let runner = SystemCommandRunner::new();

    let out = runner
        .run(&Invocation::new("sh").args(["-c", "echo CUDA Version: 12.1"]))
        .unwrap();
    assert!(out.success());
    assert_eq!(out.stdout.trim(), "CUDA Version: 12.1");

    let out = runner
        .run(&Invocation::new("sh").args(["-c", "echo oops >&2; exit 3"]))
        .unwrap();
    assert_eq!(out.code, Some(3));
    assert_eq!(out.stderr.trim(), "oops");
}

#[cfg(unix)]
#[test]
fn inherited_stdio_reports_exit_code_only() {
    let runner = SystemCommandRunner::new();
    let out = runner
        .run(&Invocation::new("sh").args(["-c", "exit 7"]).inherit())
        .unwrap();
    assert_eq!(out.code, Some(7));
    assert!(out.stdout.is_empty());
}
