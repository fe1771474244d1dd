//! Blocking process runner.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use mlboot_core::{CommandOutput, CommandRunner, Invocation, StdioMode};
use tracing::debug;

/// Runs invocations with `std::process::Command`, waiting for each child.
///
/// Bare program names are resolved on `PATH` first so that a missing tool
/// surfaces as `io::ErrorKind::NotFound` consistently across platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub const fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        let program = resolve_program(&invocation.program)?;
        debug!(
            program = %program.display(),
            command = %invocation.command_line(),
            stdio = ?invocation.stdio,
            "Spawning"
        );

        let mut command = Command::new(&program);
        command.args(&invocation.args);

        let output = match invocation.stdio {
            StdioMode::Capture => {
                let out = command.stdin(Stdio::null()).output()?;
                CommandOutput {
                    code: out.status.code(),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                }
            }
            StdioMode::Inherit => {
                let status = command.status()?;
                CommandOutput {
                    code: status.code(),
                    ..CommandOutput::default()
                }
            }
        };

        debug!(exit = %output.describe_exit(), "Process finished");
        Ok(output)
    }
}

/// Paths are used as given; bare names go through `which`.
fn resolve_program(program: &OsStr) -> io::Result<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 || path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    which::which(program).map_err(|e| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}: {e}", program.to_string_lossy()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_not_resolved() {
        let resolved = resolve_program(OsStr::new("./venv/bin/python")).unwrap();
        assert_eq!(resolved, PathBuf::from("./venv/bin/python"));
    }

    #[test]
    fn test_unknown_bare_name_is_not_found() {
        let err = resolve_program(OsStr::new("mlboot-definitely-not-a-program")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
