//! Command runner port.
//!
//! Every external tool the bootstrapper touches goes through this trait:
//! interpreter probes, `pip`, OS package managers, GPU diagnostics and the
//! target script itself. Implementations block until the child exits.

use std::ffi::{OsStr, OsString};
use std::io;
use std::sync::Arc;

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Capture stdout/stderr so the caller can inspect them.
    #[default]
    Capture,
    /// Inherit the parent's streams (installers, the launched script).
    Inherit,
}

/// A single external command: program, arguments and stdio wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub stdio: StdioMode,
}

impl Invocation {
    /// Create an invocation with no arguments and captured output.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdio: StdioMode::Capture,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Let the child write straight to the terminal.
    #[must_use]
    pub const fn inherit(mut self) -> Self {
        self.stdio = StdioMode::Inherit;
        self
    }

    /// Space-joined command line, for logs and test assertions.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the child was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout (empty in [`StdioMode::Inherit`]).
    pub stdout: String,
    /// Captured stderr (empty in [`StdioMode::Inherit`]).
    pub stderr: String,
}

impl CommandOutput {
    /// Output for a child that exited with `code` and printed nothing.
    pub const fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// True when the child exited with status 0.
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Human-readable exit description for error messages.
    pub fn describe_exit(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Executes external commands.
///
/// A spawn failure (program missing, permission denied) is reported as
/// `Err`; a program that ran and failed is `Ok` with a nonzero code.
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for Arc<R> {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        (**self).run(invocation)
    }
}
