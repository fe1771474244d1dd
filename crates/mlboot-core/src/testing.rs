//! Test doubles for the ports.
//!
//! Available to this crate's unit tests and, through the `test-utils`
//! feature, to downstream crates' tests.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

pub use crate::ports::MockInstallPrompt;
use crate::ports::{CommandOutput, CommandRunner, Invocation};

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    code: i32,
    stdout: String,
    creates_dir: Option<PathBuf>,
}

/// A scripted [`CommandRunner`] that records every invocation.
///
/// Rules match when the invocation's command line contains the pattern;
/// the first matching rule wins. Invocations with no matching rule fail to
/// spawn with `io::ErrorKind::NotFound`, like a missing program.
#[derive(Debug, Default)]
pub struct FakeRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with `code` and no output.
    #[must_use]
    pub fn on(self, pattern: &str, code: i32) -> Self {
        self.on_output(pattern, code, "")
    }

    /// Exit with `code` and print `stdout`.
    #[must_use]
    pub fn on_output(mut self, pattern: &str, code: i32, stdout: &str) -> Self {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            code,
            stdout: stdout.to_string(),
            creates_dir: None,
        });
        self
    }

    /// Exit with `code` after creating `dir`, like `python -m venv` does.
    #[must_use]
    pub fn on_creating(mut self, pattern: &str, code: i32, dir: impl Into<PathBuf>) -> Self {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            code,
            stdout: String::new(),
            creates_dir: Some(dir.into()),
        });
        self
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::command_line).collect()
    }

    /// Number of invocations whose command line contains `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|line| line.contains(pattern))
            .count()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }

        let line = invocation.command_line();
        let Some(rule) = self.rules.iter().find(|r| line.contains(&r.pattern)) else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no fake rule for `{line}`"),
            ));
        };

        if let Some(dir) = &rule.creates_dir {
            std::fs::create_dir_all(dir)?;
        }

        Ok(CommandOutput {
            code: Some(rule.code),
            stdout: rule.stdout.clone(),
            stderr: String::new(),
        })
    }
}
