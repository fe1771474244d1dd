//! Target script launch.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::ports::Invocation;

/// Script run when none is given on the command line.
pub const DEFAULT_SCRIPT: &str = "BehaveAI.py";

/// The user script and its forwarded arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub script: PathBuf,
    pub args: Vec<OsString>,
}

impl LaunchTarget {
    /// `script` defaults to [`DEFAULT_SCRIPT`], resolved against the
    /// current working directory like any relative path.
    pub fn new(script: Option<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            script: script.unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT)),
            args,
        }
    }

    pub fn exists(&self) -> bool {
        self.script.is_file()
    }

    /// `<python> <script> <args...>` with the terminal attached.
    pub fn invocation(&self, python: &Path) -> Invocation {
        Invocation::new(python)
            .arg(&self.script)
            .args(&self.args)
            .inherit()
    }
}
