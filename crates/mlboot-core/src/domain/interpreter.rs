//! Platform facts and Python interpreter descriptions.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::ports::Invocation;

/// Operating system family; selects interpreter names, installers and
/// hardware inventory tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Known ways to start the system interpreter, in preference order.
    pub fn interpreter_forms(self) -> Vec<InvocationForm> {
        match self {
            Self::Windows => vec![
                InvocationForm::with_args("py", &["-3"]),
                InvocationForm::new("python"),
                InvocationForm::new("python3"),
            ],
            Self::MacOs | Self::Linux => {
                vec![InvocationForm::new("python3"), InvocationForm::new("python")]
            }
        }
    }

    /// Absolute interpreter locations a fresh install of `version` lands in.
    ///
    /// The running process keeps its old `PATH`, so these are probed after
    /// an install in addition to [`Self::interpreter_forms`].
    pub fn post_install_forms(self, version: &str) -> Vec<InvocationForm> {
        let short = version.split('.').take(2).collect::<Vec<_>>();
        match self {
            Self::Windows => dirs::data_local_dir()
                .map(|local| {
                    let folder = format!("Python{}", short.concat());
                    let exe = local
                        .join("Programs")
                        .join("Python")
                        .join(folder)
                        .join("python.exe");
                    vec![InvocationForm::new(exe.display().to_string())]
                })
                .unwrap_or_default(),
            Self::MacOs => vec![InvocationForm::new(format!(
                "/Library/Frameworks/Python.framework/Versions/{}/bin/python3",
                short.join(".")
            ))],
            Self::Linux => vec![InvocationForm::new("/usr/bin/python3")],
        }
    }

    /// Interpreter inside a virtual environment rooted at `venv`.
    pub fn venv_python(self, venv: &Path) -> PathBuf {
        match self {
            Self::Windows => venv.join("Scripts").join("python.exe"),
            Self::MacOs | Self::Linux => {
                let bin = venv.join("bin");
                let python3 = bin.join("python3");
                if python3.exists() {
                    python3
                } else {
                    bin.join("python")
                }
            }
        }
    }

    /// Hardware inventory query used when the vendor diagnostic is missing.
    pub fn gpu_inventory(self) -> Invocation {
        match self {
            Self::Windows => {
                Invocation::new("wmic").args(["path", "win32_VideoController", "get", "name"])
            }
            Self::MacOs => Invocation::new("system_profiler").arg("SPDisplaysDataType"),
            Self::Linux => Invocation::new("lspci"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
        })
    }
}

/// A program plus leading arguments that starts an interpreter,
/// e.g. `py -3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationForm {
    pub program: String,
    pub args: Vec<String>,
}

impl InvocationForm {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Start an invocation of this form; callers append their own args.
    pub fn invocation(&self) -> Invocation {
        Invocation::new(&self.program).args(&self.args)
    }
}

impl fmt::Display for InvocationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Version reported by `python --version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonVersion {
    /// Parse output such as `Python 3.11.9` or `Python 3.13.0rc1`.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text
            .split_whitespace()
            .skip_while(|word| !word.eq_ignore_ascii_case("python"))
            .nth(1)?;

        let mut parts = raw.split('.').map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok()
        });

        let major = parts.next()??;
        let minor = parts.next()??;
        let patch = parts.next().flatten().unwrap_or(0);
        Some(Self {
            major,
            minor,
            patch,
        })
    }

    pub fn at_least(self, (major, minor): (u32, u32)) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A system interpreter that answered `--version` acceptably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpreter {
    pub form: InvocationForm,
    pub version: PythonVersion,
}

impl Interpreter {
    pub fn invocation(&self) -> Invocation {
        self.form.invocation()
    }
}
