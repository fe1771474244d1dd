//! On-disk layout of an mlboot root.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::PathError;
use crate::domain::Platform;

/// Environment variable overriding the root directory.
pub const ROOT_ENV_VAR: &str = "MLBOOT_HOME";

/// Root directory name under `$HOME` when nothing overrides it.
pub const DEFAULT_ROOT_DIR_NAME: &str = ".mlboot";

pub const VENV_DIR_NAME: &str = "venv";
pub const MARKER_FILE_NAME: &str = ".bootstrap-complete";
pub const LOG_FILE_NAME: &str = "bootstrap.log";

/// Resolved locations of everything mlboot owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvLayout {
    pub root: PathBuf,
    pub venv: PathBuf,
    pub marker: PathBuf,
    pub log: PathBuf,
}

impl EnvLayout {
    /// Layout rooted at an explicit directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            venv: root.join(VENV_DIR_NAME),
            marker: root.join(MARKER_FILE_NAME),
            log: root.join(LOG_FILE_NAME),
            root,
        }
    }

    /// Resolve the layout root.
    ///
    /// Resolution order:
    /// 1. `explicit` (CLI flag)
    /// 2. `MLBOOT_HOME` environment variable
    /// 3. `$HOME/.mlboot`
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, PathError> {
        if let Some(path) = explicit {
            if path.as_os_str().is_empty() {
                return Err(PathError::EmptyPath);
            }
            return Ok(Self::at(path));
        }

        if let Ok(path) = env::var(ROOT_ENV_VAR) {
            if !path.trim().is_empty() {
                return Ok(Self::at(path));
            }
        }

        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        Ok(Self::at(home.join(DEFAULT_ROOT_DIR_NAME)))
    }

    /// Create the root directory if it is missing.
    pub fn ensure_root(&self) -> Result<(), PathError> {
        if self.root.exists() {
            if !self.root.is_dir() {
                return Err(PathError::NotADirectory(self.root.clone()));
            }
            return Ok(());
        }

        fs::create_dir_all(&self.root).map_err(|e| PathError::CreateFailed {
            path: self.root.clone(),
            reason: e.to_string(),
        })
    }

    /// Interpreter inside the virtual environment.
    pub fn venv_python(&self, platform: Platform) -> PathBuf {
        platform.venv_python(&self.venv)
    }

    pub fn marker_present(&self) -> bool {
        self.marker.is_file()
    }
}
