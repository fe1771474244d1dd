//! Explicit environment state threaded through the bootstrap.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::accelerator::Accelerator;
use super::interpreter::Platform;
use crate::paths::EnvLayout;

/// Where a bootstrap attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapPhase {
    #[default]
    NotReady,
    Bootstrapping,
    Ready,
    Failed,
}

/// Snapshot of the on-disk environment plus what the bootstrap learned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentState {
    pub layout: EnvLayout,
    pub marker_present: bool,
    pub required_modules: BTreeSet<String>,
    pub accelerator: Accelerator,
    pub phase: BootstrapPhase,
}

impl EnvironmentState {
    /// Read the current state from disk. Accelerator is unknown until
    /// detection runs.
    pub fn observe(layout: &EnvLayout, required_modules: &[String]) -> Self {
        Self {
            layout: layout.clone(),
            marker_present: layout.marker_present(),
            required_modules: required_modules.iter().cloned().collect(),
            accelerator: Accelerator::None,
            phase: BootstrapPhase::NotReady,
        }
    }

    pub fn venv_path(&self) -> &Path {
        &self.layout.venv
    }

    pub fn venv_python(&self, platform: Platform) -> PathBuf {
        self.layout.venv_python(platform)
    }

    pub fn venv_exists(&self) -> bool {
        self.layout.venv.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_reads_marker_and_dedups_modules() {
        let temp = tempfile::tempdir().unwrap();
        let layout = EnvLayout::at(temp.path());
        std::fs::write(&layout.marker, b"").unwrap();

        let modules = vec!["cv2".to_string(), "ultralytics".to_string(), "cv2".to_string()];
        let state = EnvironmentState::observe(&layout, &modules);

        assert!(state.marker_present);
        assert_eq!(state.required_modules.len(), 2);
        assert_eq!(state.phase, BootstrapPhase::NotReady);
        assert!(!state.venv_exists());
        assert_eq!(state.venv_path(), layout.venv.as_path());
    }
}
