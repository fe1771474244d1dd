//! Removal of everything mlboot created.
//!
//! Each target is confirmed and removed on its own; one failure never
//! stops the others. User scripts live outside the root and are never
//! touched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::paths::EnvLayout;
use crate::ports::{InstallPrompt, PromptError};

/// Something the uninstaller can remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UninstallTarget {
    Environment,
    Marker,
    LogFile,
}

impl UninstallTarget {
    /// Removal order.
    pub const ALL: [Self; 3] = [Self::Environment, Self::Marker, Self::LogFile];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Environment => "Python environment",
            Self::Marker => "setup marker",
            Self::LogFile => "bootstrap log",
        }
    }

    pub fn path(self, layout: &EnvLayout) -> &Path {
        match self {
            Self::Environment => &layout.venv,
            Self::Marker => &layout.marker,
            Self::LogFile => &layout.log,
        }
    }

    /// Failure to remove this target does not count as an error.
    pub const fn is_advisory(self) -> bool {
        matches!(self, Self::LogFile)
    }
}

/// What happened to one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemovalOutcome {
    Removed,
    /// Nothing there; the user was not asked.
    Absent,
    /// The user declined.
    Skipped,
    Failed { reason: String, advisory: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalRecord {
    pub target: UninstallTarget,
    pub path: PathBuf,
    pub outcome: RemovalOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UninstallReport {
    pub records: Vec<RemovalRecord>,
}

impl UninstallReport {
    pub fn outcome(&self, target: UninstallTarget) -> Option<&RemovalOutcome> {
        self.records
            .iter()
            .find(|r| r.target == target)
            .map(|r| &r.outcome)
    }

    /// True if a non-advisory removal failed.
    pub fn has_errors(&self) -> bool {
        self.records.iter().any(|r| {
            matches!(
                r.outcome,
                RemovalOutcome::Failed {
                    advisory: false,
                    ..
                }
            )
        })
    }

    pub fn removed_any(&self) -> bool {
        self.records
            .iter()
            .any(|r| r.outcome == RemovalOutcome::Removed)
    }
}

/// Offer to remove the environment, the marker and the log file.
///
/// Only a prompt failure aborts; filesystem failures are recorded per
/// target.
pub fn uninstall(
    layout: &EnvLayout,
    prompt: &dyn InstallPrompt,
) -> Result<UninstallReport, PromptError> {
    let mut report = UninstallReport::default();

    for target in UninstallTarget::ALL {
        let path = target.path(layout);
        let outcome = if path.exists() {
            let question = format!("Remove the {} at {}?", target.label(), path.display());
            if prompt.confirm(&question, false)? {
                remove(target, path)
            } else {
                debug!(item = ?target, "Removal declined");
                RemovalOutcome::Skipped
            }
        } else {
            debug!(item = ?target, path = %path.display(), "Nothing to remove");
            RemovalOutcome::Absent
        };

        report.records.push(RemovalRecord {
            target,
            path: path.to_path_buf(),
            outcome,
        });
    }

    Ok(report)
}

fn remove(target: UninstallTarget, path: &Path) -> RemovalOutcome {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => {
            info!(path = %path.display(), "Removed {}", target.label());
            RemovalOutcome::Removed
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => RemovalOutcome::Absent,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to remove {}", target.label());
            RemovalOutcome::Failed {
                reason: e.to_string(),
                advisory: target.is_advisory(),
            }
        }
    }
}
