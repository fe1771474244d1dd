//! Per-step outcomes aggregated over a bootstrap run.

use std::fmt;

use serde::Serialize;

use super::state::EnvironmentState;

/// The bootstrap steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Interpreter,
    CreateEnv,
    DetectAccelerator,
    SelectVariant,
    UpgradePip,
    AcceleratorPackages,
    CorePackages,
    Verify,
    Commit,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interpreter => "interpreter",
            Self::CreateEnv => "create environment",
            Self::DetectAccelerator => "detect accelerator",
            Self::SelectVariant => "select variant",
            Self::UpgradePip => "upgrade pip",
            Self::AcceleratorPackages => "accelerator packages",
            Self::CorePackages => "core packages",
            Self::Verify => "verify imports",
            Self::Commit => "commit",
        })
    }
}

/// How a step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum StepOutcome {
    Ok,
    /// Failed, but the environment still works in a reduced mode.
    Degraded(String),
    /// Failed and aborted the run.
    Fatal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Ordered record of what each step did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub records: Vec<StepRecord>,
}

impl BootstrapReport {
    pub fn ok(&mut self, step: Step) {
        self.push(step, StepOutcome::Ok);
    }

    pub fn degraded(&mut self, step: Step, reason: impl Into<String>) {
        self.push(step, StepOutcome::Degraded(reason.into()));
    }

    pub fn fatal(&mut self, step: Step, reason: impl Into<String>) {
        self.push(step, StepOutcome::Fatal(reason.into()));
    }

    fn push(&mut self, step: Step, outcome: StepOutcome) {
        self.records.push(StepRecord { step, outcome });
    }

    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.records
            .iter()
            .rev()
            .find(|r| r.step == step)
            .map(|r| &r.outcome)
    }

    pub fn is_degraded(&self) -> bool {
        self.records
            .iter()
            .any(|r| matches!(r.outcome, StepOutcome::Degraded(_)))
    }

    pub fn is_fatal(&self) -> bool {
        self.records
            .iter()
            .any(|r| matches!(r.outcome, StepOutcome::Fatal(_)))
    }

    /// Advisory failures, as `(step, reason)`.
    pub fn warnings(&self) -> impl Iterator<Item = (Step, &str)> {
        self.records.iter().filter_map(|r| match &r.outcome {
            StepOutcome::Degraded(reason) => Some((r.step, reason.as_str())),
            _ => None,
        })
    }
}

/// Successful result of `ensure_ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ready {
    /// Nothing to do; no installer ran.
    AlreadyReady(EnvironmentState),
    /// A bootstrap ran and committed.
    Bootstrapped {
        state: EnvironmentState,
        report: BootstrapReport,
    },
}

impl Ready {
    pub const fn state(&self) -> &EnvironmentState {
        match self {
            Self::AlreadyReady(state) | Self::Bootstrapped { state, .. } => state,
        }
    }

    pub const fn report(&self) -> Option<&BootstrapReport> {
        match self {
            Self::AlreadyReady(_) => None,
            Self::Bootstrapped { report, .. } => Some(report),
        }
    }
}
