//! Core domain types, ports and services for mlboot.
//!
//! `mlboot` prepares an isolated Python environment for an Ultralytics /
//! PyTorch / OpenCV workload and then launches a user script inside it.
//! This crate holds everything that does not spawn processes itself:
//!
//! - [`domain`]: environment state, accelerator and variant types, reports
//! - [`ports`]: the [`CommandRunner`] and [`InstallPrompt`] seams
//! - [`paths`]: on-disk layout of the environment root
//! - [`services`]: the bootstrapper, uninstaller and script launcher
//!
//! Adapters in `mlboot-runtime` provide the real process runner and the
//! interactive prompt; `mlboot-cli` wires them together.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod paths;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{
    Accelerator, BootstrapConfig, BootstrapPhase, BootstrapReport, EnvironmentState,
    Interpreter, InterpreterSettings, InvocationForm, Platform, Ready, SelectionSource, Step,
    StepOutcome, StepRecord, Variant, VariantChoice, VariantSelection, select_variant,
};
pub use error::BootstrapError;
pub use paths::{EnvLayout, PathError};
pub use ports::{
    AutoConfirmPrompt, CommandOutput, CommandRunner, InstallPrompt, Invocation,
    NonInteractivePrompt, PromptError, StdioMode,
};
pub use services::{
    Bootstrapper, LaunchTarget, RemovalOutcome, RemovalRecord, UninstallReport, UninstallTarget,
    detect_accelerator, uninstall,
};

// Only exercised by unit tests in this crate
#[cfg(test)]
use tempfile as _;
