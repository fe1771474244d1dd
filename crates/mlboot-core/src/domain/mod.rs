//! Domain types for environment bootstrapping.

mod accelerator;
mod config;
mod interpreter;
mod report;
mod state;
mod variant;

pub use accelerator::{Accelerator, parse_cuda_version};
pub use config::{
    ACCELERATOR_PACKAGES, BootstrapConfig, CORE_PACKAGES, InterpreterSettings,
    PINNED_PYTHON_VERSION, REQUIRED_MODULES,
};
pub use interpreter::{Interpreter, InvocationForm, Platform, PythonVersion};
pub use report::{BootstrapReport, Ready, Step, StepOutcome, StepRecord};
pub use state::{BootstrapPhase, EnvironmentState};
pub use variant::{
    PYTORCH_INDEX_BASE, SelectionSource, Variant, VariantChoice, VariantSelection,
    select_variant,
};
