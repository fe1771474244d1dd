//! Bootstrap configuration.

use super::variant::VariantChoice;

/// Modules that must import for the environment to count as ready.
pub const REQUIRED_MODULES: &[&str] = &["ultralytics", "cv2"];

/// Installed from the selected variant's index; failure is tolerated.
pub const ACCELERATOR_PACKAGES: &[&str] = &["torch", "torchvision", "torchaudio"];

/// Installed from the default index; failure is fatal.
pub const CORE_PACKAGES: &[&str] = &["ultralytics", "opencv-python"];

/// Interpreter version offered when no usable Python is found.
pub const PINNED_PYTHON_VERSION: &str = "3.11.9";

/// Which interpreter to accept and which to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterSettings {
    /// Version downloaded when the user agrees to an install.
    pub pinned_version: String,
    /// Oldest (major, minor) accepted from the system.
    pub minimum: (u32, u32),
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        Self {
            pinned_version: PINNED_PYTHON_VERSION.to_string(),
            minimum: (3, 8),
        }
    }
}

/// Everything the bootstrapper needs to know besides paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub required_modules: Vec<String>,
    pub accelerator_packages: Vec<String>,
    pub core_packages: Vec<String>,
    pub variant: VariantChoice,
    /// Treat failed post-install imports as fatal instead of advisory.
    pub strict_verify: bool,
    /// Skip the readiness short-circuit and run every step again.
    pub force: bool,
    pub interpreter: InterpreterSettings,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            required_modules: to_owned(REQUIRED_MODULES),
            accelerator_packages: to_owned(ACCELERATOR_PACKAGES),
            core_packages: to_owned(CORE_PACKAGES),
            variant: VariantChoice::Auto,
            strict_verify: false,
            force: false,
            interpreter: InterpreterSettings::default(),
        }
    }
}

impl BootstrapConfig {
    #[must_use]
    pub const fn with_variant(mut self, variant: VariantChoice) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub const fn with_strict_verify(mut self, strict: bool) -> Self {
        self.strict_verify = strict;
        self
    }

    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    #[must_use]
    pub fn with_required_modules(mut self, modules: &[&str]) -> Self {
        self.required_modules = to_owned(modules);
        self
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
