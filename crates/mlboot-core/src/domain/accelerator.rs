//! Detected accelerator capability.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static CUDA_VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CUDA Version:\s*([^\s|]+)").expect("CUDA version pattern is valid")
});

/// Accelerator found on this machine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Accelerator {
    /// No usable GPU, or detection failed.
    #[default]
    None,
    /// NVIDIA hardware. `cuda_version` is the raw token the driver
    /// reported after `CUDA Version:`, if any.
    Nvidia { cuda_version: Option<String> },
}

impl Accelerator {
    pub const fn is_gpu(&self) -> bool {
        matches!(self, Self::Nvidia { .. })
    }

    /// Raw CUDA version text, if the driver reported one.
    pub fn cuda_version(&self) -> Option<&str> {
        match self {
            Self::Nvidia { cuda_version } => cuda_version.as_deref(),
            Self::None => None,
        }
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Nvidia {
                cuda_version: Some(version),
            } => write!(f, "nvidia-cuda{version}"),
            Self::Nvidia { cuda_version: None } => write!(f, "nvidia (CUDA version unknown)"),
        }
    }
}

/// Extract the token following `CUDA Version:` from `nvidia-smi` output.
///
/// The token is returned verbatim (e.g. `"12.1"`, `"N/A"`); whether it maps
/// to a package variant is decided by [`crate::select_variant`].
pub fn parse_cuda_version(diagnostic: &str) -> Option<String> {
    CUDA_VERSION_LINE
        .captures(diagnostic)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMI_HEADER: &str = "\
+---------------------------------------------------------------------------------------+
| NVIDIA-SMI 530.30.02              Driver Version: 530.30.02    CUDA Version: 12.1     |
|-----------------------------------------+----------------------+----------------------+";

    #[test]
    fn test_parse_cuda_version_from_smi_header() {
        assert_eq!(parse_cuda_version(SMI_HEADER).as_deref(), Some("12.1"));
    }

    #[test]
    fn test_parse_ignores_driver_version() {
        let text = "Driver Version: 535.104.05";
        assert_eq!(parse_cuda_version(text), None);
    }

    #[test]
    fn test_parse_keeps_unparseable_token() {
        let text = "| Driver Version: 470.1   CUDA Version: N/A |";
        assert_eq!(parse_cuda_version(text).as_deref(), Some("N/A"));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Accelerator::None.to_string(), "none");
        let gpu = Accelerator::Nvidia {
            cuda_version: Some("12.1".to_string()),
        };
        assert_eq!(gpu.to_string(), "nvidia-cuda12.1");
        assert!(gpu.is_gpu());
        assert_eq!(gpu.cuda_version(), Some("12.1"));
    }
}
