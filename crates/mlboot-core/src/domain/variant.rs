//! Package-source variants and their selection.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::accelerator::Accelerator;

/// Base URL of the PyTorch wheel indexes.
pub const PYTORCH_INDEX_BASE: &str = "https://download.pytorch.org/whl";

static MAJOR_MINOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)").expect("major.minor pattern is valid"));

/// A package source for the accelerator-specific runtime packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Cpu,
    Cu118,
    Cu121,
    Cu124,
    Cu126,
    Cu128,
}

impl Variant {
    pub const ALL: [Self; 6] = [
        Self::Cpu,
        Self::Cu118,
        Self::Cu121,
        Self::Cu124,
        Self::Cu126,
        Self::Cu128,
    ];

    /// Stable key, also the index path segment.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cu118 => "cu118",
            Self::Cu121 => "cu121",
            Self::Cu124 => "cu124",
            Self::Cu126 => "cu126",
            Self::Cu128 => "cu128",
        }
    }

    /// CUDA (major, minor) this variant is built against.
    pub const fn cuda_version(self) -> Option<(u32, u32)> {
        match self {
            Self::Cpu => None,
            Self::Cu118 => Some((11, 8)),
            Self::Cu121 => Some((12, 1)),
            Self::Cu124 => Some((12, 4)),
            Self::Cu126 => Some((12, 6)),
            Self::Cu128 => Some((12, 8)),
        }
    }

    pub fn index_url(self) -> String {
        format!("{PYTORCH_INDEX_BASE}/{}", self.key())
    }

    /// Variant keyed by exactly this CUDA version.
    pub fn for_cuda(major: u32, minor: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.cuda_version() == Some((major, minor)))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.key() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|v| v.key()).collect();
                format!("Unknown variant '{s}'. Expected one of: auto, {}", known.join(", "))
            })
    }
}

/// User preference for the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantChoice {
    /// Pick from the detected accelerator.
    #[default]
    Auto,
    /// Use this variant regardless of detection.
    Explicit(Variant),
}

impl FromStr for VariantChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Explicit)
        }
    }
}

/// Indicates how a variant was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "reason", rename_all = "snake_case")]
pub enum SelectionSource {
    /// The user asked for it.
    Override,
    /// Mapped from the detected CUDA version.
    Detected,
    /// No accelerator present.
    NoAccelerator,
    /// An accelerator was present but its version did not map to a variant.
    Fallback(String),
}

/// Result of [`select_variant`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSelection {
    pub variant: Variant,
    pub source: SelectionSource,
}

impl VariantSelection {
    /// Warning text when the choice fell back to CPU.
    pub fn fallback_reason(&self) -> Option<&str> {
        match &self.source {
            SelectionSource::Fallback(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Map the detected accelerator and the user's choice to a package variant.
///
/// Missing, unparseable and unknown CUDA versions all fall back to
/// [`Variant::Cpu`] with a reason.
pub fn select_variant(accelerator: &Accelerator, choice: VariantChoice) -> VariantSelection {
    if let VariantChoice::Explicit(variant) = choice {
        return VariantSelection {
            variant,
            source: SelectionSource::Override,
        };
    }

    let Accelerator::Nvidia { cuda_version } = accelerator else {
        return VariantSelection {
            variant: Variant::Cpu,
            source: SelectionSource::NoAccelerator,
        };
    };

    let fallback = |reason: String| VariantSelection {
        variant: Variant::Cpu,
        source: SelectionSource::Fallback(reason),
    };

    let Some(raw) = cuda_version.as_deref() else {
        return fallback("NVIDIA GPU found but the driver did not report a CUDA version".into());
    };

    let Some((major, minor)) = parse_major_minor(raw) else {
        return fallback(format!("Could not parse CUDA version '{raw}'"));
    };

    Variant::for_cuda(major, minor).map_or_else(
        || fallback(format!("No package variant for CUDA {major}.{minor}")),
        |variant| VariantSelection {
            variant,
            source: SelectionSource::Detected,
        },
    )
}

fn parse_major_minor(raw: &str) -> Option<(u32, u32)> {
    let caps = MAJOR_MINOR.captures(raw.trim())?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    Some((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nvidia(version: Option<&str>) -> Accelerator {
        Accelerator::Nvidia {
            cuda_version: version.map(String::from),
        }
    }

    #[test]
    fn test_cuda_12_1_selects_cu121() {
        let selection = select_variant(&nvidia(Some("12.1")), VariantChoice::Auto);
        assert_eq!(selection.variant, Variant::Cu121);
        assert_eq!(selection.source, SelectionSource::Detected);
        assert_eq!(
            selection.variant.index_url(),
            "https://download.pytorch.org/whl/cu121"
        );
    }

    #[test]
    fn test_every_known_key_round_trips_through_detection() {
        for variant in Variant::ALL {
            if let Some((major, minor)) = variant.cuda_version() {
                let version = format!("{major}.{minor}");
                let selection = select_variant(&nvidia(Some(&version)), VariantChoice::Auto);
                assert_eq!(selection.variant, variant, "version {version}");
            }
        }
    }

    #[test]
    fn test_unknown_versions_fall_back_to_cpu() {
        for raw in ["12.2", "10.0", "13.0", "N/A", "", "twelve", ".1", "12"] {
            let selection = select_variant(&nvidia(Some(raw)), VariantChoice::Auto);
            assert_eq!(selection.variant, Variant::Cpu, "version {raw:?}");
            assert!(selection.fallback_reason().is_some(), "version {raw:?}");
        }
    }

    #[test]
    fn test_missing_version_falls_back_with_warning() {
        let selection = select_variant(&nvidia(None), VariantChoice::Auto);
        assert_eq!(selection.variant, Variant::Cpu);
        assert!(selection.fallback_reason().unwrap().contains("CUDA version"));
    }

    #[test]
    fn test_no_accelerator_is_cpu_without_warning() {
        let selection = select_variant(&Accelerator::None, VariantChoice::Auto);
        assert_eq!(selection.variant, Variant::Cpu);
        assert_eq!(selection.source, SelectionSource::NoAccelerator);
        assert!(selection.fallback_reason().is_none());
    }

    #[test]
    fn test_override_wins_over_detection() {
        let choice = VariantChoice::Explicit(Variant::Cu118);
        assert_eq!(select_variant(&nvidia(Some("12.1")), choice).variant, Variant::Cu118);
        assert_eq!(select_variant(&Accelerator::None, choice).variant, Variant::Cu118);
    }

    #[test]
    fn test_patch_suffix_is_ignored() {
        let selection = select_variant(&nvidia(Some("12.4.1")), VariantChoice::Auto);
        assert_eq!(selection.variant, Variant::Cu124);
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("auto".parse::<VariantChoice>().unwrap(), VariantChoice::Auto);
        assert_eq!(
            "CU126".parse::<VariantChoice>().unwrap(),
            VariantChoice::Explicit(Variant::Cu126)
        );
        let err = "rocm".parse::<VariantChoice>().unwrap_err();
        assert!(err.contains("cu121"));
    }
}
