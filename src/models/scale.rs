//! Scale names and per-step scale results produced by the scale generator.

use super::{RgbColor, Step};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the eight derived color roles computed for every surface step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScaleName {
    /// The step's own color
    Surface,
    /// Contrasting extreme at full opacity
    High,
    /// Contrasting extreme halfway between High and Low opacity
    Medium,
    /// Lowest opacity of the contrasting extreme that still reads at 4.5:1
    Low,
    /// Deep accent derived from Bold / BoldA11Y
    Heavy,
    /// First palette step from the primary step reaching 3:1
    Bold,
    /// First palette step from the primary step reaching 4.5:1
    #[serde(rename = "BoldA11Y")]
    BoldA11y,
    /// Decorative neighbour two steps from the surface
    Minimal,
}

impl ScaleName {
    /// All scales in generation order.
    pub const ALL: [Self; 8] = [
        Self::Surface,
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Heavy,
        Self::Bold,
        Self::BoldA11y,
        Self::Minimal,
    ];

    /// Name used inside generated token names.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Surface => "Surface",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Heavy => "Heavy",
            Self::Bold => "Bold",
            Self::BoldA11y => "Bold A11Y",
            Self::Minimal => "Minimal",
        }
    }
}

impl fmt::Display for ScaleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ScaleName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|scale| {
                scale
                    .display_name()
                    .replace(' ', "")
                    .eq_ignore_ascii_case(&normalized)
            })
            .ok_or_else(|| anyhow::anyhow!("Unknown scale '{s}'"))
    }
}

/// A computed scale color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleResult {
    /// Opaque color of the scale before any alpha is applied
    pub hex: RgbColor,
    /// Opacity (0-1); 1.0 unless the scale is an alpha blend
    pub alpha: f64,
    /// Contrast against the surface, truncated to 2 decimals
    pub contrast_ratio: f64,
    /// Palette step the color was taken from
    pub source_step: Step,
}

impl ScaleResult {
    /// Color as rendered on `surface` once alpha is applied.
    #[must_use]
    pub fn composited_on(&self, surface: &RgbColor) -> RgbColor {
        self.hex.blend_over(surface, self.alpha)
    }
}

/// Which way the contrasting color lies for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContrastDirection {
    /// Light surface: contrast walks toward step 200
    DarkCc,
    /// Dark surface: contrast walks toward step 2500
    LightCc,
}

impl ContrastDirection {
    /// Position delta of one step toward the contrasting color.
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::DarkCc => -1,
            Self::LightCc => 1,
        }
    }

    /// The palette extreme used as contrasting color.
    #[must_use]
    pub const fn extreme(self) -> Step {
        match self {
            Self::DarkCc => Step::DARKEST,
            Self::LightCc => Step::LIGHTEST,
        }
    }
}

/// Eight scale results for one (palette, surface step) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepScales {
    /// Surface step these scales were computed for
    pub surface_step: Step,
    /// Direction of the contrasting color for this surface
    pub direction: ContrastDirection,
    /// Computed scales; a scale is absent only when a sparse palette left no candidate
    pub scales: BTreeMap<ScaleName, ScaleResult>,
}

impl StepScales {
    /// Result for one scale.
    #[must_use]
    pub fn get(&self, scale: ScaleName) -> Option<&ScaleResult> {
        self.scales.get(&scale)
    }

    /// True when all eight scales were computed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scales.len() == ScaleName::ALL.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_names_parse_loosely() {
        assert_eq!("Bold A11Y".parse::<ScaleName>().unwrap(), ScaleName::BoldA11y);
        assert_eq!("bolda11y".parse::<ScaleName>().unwrap(), ScaleName::BoldA11y);
        assert_eq!("surface".parse::<ScaleName>().unwrap(), ScaleName::Surface);
        assert!("Loud".parse::<ScaleName>().is_err());
    }

    #[test]
    fn test_exactly_eight_scales() {
        assert_eq!(ScaleName::ALL.len(), 8);
        assert_eq!(ScaleName::BoldA11y.to_string(), "Bold A11Y");
    }

    #[test]
    fn test_direction_extremes() {
        assert_eq!(ContrastDirection::DarkCc.extreme(), Step::DARKEST);
        assert_eq!(ContrastDirection::LightCc.extreme(), Step::LIGHTEST);
        assert_eq!(ContrastDirection::DarkCc.delta(), -1);
    }

    #[test]
    fn test_serde_name_for_bold_a11y() {
        assert_eq!(
            serde_json::to_string(&ScaleName::BoldA11y).unwrap(),
            "\"BoldA11Y\""
        );
    }
}
