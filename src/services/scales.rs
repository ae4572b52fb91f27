//! Contrast-driven scale generation.
//!
//! For every authored step of a palette, treated as a surface, this computes
//! the eight [`ScaleName`] variants. Every result is a pure function of the
//! palette's step colors and its primary step.
//!
//! # Algorithm
//!
//! 1. The surface is *light* when its truncated contrast against white is
//!    below 4.5; the contrasting color (CC) is then step 200 (Dark CC),
//!    otherwise step 2500 (Light CC).
//! 2. `High` is the CC at full opacity.
//! 3. `Low` is the smallest whole alpha percentage of the CC over the surface
//!    that reaches 4.5; when even 100% fails, a Bold-style walk at 4.5
//!    supplies an opaque step instead.
//! 4. `Medium` sits at the midpoint between 100% and Low's percentage,
//!    rounded with [`MEDIUM_ALPHA_ROUNDING`].
//! 5. `Bold` / `BoldA11Y` walk from the primary step toward the CC until the
//!    contrast reaches 3.0 / 4.5, clamping to the last step when none does.
//! 6. `Heavy` and `Minimal` are positional: see [`ScaleGenerator`].

use crate::models::{ContrastDirection, RgbColor, ScaleName, ScaleResult, Step, StepScales};
use crate::services::contrast::{self, AA_LARGE, AA_NORMAL};
use std::collections::BTreeMap;

/// Rounding applied to the midpoint of two whole alpha percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaRounding {
    /// Halves round up: midpoint(100, 55) = 78
    HalfUp,
    /// Halves round down: midpoint(100, 55) = 77
    Floor,
}

impl AlphaRounding {
    /// Midpoint of two percentages under this rounding rule.
    ///
    /// ```
    /// use rangde::services::scales::AlphaRounding;
    ///
    /// assert_eq!(AlphaRounding::HalfUp.midpoint(100, 55), 78);
    /// assert_eq!(AlphaRounding::Floor.midpoint(100, 55), 77);
    /// assert_eq!(AlphaRounding::HalfUp.midpoint(100, 56), 78);
    /// ```
    #[must_use]
    pub const fn midpoint(self, a: u8, b: u8) -> u8 {
        let sum = a as u16 + b as u16;
        match self {
            Self::HalfUp => sum.div_ceil(2) as u8,
            Self::Floor => (sum / 2) as u8,
        }
    }
}

/// Rounding rule for Medium: halfway between High (100%) and Low.
pub const MEDIUM_ALPHA_ROUNDING: AlphaRounding = AlphaRounding::HalfUp;

/// Furthest step position Heavy may take on a light surface (step 800).
pub const HEAVY_DARK_CC_MAX_POSITION: usize = 6;

/// Heavy on a dark surface falls back to step 2500 beyond this distance.
pub const HEAVY_LIGHT_CC_MAX_DISTANCE: usize = 3;

/// Distance in positions between a surface and its Minimal step.
pub const MINIMAL_DISTANCE: isize = 2;

/// Scales of every authored step of one palette.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleSet {
    /// Scales keyed by surface step
    pub steps: BTreeMap<Step, StepScales>,
    /// Problems met while generating (sparse steps, low contrast)
    pub warnings: Vec<String>,
}

impl ScaleSet {
    /// Result of one scale on one surface.
    #[must_use]
    pub fn get(&self, surface: Step, scale: ScaleName) -> Option<&ScaleResult> {
        self.steps.get(&surface).and_then(|s| s.get(scale))
    }

    /// Number of computed scale results across all surfaces.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.steps.values().map(|s| s.scales.len()).sum()
    }
}

/// Computes scales for every authored step of a palette.
///
/// ```
/// use rangde::models::{RgbColor, Step};
/// use rangde::services::scales::generate_all_scales;
/// use std::collections::BTreeMap;
///
/// let steps: BTreeMap<Step, RgbColor> = Step::all()
///     .map(|s| {
///         let v = (s.position() * 11) as u8;
///         (s, RgbColor::new(v, v, v))
///     })
///     .collect();
/// let set = generate_all_scales(&steps, Step::new(600).unwrap());
/// assert_eq!(set.steps.len(), 24);
/// ```
#[must_use]
pub fn generate_all_scales(steps: &BTreeMap<Step, RgbColor>, primary_step: Step) -> ScaleSet {
    ScaleGenerator::new(steps, primary_step).generate_all()
}

/// Outcome of a walk from the primary step toward the contrasting color.
#[derive(Debug, Clone, Copy)]
struct WalkOutcome {
    step: Step,
    color: RgbColor,
    passed: bool,
}

/// Scale generator over one palette.
///
/// Heavy on a light surface takes the midpoint position between Bold and
/// step 200, never above step 800. On a dark surface it equals BoldA11Y
/// unless BoldA11Y lies more than three positions from the surface, in which
/// case it is step 2500.
///
/// Minimal is two positions from the surface: downward for a light surface,
/// upward for a dark one, clamped to the ladder.
#[derive(Debug, Clone, Copy)]
pub struct ScaleGenerator<'a> {
    steps: &'a BTreeMap<Step, RgbColor>,
    primary_step: Step,
}

impl<'a> ScaleGenerator<'a> {
    /// Creates a generator for a palette's steps.
    #[must_use]
    pub const fn new(steps: &'a BTreeMap<Step, RgbColor>, primary_step: Step) -> Self {
        Self {
            steps,
            primary_step,
        }
    }

    /// Generates scales for every authored step.
    #[must_use]
    pub fn generate_all(&self) -> ScaleSet {
        let mut set = ScaleSet::default();

        for step in Step::all().filter(|s| !self.steps.contains_key(s)) {
            set.warnings
                .push(format!("step {step} has no color; searches skip it"));
        }

        for &surface in self.steps.keys() {
            if let Some(scales) = self.for_surface(surface, &mut set.warnings) {
                set.steps.insert(surface, scales);
            }
        }

        tracing::debug!(
            surfaces = set.steps.len(),
            results = set.result_count(),
            warnings = set.warnings.len(),
            "generated scales"
        );
        set
    }

    /// Light surfaces contrast toward step 200, dark ones toward step 2500.
    #[must_use]
    pub fn direction_for(surface: &RgbColor) -> ContrastDirection {
        if contrast::contrast(surface, &RgbColor::WHITE) < AA_NORMAL {
            ContrastDirection::DarkCc
        } else {
            ContrastDirection::LightCc
        }
    }

    /// Generates the scales of one surface step, or `None` if it has no color.
    pub fn for_surface(
        &self,
        surface_step: Step,
        warnings: &mut Vec<String>,
    ) -> Option<StepScales> {
        let surface = self.steps.get(&surface_step).copied()?;
        let direction = Self::direction_for(&surface);
        let mut scales = BTreeMap::new();

        scales.insert(ScaleName::Surface, opaque(&surface, surface_step, surface));

        let Some((cc_step, cc)) = self.contrasting_color(direction) else {
            warnings.push(format!(
                "surface {surface_step}: no authored step toward {}; only Surface generated",
                direction.extreme()
            ));
            return Some(StepScales {
                surface_step,
                direction,
                scales,
            });
        };
        scales.insert(ScaleName::High, opaque(&surface, cc_step, cc));

        let bold = self.walk(&surface, direction, AA_LARGE);
        let bold_a11y = self.walk(&surface, direction, AA_NORMAL);

        // Low / Medium
        let low_percent = if let Some(percent) = low_alpha_percent(&surface, &cc) {
            scales.insert(ScaleName::Low, translucent(&surface, cc_step, cc, percent));
            Some(percent)
        } else if let Some(fallback) = bold_a11y {
            scales.insert(
                ScaleName::Low,
                opaque(&surface, fallback.step, fallback.color),
            );
            Some(100)
        } else {
            None
        };
        if let Some(low) = low_percent {
            let percent = MEDIUM_ALPHA_ROUNDING.midpoint(100, low);
            scales.insert(
                ScaleName::Medium,
                translucent(&surface, cc_step, cc, percent),
            );
        }

        // Bold / BoldA11Y
        for (scale, outcome, threshold) in [
            (ScaleName::Bold, bold, AA_LARGE),
            (ScaleName::BoldA11y, bold_a11y, AA_NORMAL),
        ] {
            let Some(outcome) = outcome else {
                warnings.push(format!(
                    "surface {surface_step}: no authored step for {scale}"
                ));
                continue;
            };
            let result = opaque(&surface, outcome.step, outcome.color);
            if !outcome.passed {
                warnings.push(format!(
                    "surface {surface_step}: {scale} only reaches {:.2}:1 (needs {threshold:.1}:1)",
                    result.contrast_ratio
                ));
            }
            scales.insert(scale, result);
        }

        // Heavy
        let heavy_step = match direction {
            ContrastDirection::DarkCc => bold.and_then(|b| {
                Step::from_position((b.step.position() / 2).min(HEAVY_DARK_CC_MAX_POSITION))
            }),
            ContrastDirection::LightCc => bold_a11y.map(|b| {
                if b.step.distance(surface_step) > HEAVY_LIGHT_CC_MAX_DISTANCE {
                    Step::LIGHTEST
                } else {
                    b.step
                }
            }),
        };
        if let Some(step) = heavy_step {
            self.insert_positional(&mut scales, ScaleName::Heavy, &surface, step, warnings);
        }

        // Minimal
        let minimal_step = match direction {
            ContrastDirection::DarkCc => surface_step.offset_clamped(-MINIMAL_DISTANCE),
            ContrastDirection::LightCc => surface_step.offset_clamped(MINIMAL_DISTANCE),
        };
        // The CC step stays reserved for High
        if minimal_step == cc_step {
            warnings.push(format!(
                "surface {surface_step}: Minimal lands on the CC step {cc_step}; skipped"
            ));
        } else {
            self.insert_positional(
                &mut scales,
                ScaleName::Minimal,
                &surface,
                minimal_step,
                warnings,
            );
        }

        Some(StepScales {
            surface_step,
            direction,
            scales,
        })
    }

    fn insert_positional(
        &self,
        scales: &mut BTreeMap<ScaleName, ScaleResult>,
        scale: ScaleName,
        surface: &RgbColor,
        step: Step,
        warnings: &mut Vec<String>,
    ) {
        match self.steps.get(&step) {
            Some(&color) => {
                scales.insert(scale, opaque(surface, step, color));
            }
            None => warnings.push(format!("{scale} step {step} has no color; skipped")),
        }
    }

    /// The CC extreme, or the nearest authored step to it for sparse palettes.
    fn contrasting_color(&self, direction: ContrastDirection) -> Option<(Step, RgbColor)> {
        let mut current = Some(direction.extreme());
        while let Some(step) = current {
            if let Some(&color) = self.steps.get(&step) {
                return Some((step, color));
            }
            current = step.offset(-direction.delta());
        }
        None
    }

    /// Walks from the primary step toward the CC until `threshold` is met.
    ///
    /// Steps without a color are skipped. When nothing passes, the last
    /// authored step visited (the terminal step when present) is returned
    /// with `passed == false`.
    fn walk(
        &self,
        surface: &RgbColor,
        direction: ContrastDirection,
        threshold: f64,
    ) -> Option<WalkOutcome> {
        let mut last = None;
        let mut current = Some(self.primary_step);
        while let Some(step) = current {
            if let Some(&color) = self.steps.get(&step) {
                if contrast::meets(surface, &color, threshold) {
                    return Some(WalkOutcome {
                        step,
                        color,
                        passed: true,
                    });
                }
                last = Some(WalkOutcome {
                    step,
                    color,
                    passed: false,
                });
            }
            current = step.offset(direction.delta());
        }
        last
    }
}

/// Smallest whole percentage of `cc` over `surface` reaching 4.5.
fn low_alpha_percent(surface: &RgbColor, cc: &RgbColor) -> Option<u8> {
    (1..=100u8).find(|&percent| {
        let shown = cc.blend_over(surface, f64::from(percent) / 100.0);
        contrast::meets(surface, &shown, AA_NORMAL)
    })
}

fn opaque(surface: &RgbColor, step: Step, color: RgbColor) -> ScaleResult {
    ScaleResult {
        hex: color,
        alpha: 1.0,
        contrast_ratio: contrast::contrast(surface, &color),
        source_step: step,
    }
}

fn translucent(surface: &RgbColor, step: Step, color: RgbColor, percent: u8) -> ScaleResult {
    let alpha = f64::from(percent) / 100.0;
    let shown = color.blend_over(surface, alpha);
    ScaleResult {
        hex: color,
        alpha,
        contrast_ratio: contrast::contrast(surface, &shown),
        source_step: step,
    }
}
