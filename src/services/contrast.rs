//! WCAG contrast math with strict two-decimal truncation.
//!
//! Every threshold comparison in the crate goes through [`meets`], which
//! compares the *truncated* ratio: a true ratio of 4.499 is 4.49 and fails
//! a 4.5 requirement.

use crate::models::RgbColor;

/// Minimum ratio for body text (WCAG AA normal text).
pub const AA_NORMAL: f64 = 4.5;

/// Minimum ratio for large text and UI components (WCAG AA large).
pub const AA_LARGE: f64 = 3.0;

/// Unrounded WCAG contrast ratio between two colors.
///
/// Symmetric in its arguments and always in `1.0..=21.0`.
#[must_use]
pub fn raw_contrast(a: &RgbColor, b: &RgbColor) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Truncates toward zero at two decimal places.
///
/// ```
/// use rangde::services::contrast::truncate2;
///
/// assert_eq!(truncate2(4.499), 4.49);
/// assert_eq!(truncate2(4.5), 4.5);
/// assert_eq!(truncate2(17.918), 17.91);
/// ```
#[must_use]
pub fn truncate2(ratio: f64) -> f64 {
    (ratio * 100.0).trunc() / 100.0
}

/// Contrast ratio truncated to two decimals.
#[must_use]
pub fn contrast(a: &RgbColor, b: &RgbColor) -> f64 {
    truncate2(raw_contrast(a, b))
}

/// True when the truncated ratio reaches `threshold`.
#[must_use]
pub fn meets(a: &RgbColor, b: &RgbColor, threshold: f64) -> bool {
    contrast(a, b) >= threshold
}
