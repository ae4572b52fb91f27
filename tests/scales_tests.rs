//! Scale generation over realistic palettes.

mod fixtures;

use fixtures::*;
use rangde::models::{ContrastDirection, RgbColor, ScaleName, Step};
use rangde::services::contrast::{self, AA_LARGE, AA_NORMAL};
use rangde::services::scales::{generate_all_scales, MEDIUM_ALPHA_ROUNDING};
use std::collections::BTreeMap;

fn step(value: u16) -> Step {
    Step::new(value).unwrap()
}

#[test]
fn test_indigo_light_surface_scales() {
    let indigo = indigo();
    let set = generate_all_scales(&indigo.steps, indigo.primary_step);
    let surface_step = step(2400);
    let surface = indigo.steps[&surface_step];
    let scales = &set.steps[&surface_step];

    assert_eq!(scales.direction, ContrastDirection::DarkCc);

    let own = scales.get(ScaleName::Surface).unwrap();
    assert_eq!(own.hex, surface);
    assert_eq!(own.alpha, 1.0);

    let high = scales.get(ScaleName::High).unwrap();
    assert_eq!(high.hex, RgbColor::new(0x0b, 0x00, 0x34));
    assert_eq!(high.source_step, Step::DARKEST);
    assert_eq!(high.alpha, 1.0);

    let low = scales.get(ScaleName::Low).unwrap();
    let percent = (low.alpha * 100.0).round() as u8;
    assert!((1..=100).contains(&percent));
    assert!(contrast::meets(&surface, &low.composited_on(&surface), AA_NORMAL));
    assert!(low.contrast_ratio >= AA_NORMAL);

    // One percent less must no longer pass
    if percent > 1 {
        let weaker = low.hex.blend_over(&surface, f64::from(percent - 1) / 100.0);
        assert!(!contrast::meets(&surface, &weaker, AA_NORMAL));
    }

    let medium = scales.get(ScaleName::Medium).unwrap();
    let medium_percent = (medium.alpha * 100.0).round() as u8;
    assert_eq!(medium_percent, MEDIUM_ALPHA_ROUNDING.midpoint(100, percent));
    assert!(medium_percent >= percent);
}

#[test]
fn test_bold_walks_from_primary_toward_cc() {
    let indigo = indigo();
    let set = generate_all_scales(&indigo.steps, indigo.primary_step);

    for scales in set.steps.values() {
        let surface = indigo.steps[&scales.surface_step];
        for (scale, threshold) in [(ScaleName::Bold, AA_LARGE), (ScaleName::BoldA11y, AA_NORMAL)] {
            let Some(result) = scales.get(scale) else {
                continue;
            };
            if result.contrast_ratio < threshold {
                continue;
            }
            // First passing step: every step between primary and it fails
            let delta = scales.direction.delta();
            let mut current = Some(indigo.primary_step);
            while let Some(s) = current {
                if s == result.source_step {
                    break;
                }
                assert!(
                    !contrast::meets(&surface, &indigo.steps[&s], threshold),
                    "{scale} on {} skipped passing step {s}",
                    scales.surface_step
                );
                current = s.offset(delta);
            }
        }
    }
}

#[test]
fn test_dark_surface_contrasts_toward_white() {
    let indigo = indigo();
    let set = generate_all_scales(&indigo.steps, indigo.primary_step);
    let scales = &set.steps[&step(300)];

    assert_eq!(scales.direction, ContrastDirection::LightCc);
    let high = scales.get(ScaleName::High).unwrap();
    assert_eq!(high.hex, RgbColor::WHITE);
    assert_eq!(high.source_step, Step::LIGHTEST);

    let minimal = scales.get(ScaleName::Minimal).unwrap();
    assert_eq!(minimal.source_step, step(500));
}

#[test]
fn test_minimal_clamps_at_ladder_ends() {
    let slate = slate();
    let set = generate_all_scales(&slate.steps, slate.primary_step);

    let lightest = set.get(Step::LIGHTEST, ScaleName::Minimal).unwrap();
    assert_eq!(lightest.source_step, step(2300));

    let darkest = set.get(Step::DARKEST, ScaleName::Minimal).unwrap();
    assert_eq!(darkest.source_step, step(400));
}

#[test]
fn test_heavy_on_light_surface_never_above_800() {
    for palette in [indigo(), slate(), coral(), jade()] {
        let set = generate_all_scales(&palette.steps, palette.primary_step);
        for scales in set.steps.values() {
            if scales.direction != ContrastDirection::DarkCc {
                continue;
            }
            if let Some(heavy) = scales.get(ScaleName::Heavy) {
                assert!(heavy.source_step <= step(800), "{}", palette.name);
            }
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    let coral = coral();
    let a = generate_all_scales(&coral.steps, coral.primary_step);
    let b = generate_all_scales(&coral.steps, coral.primary_step);
    assert_eq!(a, b);
    assert_eq!(a.result_count(), 24 * 8);
    assert!(a.warnings.iter().all(|w| !w.contains("has no color")));
}

#[test]
fn test_bold_a11y_rejects_4_49_and_takes_next_step() {
    // Dim greys up to 1300, then 4.49:1 at 1400 and 4.55:1 at 1500
    let steps: BTreeMap<Step, RgbColor> = Step::all()
        .map(|s| {
            let v = match s.value() {
                200 => 0x00,
                300 => 0x0a,
                400 => 0x14,
                500 => 0x23,
                600..=1300 => 0x30 + (s.position() as u8 - 4) * 8,
                1400 => 0x89,
                1500 => 0x8a,
                2500 => 0xff,
                _ => 0x90 + (s.position() as u8 - 14) * 8,
            };
            (s, RgbColor::new(v, v, v))
        })
        .collect();
    let surface_step = step(500);
    let surface = steps[&surface_step];
    assert_eq!(contrast::contrast(&surface, &steps[&step(1400)]), 4.49);

    let set = generate_all_scales(&steps, step(600));
    let scales = &set.steps[&surface_step];
    assert_eq!(scales.direction, ContrastDirection::LightCc);

    let bold_a11y = scales.get(ScaleName::BoldA11y).unwrap();
    assert_eq!(bold_a11y.source_step, step(1500));
    assert!(bold_a11y.contrast_ratio >= AA_NORMAL);

    // 4.49 is still enough for Bold
    assert_eq!(scales.get(ScaleName::Bold).unwrap().source_step, step(1400));
    assert!(!set
        .warnings
        .iter()
        .any(|w| w.starts_with("surface 500: Bold A11Y")));
}
