//! Layer 0: raw scale colors per palette, surface step and scale.

use super::{LayerContext, LayerGenerator};
use crate::models::{
    EntryDraft, EntryMetadata, EntryValue, LayerKind, ScaleName, TokenKey, VALUE_MODE,
};
use crate::services::registry::VariableRegistry;
use crate::services::scales::generate_all_scales;
use crate::services::validation::{
    ValidationError, ValidationErrorKind, ValidationReport, ValidationWarning,
};

/// Writes one color entry per computed scale result.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitivesLayer;

impl LayerGenerator for PrimitivesLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Primitives
    }

    fn modes(
        &self,
        _ctx: &LayerContext<'_>,
        configured: &[String],
        report: &mut ValidationReport,
    ) -> Vec<String> {
        value_modes(self.kind(), configured, report)
    }

    fn generate(
        &self,
        ctx: &LayerContext<'_>,
        _registry: &VariableRegistry,
        modes: &[String],
        report: &mut ValidationReport,
    ) -> Vec<EntryDraft> {
        let Some(mode) = modes.first() else {
            return Vec::new();
        };

        let mut drafts = Vec::new();
        for palette in ctx.palettes_in_use {
            let set = generate_all_scales(&palette.steps, palette.primary_step);
            for warning in &set.warnings {
                report.add_warning(
                    ValidationWarning::new(format!("{}: {warning}", palette.name))
                        .with_layer(self.kind().index()),
                );
            }

            for (&step, scales) in &set.steps {
                for scale in ScaleName::ALL {
                    let Some(result) = scales.get(scale) else {
                        continue;
                    };
                    drafts.push(EntryDraft {
                        key: TokenKey::Primitive {
                            palette: palette.id.clone(),
                            step,
                            scale,
                        },
                        mode_name: mode.clone(),
                        value: EntryValue::Color {
                            rgb: result.hex,
                            alpha: result.alpha,
                        },
                        metadata: EntryMetadata {
                            palette_id: Some(palette.id.clone()),
                            contrast_ratio: Some(result.contrast_ratio),
                            source_step: Some(result.source_step),
                            ..EntryMetadata::default()
                        },
                    });
                }
            }
        }
        drafts
    }
}

/// The single `Value` mode of the step-addressed layers.
pub(crate) fn value_modes(
    kind: LayerKind,
    configured: &[String],
    report: &mut ValidationReport,
) -> Vec<String> {
    for name in configured {
        if !name.trim().eq_ignore_ascii_case(VALUE_MODE) {
            report.add_error(
                ValidationError::new(
                    ValidationErrorKind::InvalidMode,
                    format!("'{name}' is not a mode of {kind}; skipped"),
                )
                .with_layer(kind.index())
                .with_suggestion(format!("{kind} has the single mode '{VALUE_MODE}'")),
            );
        }
    }
    vec![VALUE_MODE.to_string()]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::{Palette, PaletteTable, RgbColor, Step};

    #[test]
    fn test_complete_palette_yields_every_scale() {
        let palettes: PaletteTable = [grey("g", "Grey")].into_iter().collect();
        let in_use: Vec<&Palette> = palettes.iter().collect();
        let ctx = LayerContext {
            palettes: &palettes,
            palettes_in_use: &in_use,
            brands: &[],
        };
        let mut report = ValidationReport::new();
        let registry = run_layers(&ctx, &[LayerKind::Primitives], &mut report);

        assert_eq!(registry.len(), 24 * 8);
        assert!(registry.entries().iter().all(|e| !e.value.is_alias()));
        let surface = registry
            .find_by_name("collection:0", "Grey/1200/Surface")
            .into_iter()
            .next()
            .unwrap();
        assert_eq!(surface.mode_name, "Value");
        assert_eq!(surface.metadata.source_step, Some(Step::new(1200).unwrap()));
    }

    #[test]
    fn test_sparse_palette_warns_and_skips() {
        let palette = Palette::new("s", "Sparse", Step::new(600).unwrap())
            .with_step(Step::new(200).unwrap(), RgbColor::new(0, 0, 0))
            .with_step(Step::new(2500).unwrap(), RgbColor::WHITE);
        let palettes: PaletteTable = [palette].into_iter().collect();
        let in_use: Vec<&Palette> = palettes.iter().collect();
        let ctx = LayerContext {
            palettes: &palettes,
            palettes_in_use: &in_use,
            brands: &[],
        };
        let mut report = ValidationReport::new();
        let registry = run_layers(&ctx, &[LayerKind::Primitives], &mut report);

        assert!(report.is_valid());
        assert!(!report.warnings.is_empty());
        assert!(registry
            .entries()
            .iter()
            .all(|e| matches!(
                e.key,
                TokenKey::Primitive { step, .. } if step.value() == 200 || step.value() == 2500
            )));
    }

    #[test]
    fn test_value_modes_rejects_other_names() {
        let mut report = ValidationReport::new();
        let modes = value_modes(
            LayerKind::Primitives,
            &["Light".to_string()],
            &mut report,
        );
        assert_eq!(modes, vec!["Value".to_string()]);
        assert_eq!(report.count_errors(ValidationErrorKind::InvalidMode), 1);
    }
}
