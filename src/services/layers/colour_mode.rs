//! Layer 2: `Root` offsets resolved per light/dark mode.
//!
//! Light roots sit at step 2500 and each offset moves one step darker; dark
//! roots sit at step 200 and move lighter. Offsets run from 0 to 6.

use super::{typed_modes, AliasBuilder, LayerContext, LayerGenerator, TargetMode};
use crate::models::{ColourMode, EntryDraft, LayerKind, ScaleName, TokenKey, ROOT_OFFSET_MAX};
use crate::services::registry::VariableRegistry;
use crate::services::validation::ValidationReport;

/// `{Palette}/Semi semantics/Root +n/[Colour Mode] {Scale}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColourModeLayer;

impl LayerGenerator for ColourModeLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::ColourMode
    }

    fn modes(
        &self,
        _ctx: &LayerContext<'_>,
        configured: &[String],
        report: &mut ValidationReport,
    ) -> Vec<String> {
        typed_modes::<ColourMode>(self.kind(), configured, report)
            .into_iter()
            .map(|mode| mode.to_string())
            .collect()
    }

    fn generate(
        &self,
        ctx: &LayerContext<'_>,
        registry: &VariableRegistry,
        modes: &[String],
        report: &mut ValidationReport,
    ) -> Vec<EntryDraft> {
        let mut builder = AliasBuilder::new(self.kind(), ctx, registry);
        for name in modes {
            let Ok(mode) = name.parse::<ColourMode>() else {
                continue;
            };
            for palette in ctx.palettes_in_use {
                for offset in 0..=ROOT_OFFSET_MAX {
                    let Some(step) = mode.root_step(offset) else {
                        continue;
                    };
                    for scale in ScaleName::ALL {
                        let source = TokenKey::ColourMode {
                            palette: palette.id.clone(),
                            offset,
                            scale,
                        };
                        let target = TokenKey::SemiSemantic {
                            palette: palette.id.clone(),
                            step,
                            scale,
                        };
                        let target_mode = TargetMode::Preferred(name);
                        builder.link(report, source, name, &target, target_mode, None);
                    }
                }
            }
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::{EntryValue, Palette, PaletteTable};

    #[test]
    fn test_root_offsets_point_at_mode_steps() {
        let palettes: PaletteTable = [grey("g", "Grey")].into_iter().collect();
        let in_use: Vec<&Palette> = palettes.iter().collect();
        let ctx = LayerContext {
            palettes: &palettes,
            palettes_in_use: &in_use,
            brands: &[],
        };
        let mut report = ValidationReport::new();
        let registry = run_layers(
            &ctx,
            &[
                LayerKind::Primitives,
                LayerKind::SemiSemantics,
                LayerKind::ColourMode,
            ],
            &mut report,
        );

        // 7 offsets x 8 scales x 2 modes
        assert_eq!(registry.in_layer(2).len(), 7 * 8 * 2);

        let targets: Vec<(String, String)> = registry
            .find_by_name("collection:2", "Grey/Semi semantics/Root +2/[Colour Mode] Surface")
            .into_iter()
            .map(|e| {
                let EntryValue::Alias { target_name, .. } = &e.value else {
                    panic!("expected alias");
                };
                (e.mode_name.clone(), target_name.clone())
            })
            .collect();
        assert!(targets.contains(&(
            "Light".to_string(),
            "Grey/2300/[Semi semantics] Surface".to_string()
        )));
        assert!(targets.contains(&(
            "Dark".to_string(),
            "Grey/400/[Semi semantics] Surface".to_string()
        )));
    }
}
