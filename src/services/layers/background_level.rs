//! Layer 4: emphasis raised by how deeply the background is nested.

use super::{typed_modes, AliasBuilder, LayerContext, LayerGenerator, TargetMode};
use crate::models::{BackgroundLevel, EntryDraft, FillEmphasis, LayerKind, ScaleName, TokenKey};
use crate::services::registry::VariableRegistry;
use crate::services::validation::ValidationReport;

/// `{Palette}/{Emphasis}/[Parent] {Scale}`, modes Level 0..2.
///
/// On level `n` an emphasis aliases the interaction token `n` emphases
/// stronger, stopping at Bold.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundLevelLayer;

impl LayerGenerator for BackgroundLevelLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::BackgroundLevel
    }

    fn modes(
        &self,
        _ctx: &LayerContext<'_>,
        configured: &[String],
        report: &mut ValidationReport,
    ) -> Vec<String> {
        typed_modes::<BackgroundLevel>(self.kind(), configured, report)
            .into_iter()
            .map(|level| level.to_string())
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
            let Ok(level) = name.parse::<BackgroundLevel>() else {
                continue;
            };
            for palette in ctx.palettes_in_use {
                for &emphasis in FillEmphasis::ALL {
                    for scale in ScaleName::ALL {
                        let source = TokenKey::Background {
                            palette: palette.id.clone(),
                            emphasis,
                            scale,
                        };
                        let target = TokenKey::Interaction {
                            palette: palette.id.clone(),
                            emphasis: emphasis.raised(level.raise()),
                            scale,
                        };
                        // Interaction states are not background levels: default mode
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
    fn test_level_two_raises_subtle_to_bold_in_idle() {
        let palettes: PaletteTable = [grey("g", "Grey")].into_iter().collect();
        let in_use: Vec<&Palette> = palettes.iter().collect();
        let ctx = LayerContext {
            palettes: &palettes,
            palettes_in_use: &in_use,
            brands: &[],
        };
        let mut report = ValidationReport::new();
        let registry = run_layers(&ctx, &LayerKind::ALL[..5], &mut report);

        let entry = registry
            .find_by_name("collection:4", "Grey/Subtle/[Parent] High")
            .into_iter()
            .find(|e| e.mode_name == "Level 2")
            .unwrap();
        let EntryValue::Alias { target_id, target_name } = &entry.value else {
            panic!("expected alias");
        };
        assert_eq!(target_name, "Grey/Bold/[Interaction state] High");
        assert_eq!(registry.get(target_id).unwrap().mode_name, "Idle");
        assert!(entry.metadata.mode_fallback);
    }
}
