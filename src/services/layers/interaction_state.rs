//! Layer 3: each emphasis as Root offsets per interaction state.

use super::{typed_modes, AliasBuilder, LayerContext, LayerGenerator, TargetMode};
use crate::models::{
    EntryDraft, FillEmphasis, InteractionState, LayerKind, ScaleName, TokenKey,
};
use crate::services::registry::VariableRegistry;
use crate::services::validation::ValidationReport;

/// `{Palette}/{Emphasis}/[Interaction state] {Scale}`, modes Idle..Focus.
///
/// Offset = emphasis base (Ghost 0, Minimal 1, Subtle 2, Bold 4) plus the
/// state delta (Hover 1, Pressed 2), never above 6.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionStateLayer;

impl LayerGenerator for InteractionStateLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::InteractionState
    }

    fn modes(
        &self,
        _ctx: &LayerContext<'_>,
        configured: &[String],
        report: &mut ValidationReport,
    ) -> Vec<String> {
        typed_modes::<InteractionState>(self.kind(), configured, report)
            .into_iter()
            .map(|state| state.to_string())
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
            let Ok(state) = name.parse::<InteractionState>() else {
                continue;
            };
            for palette in ctx.palettes_in_use {
                for &emphasis in FillEmphasis::ALL {
                    for scale in ScaleName::ALL {
                        let source = TokenKey::Interaction {
                            palette: palette.id.clone(),
                            emphasis,
                            scale,
                        };
                        let target = TokenKey::ColourMode {
                            palette: palette.id.clone(),
                            offset: emphasis.root_offset(state),
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
