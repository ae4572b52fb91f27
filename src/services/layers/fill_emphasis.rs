//! Layer 5: one token per scale with the emphasis as mode.

use super::{typed_modes, AliasBuilder, LayerContext, LayerGenerator, TargetMode};
use crate::models::{EntryDraft, FillEmphasis, LayerKind, ScaleName, TokenKey};
use crate::services::registry::VariableRegistry;
use crate::services::validation::ValidationReport;

/// `{Palette}/[Child] {Scale}`, modes Ghost..Bold.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillEmphasisLayer;

impl LayerGenerator for FillEmphasisLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::FillEmphasis
    }

    fn modes(
        &self,
        _ctx: &LayerContext<'_>,
        configured: &[String],
        report: &mut ValidationReport,
    ) -> Vec<String> {
        typed_modes::<FillEmphasis>(self.kind(), configured, report)
            .into_iter()
            .map(|emphasis| emphasis.to_string())
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
            let Ok(emphasis) = name.parse::<FillEmphasis>() else {
                continue;
            };
            for palette in ctx.palettes_in_use {
                for scale in ScaleName::ALL {
                    let source = TokenKey::Fill {
                        palette: palette.id.clone(),
                        scale,
                    };
                    let target = TokenKey::Background {
                        palette: palette.id.clone(),
                        emphasis,
                        scale,
                    };
                    builder.link(report, source, name, &target, TargetMode::Preferred(name), None);
                }
            }
        }
        builder.finish()
    }
}
