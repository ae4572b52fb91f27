//! Layer 6: brand tokens with palette roles as modes.

use super::{typed_modes, AliasBuilder, LayerContext, LayerGenerator, TargetMode};
use crate::models::{EntryDraft, LayerKind, PaletteRole, ScaleName, TokenKey};
use crate::services::registry::VariableRegistry;
use crate::services::validation::ValidationReport;

/// `{Brand}/[appearance] {Scale}`; in mode `role` it aliases the fill
/// token of the palette the brand assigns to that role.
///
/// Roles a brand leaves unassigned produce no entry for that mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppearanceLayer;

impl LayerGenerator for AppearanceLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Appearance
    }

    fn modes(
        &self,
        _ctx: &LayerContext<'_>,
        configured: &[String],
        report: &mut ValidationReport,
    ) -> Vec<String> {
        typed_modes::<PaletteRole>(self.kind(), configured, report)
            .into_iter()
            .map(|role| role.to_string())
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
        for brand in ctx.brands {
            for name in modes {
                let Ok(role) = name.parse::<PaletteRole>() else {
                    continue;
                };
                let Some(palette) = brand.roles.get(&role) else {
                    continue;
                };
                for scale in ScaleName::ALL {
                    let source = TokenKey::Appearance {
                        brand: brand.name.clone(),
                        scale,
                    };
                    let target = TokenKey::Fill {
                        palette: palette.clone(),
                        scale,
                    };
                    builder.link(
                        report,
                        source,
                        name,
                        &target,
                        TargetMode::Preferred(name),
                        Some(&brand.name),
                    );
                }
            }
        }
        builder.finish()
    }
}
