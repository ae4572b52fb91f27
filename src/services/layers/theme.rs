//! Layer 7: role tokens with brands as modes.

use super::{appearance_roles, brand_modes, AliasBuilder, LayerContext, LayerGenerator, TargetMode};
use crate::models::{EntryDraft, LayerKind, ScaleName, TokenKey};
use crate::services::registry::VariableRegistry;
use crate::services::validation::ValidationReport;

/// `Theme/{Role}/[Theme] {Scale}`; in mode `brand` it aliases that brand's
/// appearance token in the mode named after the role.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeLayer;

impl LayerGenerator for ThemeLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Theme
    }

    fn modes(
        &self,
        ctx: &LayerContext<'_>,
        configured: &[String],
        report: &mut ValidationReport,
    ) -> Vec<String> {
        brand_modes(self.kind(), ctx, configured, report)
    }

    fn generate(
        &self,
        ctx: &LayerContext<'_>,
        registry: &VariableRegistry,
        modes: &[String],
        report: &mut ValidationReport,
    ) -> Vec<EntryDraft> {
        let roles = appearance_roles(registry);
        let mut builder = AliasBuilder::new(self.kind(), ctx, registry);
        for brand in modes {
            for &role in &roles {
                for scale in ScaleName::ALL {
                    let source = TokenKey::Theme { role, scale };
                    let target = TokenKey::Appearance {
                        brand: brand.clone(),
                        scale,
                    };
                    builder.link(
                        report,
                        source,
                        brand,
                        &target,
                        TargetMode::Exact(role.name()),
                        Some(brand),
                    );
                }
            }
        }
        builder.finish()
    }
}
