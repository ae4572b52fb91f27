//! Layer 8: the brand-facing tokens consumers bind to.

use super::{appearance_roles, brand_modes, AliasBuilder, LayerContext, LayerGenerator, TargetMode};
use crate::models::{EntryDraft, LayerKind, ScaleName, TokenKey};
use crate::services::registry::VariableRegistry;
use crate::services::validation::ValidationReport;

/// `Brand/{Role}/[Brand] {Scale}` → `Theme/{Role}/[Theme] {Scale}` in the
/// same brand mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrandLayer;

impl LayerGenerator for BrandLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Brand
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
                    builder.link(
                        report,
                        TokenKey::Brand { role, scale },
                        brand,
                        &TokenKey::Theme { role, scale },
                        TargetMode::Exact(brand),
                        Some(brand),
                    );
                }
            }
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::ResolvedBrand;
    use super::*;
    use crate::models::{EntryValue, Palette, PaletteRole, PaletteTable};
    use std::collections::BTreeMap;

    fn brand(name: &str, roles: &[(PaletteRole, &str)]) -> ResolvedBrand {
        ResolvedBrand {
            name: name.to_string(),
            roles: roles
                .iter()
                .map(|(role, id)| (*role, (*id).to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_full_chain_reaches_role_palette() {
        let palettes: PaletteTable = [grey("n", "Grey"), grey("p", "Ink")].into_iter().collect();
        let in_use: Vec<&Palette> = palettes.iter().collect();
        let brands = [brand(
            "Acme",
            &[(PaletteRole::Neutral, "n"), (PaletteRole::Primary, "p")],
        )];
        let ctx = LayerContext {
            palettes: &palettes,
            palettes_in_use: &in_use,
            brands: &brands,
        };
        let mut report = ValidationReport::new();
        let registry = run_layers(&ctx, &LayerKind::ALL, &mut report);

        let entry = registry
            .find(
                &TokenKey::Brand {
                    role: PaletteRole::Primary,
                    scale: ScaleName::Surface,
                },
                "Acme",
            )
            .unwrap();
        let chain = registry.get_alias_chain(&entry.id, 9).unwrap();
        assert_eq!(chain.len(), 9);
        assert_eq!(chain.last().unwrap().metadata.palette_id.as_deref(), Some("p"));
        assert!(matches!(chain.last().unwrap().value, EntryValue::Color { .. }));
    }

    #[test]
    fn test_unassigned_role_warns_in_theme_and_brand() {
        let palettes: PaletteTable = [grey("n", "Grey"), grey("p", "Ink")].into_iter().collect();
        let in_use: Vec<&Palette> = palettes.iter().collect();
        let brands = [brand(
            "Acme",
            &[(PaletteRole::Neutral, "n"), (PaletteRole::Primary, "p")],
        )];
        let ctx = LayerContext {
            palettes: &palettes,
            palettes_in_use: &in_use,
            brands: &brands,
        };
        let mut report = ValidationReport::new();
        let registry = run_layers(&ctx, &LayerKind::ALL, &mut report);

        assert!(report.is_valid());
        assert!(registry
            .find(
                &TokenKey::Brand {
                    role: PaletteRole::Sparkle,
                    scale: ScaleName::High,
                },
                "Acme",
            )
            .is_none());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.message.contains("Theme/Sparkle/[Theme] High")));
    }
}
