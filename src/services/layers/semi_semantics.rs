//! Layer 1: step-addressed aliases of the primitives.

use super::primitives::value_modes;
use super::{AliasBuilder, LayerContext, LayerGenerator, TargetMode};
use crate::models::{EntryDraft, LayerKind, ScaleName, Step, TokenKey};
use crate::services::registry::VariableRegistry;
use crate::services::validation::ValidationReport;

/// `{Palette}/{step}/[Semi semantics] {Scale}` → `{Palette}/{step}/{Scale}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiSemanticsLayer;

impl LayerGenerator for SemiSemanticsLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::SemiSemantics
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
        registry: &VariableRegistry,
        modes: &[String],
        report: &mut ValidationReport,
    ) -> Vec<EntryDraft> {
        let mut builder = AliasBuilder::new(self.kind(), ctx, registry);
        for mode in modes {
            for palette in ctx.palettes_in_use {
                for step in Step::all() {
                    for scale in ScaleName::ALL {
                        let target = TokenKey::Primitive {
                            palette: palette.id.clone(),
                            step,
                            scale,
                        };
                        let source = TokenKey::SemiSemantic {
                            palette: palette.id.clone(),
                            step,
                            scale,
                        };
                        let target_mode = TargetMode::Preferred(mode);
                        builder.link(report, source, mode, &target, target_mode, None);
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
    fn test_every_primitive_gets_one_alias() {
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
            &[LayerKind::Primitives, LayerKind::SemiSemantics],
            &mut report,
        );

        assert_eq!(registry.in_layer(1).len(), 24 * 8);
        assert!(report.warnings.is_empty());

        let entry = registry
            .find_by_name("collection:1", "Grey/600/[Semi semantics] Bold A11Y")
            .into_iter()
            .next()
            .unwrap();
        let EntryValue::Alias { target_name, .. } = &entry.value else {
            panic!("expected alias");
        };
        assert_eq!(target_name, "Grey/600/Bold A11Y");
    }
}
