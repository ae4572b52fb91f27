//! The nine layer generators.
//!
//! Every generator is a pure function of the generation context and the
//! entries committed by strictly lower layers. Value layers read the scale
//! generator; alias layers build the typed key of their target and look it
//! up in the registry. A missing target is a warning and skips one entry.

use crate::models::{
    BrandConfig, EntryDraft, EntryMetadata, EntryValue, LayerKind, Pairing, Palette, PaletteRole,
    PaletteTable, TokenKey, VariableEntry,
};
use crate::services::registry::VariableRegistry;
use crate::services::validation::{
    ValidationError, ValidationErrorKind, ValidationReport, ValidationWarning,
};
use std::collections::BTreeMap;
use std::str::FromStr;

pub mod appearance;
pub mod background_level;
pub mod brand;
pub mod colour_mode;
pub mod fill_emphasis;
pub mod interaction_state;
pub mod primitives;
pub mod semi_semantics;
pub mod theme;

pub use appearance::AppearanceLayer;
pub use background_level::BackgroundLevelLayer;
pub use brand::BrandLayer;
pub use colour_mode::ColourModeLayer;
pub use fill_emphasis::FillEmphasisLayer;
pub use interaction_state::InteractionStateLayer;
pub use primitives::PrimitivesLayer;
pub use semi_semantics::SemiSemanticsLayer;
pub use theme::ThemeLayer;

/// A brand with every role resolved to a palette id.
///
/// Roles whose palette could not be resolved are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBrand {
    /// Brand name
    pub name: String,
    /// Palette id per role
    pub roles: BTreeMap<PaletteRole, String>,
}

impl ResolvedBrand {
    /// Resolves a brand's palette references, reporting problems.
    ///
    /// Missing required roles and references to unknown palettes are errors;
    /// other missing roles are warnings.
    pub fn resolve(
        brand: &BrandConfig,
        palettes: &PaletteTable,
        report: &mut ValidationReport,
    ) -> Self {
        let mut roles = BTreeMap::new();
        for role in PaletteRole::ALL {
            match brand.palette_for(role) {
                Some(reference) => match palettes.resolve(reference) {
                    Some(palette) => {
                        roles.insert(role, palette.id.clone());
                    }
                    None => report.add_error(
                        ValidationError::new(
                            ValidationErrorKind::UnknownPalette,
                            format!(
                                "Brand '{}' assigns unknown palette '{reference}' to {role}",
                                brand.name
                            ),
                        )
                        .with_layer(LayerKind::Appearance.index()),
                    ),
                },
                None if role.is_required() => report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::MissingPaletteRole,
                        format!("Brand '{}' has no palette for {role}", brand.name),
                    )
                    .with_layer(LayerKind::Appearance.index())
                    .with_suggestion(format!("Assign a palette to the {role} role")),
                ),
                None => report.add_warning(
                    ValidationWarning::new(format!(
                        "Brand '{}' has no palette for {role}; its appearance mode is skipped",
                        brand.name
                    ))
                    .with_layer(LayerKind::Appearance.index()),
                ),
            }
        }
        Self {
            name: brand.name.clone(),
            roles,
        }
    }
}

/// Inputs shared by every layer of one run.
#[derive(Debug, Clone, Copy)]
pub struct LayerContext<'a> {
    /// Every known palette (for display names)
    pub palettes: &'a PaletteTable,
    /// Palettes the palette-scoped layers generate for, in table order
    pub palettes_in_use: &'a [&'a Palette],
    /// Brands taking part in the run
    pub brands: &'a [ResolvedBrand],
}

/// A pipeline layer.
pub trait LayerGenerator {
    /// Which layer this is.
    fn kind(&self) -> LayerKind;

    /// Validated mode names from the configured list (empty means defaults).
    ///
    /// Unknown names are reported as errors and dropped.
    fn modes(
        &self,
        ctx: &LayerContext<'_>,
        configured: &[String],
        report: &mut ValidationReport,
    ) -> Vec<String>;

    /// Drafts for this layer, reading only entries of lower layers.
    fn generate(
        &self,
        ctx: &LayerContext<'_>,
        registry: &VariableRegistry,
        modes: &[String],
        report: &mut ValidationReport,
    ) -> Vec<EntryDraft>;
}

/// Generator for a layer.
#[must_use]
pub fn generator_for(kind: LayerKind) -> Box<dyn LayerGenerator> {
    match kind {
        LayerKind::Primitives => Box::new(PrimitivesLayer),
        LayerKind::SemiSemantics => Box::new(SemiSemanticsLayer),
        LayerKind::ColourMode => Box::new(ColourModeLayer),
        LayerKind::InteractionState => Box::new(InteractionStateLayer),
        LayerKind::BackgroundLevel => Box::new(BackgroundLevelLayer),
        LayerKind::FillEmphasis => Box::new(FillEmphasisLayer),
        LayerKind::Appearance => Box::new(AppearanceLayer),
        LayerKind::Theme => Box::new(ThemeLayer),
        LayerKind::Brand => Box::new(BrandLayer),
    }
}

/// Parses configured mode names into a layer's mode vocabulary.
pub(crate) fn typed_modes<T>(
    kind: LayerKind,
    configured: &[String],
    report: &mut ValidationReport,
) -> Vec<T>
where
    T: FromStr + PartialEq,
{
    let names = if configured.is_empty() {
        kind.default_modes()
    } else {
        configured.to_vec()
    };
    let mut modes = Vec::new();
    for name in names {
        match name.parse::<T>() {
            Ok(mode) if !modes.contains(&mode) => modes.push(mode),
            Ok(_) => {}
            Err(_) => report.add_error(
                ValidationError::new(
                    ValidationErrorKind::InvalidMode,
                    format!("'{name}' is not a mode of {kind}; skipped"),
                )
                .with_layer(kind.index()),
            ),
        }
    }
    modes
}

/// Modes of the brand-moded layers: brand names taking part in the run.
pub(crate) fn brand_modes(
    kind: LayerKind,
    ctx: &LayerContext<'_>,
    configured: &[String],
    report: &mut ValidationReport,
) -> Vec<String> {
    if configured.is_empty() {
        return ctx.brands.iter().map(|b| b.name.clone()).collect();
    }
    configured
        .iter()
        .filter(|name| {
            let known = ctx.brands.iter().any(|b| &b.name == *name);
            if !known {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::InvalidMode,
                        format!("'{name}' is not a brand of this run; skipped"),
                    )
                    .with_layer(kind.index()),
                );
            }
            known
        })
        .cloned()
        .collect()
}

/// How an alias picks the target's mode.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TargetMode<'m> {
    /// Same-named mode, else the target collection's default mode
    Preferred(&'m str),
    /// Exactly this mode
    Exact(&'m str),
}

/// Collects alias drafts for one layer, warning on every missing target.
pub(crate) struct AliasBuilder<'a> {
    kind: LayerKind,
    ctx: &'a LayerContext<'a>,
    registry: &'a VariableRegistry,
    drafts: Vec<EntryDraft>,
    missing: usize,
}

impl<'a> AliasBuilder<'a> {
    pub(crate) const fn new(
        kind: LayerKind,
        ctx: &'a LayerContext<'a>,
        registry: &'a VariableRegistry,
    ) -> Self {
        Self {
            kind,
            ctx,
            registry,
            drafts: Vec::new(),
            missing: 0,
        }
    }

    /// Adds an alias from (`source`, `mode`) to `target`.
    pub(crate) fn link(
        &mut self,
        report: &mut ValidationReport,
        source: TokenKey,
        mode: &str,
        target: &TokenKey,
        target_mode: TargetMode<'_>,
        brand: Option<&str>,
    ) {
        let found = match target_mode {
            TargetMode::Preferred(name) => self.registry.resolve(target, name),
            TargetMode::Exact(name) => self
                .registry
                .find(target, name)
                .map(|entry| (entry, Pairing::ExactMatch)),
        };
        let Some((entry, pairing)) = found else {
            self.missing += 1;
            report.add_warning(
                ValidationWarning::new(format!(
                    "'{}' ({mode}): alias target '{}' not found; skipped",
                    source.display_name(self.ctx.palettes),
                    target.display_name(self.ctx.palettes)
                ))
                .with_layer(self.kind.index()),
            );
            return;
        };
        self.drafts
            .push(alias_draft(source, mode, entry, pairing, brand));
    }

    /// Finished drafts.
    pub(crate) fn finish(self) -> Vec<EntryDraft> {
        if self.missing > 0 {
            tracing::debug!(
                layer = self.kind.index(),
                missing = self.missing,
                "alias targets not found"
            );
        }
        self.drafts
    }
}

fn alias_draft(
    source: TokenKey,
    mode: &str,
    target: &VariableEntry,
    pairing: Pairing,
    brand: Option<&str>,
) -> EntryDraft {
    let metadata = EntryMetadata {
        palette_id: source
            .palette()
            .or_else(|| target.metadata.palette_id.as_deref())
            .map(ToString::to_string),
        brand: brand.map(ToString::to_string),
        mode_fallback: pairing == Pairing::FallbackMatch,
        ..EntryMetadata::default()
    };
    EntryDraft {
        key: source,
        mode_name: mode.to_string(),
        value: EntryValue::Alias {
            target_id: target.id.clone(),
            target_name: target.name.clone(),
        },
        metadata,
    }
}

/// Roles the role-keyed layers generate: the Appearance modes, or all roles.
pub(crate) fn appearance_roles(registry: &VariableRegistry) -> Vec<PaletteRole> {
    registry
        .collection_for(LayerKind::Appearance)
        .map(|collection| {
            collection
                .modes
                .iter()
                .filter_map(|mode| mode.name.parse().ok())
                .collect()
        })
        .unwrap_or_else(|| PaletteRole::ALL.to_vec())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_resolve_brand_reports_roles() {
        let palettes: PaletteTable = [grey("g", "Grey")].into_iter().collect();
        let brand = BrandConfig::new("Acme")
            .with_role(PaletteRole::Neutral, "Grey")
            .with_role(PaletteRole::Positive, "Jade");
        let mut report = ValidationReport::new();

        let resolved = ResolvedBrand::resolve(&brand, &palettes, &mut report);
        assert_eq!(resolved.roles.get(&PaletteRole::Neutral).map(String::as_str), Some("g"));
        assert_eq!(report.count_errors(ValidationErrorKind::MissingPaletteRole), 1);
        assert_eq!(report.count_errors(ValidationErrorKind::UnknownPalette), 1);
        // Secondary, Sparkle, Negative, Warning, Informative
        assert_eq!(report.warnings.len(), 5);
    }

    #[test]
    fn test_typed_modes_rejects_unknown_names() {
        let mut report = ValidationReport::new();
        let modes: Vec<crate::models::ColourMode> = typed_modes(
            LayerKind::ColourMode,
            &["Dark".to_string(), "Dusk".to_string(), "dark".to_string()],
            &mut report,
        );
        assert_eq!(modes, vec![crate::models::ColourMode::Dark]);
        assert_eq!(report.count_errors(ValidationErrorKind::InvalidMode), 1);
    }

    #[test]
    fn test_missing_target_is_a_warning_not_an_abort() {
        let palettes: PaletteTable = [grey("g", "Grey")].into_iter().collect();
        let in_use: Vec<&Palette> = palettes.iter().collect();
        let ctx = LayerContext {
            palettes: &palettes,
            palettes_in_use: &in_use,
            brands: &[],
        };
        let mut report = ValidationReport::new();
        // Semi semantics without primitives: every target is missing
        let registry = run_layers(&ctx, &[LayerKind::SemiSemantics], &mut report);
        assert!(registry.is_empty());
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 24 * 8);
    }
}
