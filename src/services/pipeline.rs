//! Pipeline orchestration: runs the enabled layers in ascending order into
//! one fresh registry, then audits the result.
//!
//! Generation is a pure function of the [`GenerationContext`]. Nothing is
//! read from global state; two runs over the same context produce the same
//! entries (only `generated_at` differs).
//!
//! Audits after the last layer:
//! - every alias targets an entry of a strictly lower layer
//! - every alias chain resolves within the depth ceiling
//! - the alias graph built from the entries passes structural validation

use crate::models::{BrandConfig, EntryValue, LayerConfig, Palette, PaletteTable, VariableEntry};
use crate::services::alias_graph::AliasGraph;
use crate::services::layers::{generator_for, LayerContext, ResolvedBrand};
use crate::services::registry::{ChainError, VariableRegistry};
use crate::services::validation::{ValidationError, ValidationErrorKind, ValidationReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Everything one generation run reads.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    /// Base palettes
    pub palettes: PaletteTable,
    /// Brands taking part; empty means palette-scoped layers only
    pub brands: Vec<BrandConfig>,
    /// Which layers run, with their modes
    pub layers: LayerConfig,
}

impl GenerationContext {
    /// Creates a context with every layer enabled.
    #[must_use]
    pub fn new(palettes: PaletteTable, brands: Vec<BrandConfig>) -> Self {
        Self {
            palettes,
            brands,
            layers: LayerConfig::default(),
        }
    }

    /// Replaces the layer configuration.
    #[must_use]
    pub fn with_layers(mut self, layers: LayerConfig) -> Self {
        self.layers = layers;
        self
    }
}

/// Tunables of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Alias chain ceiling; defaults to the enabled layer count
    pub max_chain_depth: Option<usize>,
}

/// Counts describing a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatistics {
    /// Entries committed
    pub total: usize,
    /// Entries holding a color
    pub value_entries: usize,
    /// Entries holding an alias
    pub alias_entries: usize,
    /// Share of alias entries, in percent
    pub alias_percentage: f64,
    /// Entries per layer number
    pub per_layer: BTreeMap<u8, usize>,
    /// Entries per collection name
    pub per_collection: BTreeMap<String, usize>,
    /// Longest alias chain, leaf included
    pub max_chain_depth: usize,
    /// Layers that ran
    pub enabled_layers: usize,
    /// Palettes the palette-scoped layers generated for
    pub palettes_used: usize,
    /// Brands that took part
    pub brands: usize,
}

/// Serializable result of a run, for external consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    /// Entries in commit order
    pub variables: Vec<VariableEntry>,
    /// Run statistics
    pub statistics: GenerationStatistics,
    /// Everything recorded during the run
    pub validation: ValidationReport,
    /// SHA-256 of the palette table the entries derive from
    pub palette_digest: String,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
}

/// Output of [`Pipeline::run`].
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Registry holding every committed entry
    pub registry: VariableRegistry,
    /// Run statistics
    pub statistics: GenerationStatistics,
    /// Everything recorded during the run
    pub validation: ValidationReport,
    /// SHA-256 of the palette table
    pub palette_digest: String,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
}

impl GenerationOutput {
    /// True when the run recorded no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    /// Converts into the serializable summary.
    #[must_use]
    pub fn into_summary(self) -> GenerationSummary {
        GenerationSummary {
            variables: self.registry.entries().to_vec(),
            statistics: self.statistics,
            validation: self.validation,
            palette_digest: self.palette_digest,
            generated_at: self.generated_at,
        }
    }
}

/// Runs the layer pipeline over one context.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    ctx: &'a GenerationContext,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline with default options.
    #[must_use]
    pub fn new(ctx: &'a GenerationContext) -> Self {
        Self {
            ctx,
            options: PipelineOptions::default(),
        }
    }

    /// Overrides the options.
    #[must_use]
    pub const fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Alias chain ceiling of this run.
    #[must_use]
    pub fn max_chain_depth(&self) -> usize {
        self.options
            .max_chain_depth
            .unwrap_or_else(|| self.ctx.layers.enabled_count())
    }

    /// Generates every enabled layer and audits the result.
    ///
    /// Never fails: invalid input is recorded in the report and the affected
    /// items are skipped.
    #[must_use]
    pub fn run(&self) -> GenerationOutput {
        let mut report = ValidationReport::new();
        let brands = self.resolve_brands(&mut report);
        let palettes_in_use = self.palettes_in_use(&brands, &mut report);

        let layer_ctx = LayerContext {
            palettes: &self.ctx.palettes,
            palettes_in_use: &palettes_in_use,
            brands: &brands,
        };

        let mut registry = VariableRegistry::new();
        let enabled = self.ctx.layers.enabled_layers();
        for spec in &enabled {
            let generator = generator_for(spec.kind);
            let modes = generator.modes(&layer_ctx, &spec.modes, &mut report);
            if modes.is_empty() {
                report.add_info(format!("{}: no modes; nothing generated", spec.kind));
                continue;
            }
            registry.register_collection(spec.kind, &modes);
            let drafts = generator.generate(&layer_ctx, &registry, &modes, &mut report);
            let drafted = drafts.len();
            let committed = registry.commit(spec.kind, drafts, &self.ctx.palettes);
            tracing::debug!(
                layer = spec.kind.index(),
                modes = modes.len(),
                drafted,
                committed,
                "layer generated"
            );
        }

        audit_layer_order(&registry, &mut report);
        let max_chain_depth = audit_chains(&registry, self.max_chain_depth(), &mut report);
        let graph = AliasGraph::from_entries(registry.collections(), registry.entries());
        report.merge(graph.validate());

        let statistics = statistics(
            &registry,
            max_chain_depth,
            enabled.len(),
            palettes_in_use.len(),
            brands.len(),
        );
        report.add_info(format!(
            "{} entries: {} values, {} aliases ({:.1}%)",
            statistics.total,
            statistics.value_entries,
            statistics.alias_entries,
            statistics.alias_percentage
        ));
        report.add_info(format!(
            "max alias chain {} across {} enabled layers",
            statistics.max_chain_depth, statistics.enabled_layers
        ));

        tracing::info!(
            entries = statistics.total,
            aliases = statistics.alias_entries,
            max_chain_depth = statistics.max_chain_depth,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "generation finished"
        );

        GenerationOutput {
            registry,
            statistics,
            validation: report,
            palette_digest: self.ctx.palettes.digest(),
            generated_at: Utc::now(),
        }
    }

    fn resolve_brands(&self, report: &mut ValidationReport) -> Vec<ResolvedBrand> {
        let mut seen = HashSet::new();
        let mut brands = Vec::new();
        for brand in &self.ctx.brands {
            if brand.name.trim().is_empty() || !seen.insert(brand.name.as_str()) {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::InvalidMode,
                    format!("Brand name '{}' is empty or repeated; brand skipped", brand.name),
                ));
                continue;
            }
            brands.push(ResolvedBrand::resolve(brand, &self.ctx.palettes, report));
        }
        brands
    }

    /// Palettes referenced by any brand, in table order; all of them when no
    /// brand takes part.
    fn palettes_in_use(
        &self,
        brands: &[ResolvedBrand],
        report: &mut ValidationReport,
    ) -> Vec<&'a Palette> {
        if brands.is_empty() {
            report.add_info("No brands configured; generating every palette");
            return self.ctx.palettes.iter().collect();
        }
        let referenced: HashSet<&str> = brands
            .iter()
            .flat_map(|b| b.roles.values().map(String::as_str))
            .collect();
        self.ctx
            .palettes
            .iter()
            .filter(|p| referenced.contains(p.id.as_str()))
            .collect()
    }
}

/// Convenience wrapper: runs the pipeline with default options.
#[must_use]
pub fn generate(ctx: &GenerationContext) -> GenerationOutput {
    Pipeline::new(ctx).run()
}

fn audit_layer_order(registry: &VariableRegistry, report: &mut ValidationReport) {
    for entry in registry.entries() {
        let EntryValue::Alias { target_id, .. } = &entry.value else {
            continue;
        };
        let Some(target) = registry.get(target_id) else {
            continue;
        };
        if target.layer >= entry.layer {
            report.add_error(
                ValidationError::new(
                    ValidationErrorKind::LayerOrder,
                    format!(
                        "'{}' (layer {}) aliases '{}' in layer {}",
                        entry.name, entry.layer, target.name, target.layer
                    ),
                )
                .with_layer(entry.layer),
            );
        }
    }
}

/// Resolves every chain; returns the longest depth seen.
fn audit_chains(
    registry: &VariableRegistry,
    max_depth: usize,
    report: &mut ValidationReport,
) -> usize {
    let mut deepest = 0;
    for entry in registry.entries() {
        match registry.get_alias_chain(&entry.id, max_depth) {
            Ok(chain) => deepest = deepest.max(chain.len()),
            Err(e) => {
                let kind = match &e {
                    ChainError::DepthExceeded { .. } => ValidationErrorKind::ChainTooDeep,
                    ChainError::MissingEntry(_) => ValidationErrorKind::BrokenAlias,
                };
                report.add_error(
                    ValidationError::new(kind, format!("'{}': {e}", entry.name))
                        .with_layer(entry.layer),
                );
            }
        }
    }
    deepest
}

fn statistics(
    registry: &VariableRegistry,
    max_chain_depth: usize,
    enabled_layers: usize,
    palettes_used: usize,
    brands: usize,
) -> GenerationStatistics {
    let total = registry.len();
    let alias_entries = registry
        .entries()
        .iter()
        .filter(|e| e.value.is_alias())
        .count();
    let alias_percentage = if total == 0 {
        0.0
    } else {
        (alias_entries as f64 / total as f64 * 1000.0).round() / 10.0
    };

    let mut per_collection = BTreeMap::new();
    for entry in registry.entries() {
        *per_collection
            .entry(entry.collection_name.clone())
            .or_insert(0) += 1;
    }

    GenerationStatistics {
        total,
        value_entries: total - alias_entries,
        alias_entries,
        alias_percentage,
        per_layer: registry.layer_counts(),
        per_collection,
        max_chain_depth,
        enabled_layers,
        palettes_used,
        brands,
    }
}
