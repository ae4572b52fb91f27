//! Bulk aliasing by declarative rules.
//!
//! Rules are evaluated in order against one [`AliasGraph`]. Each rule yields
//! exactly one [`EvaluationStep`]; a rule that matches nothing, is disabled
//! or names an unresolvable target contributes no operations and does not
//! affect the rules after it.
//!
//! Evaluation never mutates the graph. Planned edges are added to a working
//! copy of the adjacency so that a later rule cannot close a cycle through an
//! alias an earlier rule planned.

use crate::models::{
    AliasOperation, AliasPath, Collection, ModeMapping, Pairing, Rule, RuleSet, Variable,
};
use crate::services::alias_graph::{Adjacency, AliasGraph};
use crate::services::validation::{
    ValidationError, ValidationErrorKind, ValidationReport, ValidationWarning,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether evaluation only reports or also yields operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMode {
    /// Compute matches only
    #[default]
    DryRun,
    /// Compute matches and return executable alias operations
    Apply,
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DryRun => write!(f, "dry-run"),
            Self::Apply => write!(f, "apply"),
        }
    }
}

/// Outcome of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// At least one alias planned
    Matched,
    /// Disabled, or nothing to alias
    Skipped,
    /// Target path could not be resolved
    Error,
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationStep {
    /// Rule id
    pub rule_id: String,
    /// Rule name
    pub rule_name: String,
    /// Outcome
    pub status: StepStatus,
    /// Planned aliases, one per matched source
    pub matches: Vec<AliasOperation>,
    /// Fallback pairings, skipped cycles and similar
    pub warnings: Vec<String>,
    /// Why the rule failed, for [`StepStatus::Error`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of aliases the rule produces
    pub alias_count: usize,
}

impl EvaluationStep {
    fn new(rule: &Rule, status: StepStatus) -> Self {
        Self {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            status,
            matches: Vec::new(),
            warnings: Vec::new(),
            error: None,
            alias_count: 0,
        }
    }
}

/// Result of evaluating a rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvaluation {
    /// How the set was evaluated
    pub mode: EvaluationMode,
    /// One step per rule, in rule order
    pub steps: Vec<EvaluationStep>,
    /// Executable operations; empty for dry runs
    pub operations: Vec<AliasOperation>,
    /// Errors and warnings of every step
    pub report: ValidationReport,
}

impl RuleEvaluation {
    /// Total aliases planned across all rules.
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.steps.iter().map(|s| s.alias_count).sum()
    }

    /// Step of one rule.
    #[must_use]
    pub fn step(&self, rule_id: &str) -> Option<&EvaluationStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// Evaluates rules against a graph.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'g> {
    graph: &'g AliasGraph,
}

impl<'g> RuleEngine<'g> {
    /// Creates an engine over `graph`.
    #[must_use]
    pub const fn new(graph: &'g AliasGraph) -> Self {
        Self { graph }
    }

    /// Evaluates every rule in order.
    #[must_use]
    pub fn evaluate(&self, rules: &RuleSet, mode: EvaluationMode) -> RuleEvaluation {
        let mut working = self.graph.adjacency();
        let mut report = ValidationReport::new();
        let mut steps = Vec::with_capacity(rules.rules.len());

        for rule in &rules.rules {
            let step = self.evaluate_rule(rule, &mut working);
            for warning in &step.warnings {
                let message = format!("Rule '{}': {warning}", rule.name);
                report.add_warning(ValidationWarning::new(message));
            }
            if let Some(error) = &step.error {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::UnresolvableTarget,
                        format!("Rule '{}': {error}", rule.name),
                    )
                    .with_suggestion("Use an existing Collection/Group[/Variable] path"),
                );
            }
            tracing::debug!(
                rule = %rule.name,
                status = ?step.status,
                aliases = step.alias_count,
                "evaluated rule"
            );
            steps.push(step);
        }

        let operations = match mode {
            EvaluationMode::DryRun => Vec::new(),
            EvaluationMode::Apply => steps
                .iter()
                .flat_map(|step| step.matches.iter().cloned())
                .collect(),
        };
        report.add_info(format!(
            "{} rules ({}): {} aliases planned",
            steps.len(),
            mode,
            steps.iter().map(|s| s.alias_count).sum::<usize>()
        ));

        RuleEvaluation {
            mode,
            steps,
            operations,
            report,
        }
    }

    /// Evaluates one rule, extending `working` with every planned edge.
    pub fn evaluate_rule(&self, rule: &Rule, working: &mut Adjacency) -> EvaluationStep {
        if !rule.enabled {
            let mut step = EvaluationStep::new(rule, StepStatus::Skipped);
            step.warnings.push("rule is disabled".to_string());
            return step;
        }

        let pool = match self.resolve_targets(rule) {
            Ok(pool) => pool,
            Err(message) => {
                let mut step = EvaluationStep::new(rule, StepStatus::Error);
                step.error = Some(message);
                return step;
            }
        };

        let sources = self.matching_variables(rule);
        if sources.is_empty() {
            let mut step = EvaluationStep::new(rule, StepStatus::Skipped);
            step.warnings.push("matched no variables".to_string());
            return step;
        }

        let mut step = EvaluationStep::new(rule, StepStatus::Matched);
        for source in sources {
            let (target, pairing) = pair_target(source, &pool);
            if pairing == Pairing::FallbackMatch {
                step.warnings.push(format!(
                    "no target named '{}'; '{}' paired with first target '{}'",
                    source.leaf_name(),
                    source.name,
                    target.name
                ));
            }
            if working.would_create_cycle(&source.id, &target.id) {
                step.warnings.push(format!(
                    "'{}' -> '{}' would create a cycle; skipped",
                    source.name, target.name
                ));
                continue;
            }

            let modes = self.pair_modes(source, target, &mut step.warnings);
            working.add_edge(&source.id, &target.id);
            step.matches.push(AliasOperation {
                rule_id: Some(rule.id.clone()),
                source_variable_id: source.id.clone(),
                source_name: source.name.clone(),
                target_variable_id: target.id.clone(),
                target_name: target.name.clone(),
                pairing,
                modes,
            });
        }

        step.alias_count = step.matches.len();
        if step.alias_count == 0 {
            step.status = StepStatus::Skipped;
        }
        step
    }

    /// Variables satisfying the rule's condition, in graph order.
    fn matching_variables(&self, rule: &Rule) -> Vec<&'g Variable> {
        let graph = self.graph;
        graph
            .variables()
            .iter()
            .filter(|variable| {
                rule.when.collection.as_deref().is_none_or(|name| {
                    graph
                        .collection(&variable.collection_id)
                        .is_some_and(|c| c.name == name)
                })
            })
            .filter(|variable| {
                rule.when.group.as_deref().is_none_or(|name| {
                    graph
                        .group(&variable.group_id)
                        .map_or(variable.group_name() == name, |g| g.name == name)
                })
            })
            .collect()
    }

    /// Target pool named by the rule's path.
    fn resolve_targets(&self, rule: &Rule) -> Result<Vec<&'g Variable>, String> {
        let graph = self.graph;
        let path = AliasPath::parse(&rule.then.alias_to).map_err(|e| e.to_string())?;
        let collection = graph
            .collection_by_name(&path.collection)
            .ok_or_else(|| format!("collection '{}' not found", path.collection))?;
        let group = graph
            .group_by_name(&collection.id, &path.group)
            .ok_or_else(|| {
                format!(
                    "group '{}' not found in collection '{}'",
                    path.group, path.collection
                )
            })?;

        let pool: Vec<&Variable> = match path.full_variable_name() {
            Some(name) => graph
                .variables_in_group(&group.id)
                .filter(|v| v.name == name)
                .take(1)
                .collect(),
            None => graph.variables_in_group(&group.id).collect(),
        };
        if pool.is_empty() {
            return Err(match path.full_variable_name() {
                Some(name) => format!("variable '{name}' not found in '{}'", path.collection),
                None => format!("group '{}' has no variables", path.group),
            });
        }
        Ok(pool)
    }

    fn pair_modes(
        &self,
        source: &Variable,
        target: &Variable,
        warnings: &mut Vec<String>,
    ) -> Vec<ModeMapping> {
        let collection = self.graph.collection(&target.collection_id);
        source
            .modes
            .iter()
            .filter_map(|mode| {
                let Some((target_id, target_name, pairing)) =
                    target_mode(collection, target, &mode.name)
                else {
                    warnings.push(format!(
                        "'{}' has no modes; '{}' not mapped",
                        target.name, mode.name
                    ));
                    return None;
                };
                if pairing == Pairing::FallbackMatch {
                    warnings.push(format!(
                        "mode '{}' of '{}' mapped to default mode '{target_name}'",
                        mode.name, source.name
                    ));
                }
                Some(ModeMapping {
                    source_mode_id: mode.id.clone(),
                    source_mode_name: mode.name.clone(),
                    target_mode_id: target_id,
                    target_mode_name: target_name,
                    pairing,
                })
            })
            .collect()
    }
}

/// One target: everyone goes there. Several: same leaf name, else the first.
fn pair_target<'v>(source: &Variable, pool: &[&'v Variable]) -> (&'v Variable, Pairing) {
    if let [only] = pool {
        return (*only, Pairing::ExactMatch);
    }
    pool.iter()
        .find(|target| target.leaf_name() == source.leaf_name())
        .map(|target| (*target, Pairing::ExactMatch))
        .unwrap_or((pool[0], Pairing::FallbackMatch))
}

/// Same-named mode of the target, else its default mode.
fn target_mode(
    collection: Option<&Collection>,
    target: &Variable,
    name: &str,
) -> Option<(String, String, Pairing)> {
    if let Some((mode, pairing)) = collection.and_then(|c| c.resolve_mode(name)) {
        return Some((mode.id.clone(), mode.name.clone(), pairing));
    }
    target
        .modes
        .iter()
        .find(|m| m.name == name)
        .map(|m| (m, Pairing::ExactMatch))
        .or_else(|| target.modes.first().map(|m| (m, Pairing::FallbackMatch)))
        .map(|(m, pairing)| (m.id.clone(), m.name.clone(), pairing))
}
