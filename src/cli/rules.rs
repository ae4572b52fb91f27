//! Rules command: evaluates an alias rule set against a generated workspace.

use crate::cli::common::{load_context, to_json, CliError, CliResult};
use crate::config::Config;
use crate::models::RuleSet;
use crate::services::alias_graph::AliasGraph;
use crate::services::pipeline::Pipeline;
use crate::services::rule_engine::{EvaluationMode, RuleEngine, StepStatus};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Evaluate alias rules against the generated token graph
#[derive(Debug, Clone, Args)]
pub struct RulesArgs {
    /// Path to workspace file (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    pub workspace: PathBuf,

    /// Rule set JSON (`{"rules": [...]}` or a bare array)
    #[arg(short, long, value_name = "FILE")]
    pub rules: PathBuf,

    /// Produce alias operations and apply them to a copy of the graph
    #[arg(long)]
    pub apply: bool,

    /// Write the validated rule set here
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl RulesArgs {
    /// Execute the rules command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let content = fs::read_to_string(&self.rules).map_err(|e| {
            CliError::io(format!("Failed to read {}: {e}", self.rules.display()))
        })?;
        let rules = RuleSet::from_json(&content)
            .map_err(|e| CliError::io(format!("Invalid rule set: {e:#}")))?;

        if let Some(path) = &self.export {
            let json = rules
                .to_json()
                .map_err(|e| CliError::io(format!("{e:#}")))?;
            fs::write(path, json)
                .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;
        }

        let (ctx, _) = load_context(&self.workspace, config)?;
        let output = Pipeline::new(&ctx).run();
        let graph =
            AliasGraph::from_entries(output.registry.collections(), output.registry.entries());

        let mode = if self.apply {
            EvaluationMode::Apply
        } else {
            EvaluationMode::DryRun
        };
        let evaluation = RuleEngine::new(&graph).evaluate(&rules, mode);

        let failures = if self.apply {
            let mut applied = graph.clone();
            applied.apply_operations(&evaluation.operations)
        } else {
            Vec::new()
        };

        if self.json {
            println!("{}", to_json(&evaluation, config.output.pretty)?);
        } else {
            println!("Rules ({mode}):");
            for step in &evaluation.steps {
                let marker = match step.status {
                    StepStatus::Matched => "✓",
                    StepStatus::Skipped => "-",
                    StepStatus::Error => "✗",
                };
                println!("  {marker} {}: {} aliases", step.rule_name, step.alias_count);
                if let Some(error) = &step.error {
                    println!("      ✗ {error}");
                }
                for warning in &step.warnings {
                    println!("      ⚠ {warning}");
                }
            }
            println!("\n{} aliases planned", evaluation.alias_count());
            if self.apply {
                println!(
                    "{} applied, {} failed",
                    evaluation.operations.len() - failures.len(),
                    failures.len()
                );
            }
        }

        for (idx, error) in &failures {
            eprintln!("Operation {} failed: {error}", idx + 1);
        }
        if !evaluation.report.is_valid() || !failures.is_empty() {
            return Err(CliError::validation("Rule evaluation reported errors"));
        }
        Ok(())
    }
}
