//! Validation command for workspace files.

use crate::cli::common::{check_report, load_context, to_json, CliResult};
use crate::config::Config;
use crate::services::pipeline::{GenerationStatistics, Pipeline, PipelineOptions};
use crate::services::validation::{ValidationError, ValidationWarning};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate a workspace by generating it and auditing the result
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to workspace file (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    pub workspace: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON response of the validate command
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ValidationResponse<'a> {
    valid: bool,
    errors: &'a [ValidationError],
    warnings: &'a [ValidationWarning],
    info: &'a [String],
    statistics: &'a GenerationStatistics,
    palette_digest: &'a str,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let (ctx, mut report) = load_context(&self.workspace, config)?;
        let output = Pipeline::new(&ctx)
            .with_options(PipelineOptions {
                max_chain_depth: config.generation.max_chain_depth,
            })
            .run();
        report.merge(output.validation);

        if self.json {
            let response = ValidationResponse {
                valid: report.is_valid(),
                errors: &report.errors,
                warnings: &report.warnings,
                info: &report.info,
                statistics: &output.statistics,
                palette_digest: &output.palette_digest,
            };
            println!("{}", to_json(&response, config.output.pretty)?);
        } else {
            if report.is_valid() {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            let stats = &output.statistics;
            println!("\nStatistics:");
            println!("  Entries:     {}", stats.total);
            println!(
                "  Aliases:     {} ({:.1}%)",
                stats.alias_entries, stats.alias_percentage
            );
            println!("  Chain depth: {} / {} layers", stats.max_chain_depth, stats.enabled_layers);
            println!("  Palettes:    {}", stats.palettes_used);
            println!("  Brands:      {}", stats.brands);

            if !report.errors.is_empty() || !report.warnings.is_empty() {
                println!("\nIssues:");
                for error in &report.errors {
                    println!("  ✗ {error}");
                }
                for warning in &report.warnings {
                    println!("  ⚠ {warning}");
                }
            }
        }

        check_report(&report, self.strict || config.generation.strict)
    }
}
