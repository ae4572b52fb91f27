//! Scales command: prints the computed scales of one palette.

use crate::cli::common::{load_context, to_json, CliError, CliResult};
use crate::config::Config;
use crate::models::{ContrastDirection, ScaleName, Step, StepScales};
use crate::services::scales::generate_all_scales;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Print the eight scales of every surface step of a palette
#[derive(Debug, Clone, Args)]
pub struct ScalesArgs {
    /// Path to workspace file (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    pub workspace: PathBuf,

    /// Palette id or name
    #[arg(short, long, value_name = "PALETTE")]
    pub palette: String,

    /// Only this surface step (e.g. 2400)
    #[arg(long, value_name = "STEP")]
    pub step: Option<u16>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ScalesOutput<'a> {
    palette: &'a str,
    primary_step: Step,
    steps: Vec<&'a StepScales>,
    warnings: &'a [String],
}

impl ScalesArgs {
    /// Execute the scales command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let (ctx, report) = load_context(&self.workspace, config)?;
        if !report.is_valid() {
            eprint!("{}", report.format_message());
        }

        let palette = ctx
            .palettes
            .resolve(&self.palette)
            .ok_or_else(|| CliError::validation(format!("Unknown palette '{}'", self.palette)))?;
        let only = self
            .step
            .map(Step::new)
            .transpose()
            .map_err(|e| CliError::validation(e.to_string()))?;

        let set = generate_all_scales(&palette.steps, palette.primary_step);
        let steps: Vec<&StepScales> = set
            .steps
            .values()
            .filter(|s| only.is_none_or(|step| s.surface_step == step))
            .collect();
        if steps.is_empty() {
            return Err(CliError::validation(format!(
                "Palette '{}' has no color for the requested step",
                palette.name
            )));
        }

        if self.json {
            let output = ScalesOutput {
                palette: &palette.name,
                primary_step: palette.primary_step,
                steps,
                warnings: &set.warnings,
            };
            println!("{}", to_json(&output, config.output.pretty)?);
            return Ok(());
        }

        println!("{} (primary step {})", palette.name, palette.primary_step);
        for scales in steps {
            let direction = match scales.direction {
                ContrastDirection::DarkCc => "dark CC",
                ContrastDirection::LightCc => "light CC",
            };
            println!("\nSurface {} ({direction})", scales.surface_step);
            for scale in ScaleName::ALL {
                match scales.get(scale) {
                    Some(result) => println!(
                        "  {:<10} {} {:>3}%  {:>5.2}:1  from {}",
                        scale.display_name(),
                        result.hex,
                        (result.alpha * 100.0).round(),
                        result.contrast_ratio,
                        result.source_step
                    ),
                    None => println!("  {:<10} -", scale.display_name()),
                }
            }
        }
        if !set.warnings.is_empty() {
            println!("\nWarnings:");
            for warning in &set.warnings {
                println!("  ⚠ {warning}");
            }
        }
        Ok(())
    }
}
