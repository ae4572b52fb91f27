//! Generate command: runs the layer pipeline and writes the summary.

use crate::cli::common::{check_report, load_context, to_json, CliError, CliResult};
use crate::config::Config;
use crate::models::LayerKind;
use crate::services::pipeline::{Pipeline, PipelineOptions};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Generate design-token entries from a workspace
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to workspace file (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    pub workspace: PathBuf,

    /// Write the summary JSON here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Print the alias chain of every entry with this name
    #[arg(long, value_name = "NAME")]
    pub trace: Option<String>,

    /// Alias chain ceiling (defaults to the enabled layer count)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Stop after this layer number (0-8)
    #[arg(long, value_name = "LAYER")]
    pub up_to: Option<u8>,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let (mut ctx, load_report) = load_context(&self.workspace, config)?;
        if let Some(last) = self.up_to {
            let last = LayerKind::from_index(last)
                .ok_or_else(|| CliError::validation(format!("No layer {last}; use 0-8")))?;
            ctx.layers = ctx.layers.up_to(last);
        }

        let options = PipelineOptions {
            max_chain_depth: self.max_depth.or(config.generation.max_chain_depth),
        };
        let pipeline = Pipeline::new(&ctx).with_options(options);
        let mut output = pipeline.run();
        // Palette problems found while loading belong to the run
        let mut validation = load_report;
        validation.merge(std::mem::take(&mut output.validation));
        output.validation = validation;

        if let Some(name) = &self.trace {
            let matches: Vec<_> = output
                .registry
                .entries()
                .iter()
                .filter(|e| &e.name == name)
                .collect();
            if matches.is_empty() {
                eprintln!("No entry named '{name}'");
            }
            for entry in matches {
                match output.registry.trace(&entry.id, pipeline.max_chain_depth()) {
                    Ok(trace) => eprint!("{trace}"),
                    Err(e) => eprintln!("{}: {e}", entry.name),
                }
            }
        }

        let strict = self.strict || config.generation.strict;
        let report = output.validation.clone();
        let summary = output.into_summary();
        let json = to_json(&summary, config.output.pretty)?;
        match &self.out {
            Some(path) => {
                fs::write(path, json)
                    .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;
                eprintln!(
                    "✓ Wrote {} entries to {}",
                    summary.statistics.total,
                    path.display()
                );
            }
            None => println!("{json}"),
        }

        if !report.is_valid() {
            eprint!("{}", report.format_message());
        }
        check_report(&report, strict)
    }
}
