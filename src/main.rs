//! Rangde - contrast-driven colour scales and layered design tokens
//!
//! This binary generates accessible colour scales from authored palettes and
//! aliases them through nine token layers, from primitives up to brands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rangde::cli::common::load_config;
use rangde::cli::{CliResult, GenerateArgs, RulesArgs, ScalesArgs, ValidateArgs};

/// Rangde - contrast-driven colour scales and layered design tokens
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the computed scales of one palette
    Scales(ScalesArgs),
    /// Run the layer pipeline and write the token summary
    Generate(GenerateArgs),
    /// Generate a workspace and report validation results
    Validate(ValidateArgs),
    /// Evaluate alias rules against a generated workspace
    Rules(RulesArgs),
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Scales(args) => args.execute(&config),
        Command::Generate(args) => args.execute(&config),
        Command::Validate(args) => args.execute(&config),
        Command::Rules(args) => args.execute(&config),
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
