//! CLI command handlers for Rangde.
//!
//! This module provides headless, scriptable access to scale generation,
//! the layer pipeline and the rule engine for automation and CI.

pub mod common;
pub mod generate;
pub mod rules;
pub mod scales;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use generate::GenerateArgs;
pub use rules::RulesArgs;
pub use scales::ScalesArgs;
pub use validate::ValidateArgs;
