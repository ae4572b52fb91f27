//! Shared plumbing for CLI commands: errors, exit codes, input loading and
//! JSON output.

use crate::config::Config;
use crate::services::pipeline::GenerationContext;
use crate::services::validation::ValidationReport;
use crate::workspace::Workspace;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was read but failed validation
    ValidationFailed = 1,
    /// Input could not be read, parsed or written
    InputError = 2,
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process ends with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// I/O, parse or serialization failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::InputError,
            message: message.into(),
        }
    }

    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationFailed,
            message: message.into(),
        }
    }

    /// Numeric exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind as i32
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the user configuration, from `path` when given.
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let result = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    result.map_err(|e| CliError::io(format!("Failed to load config: {e:#}")))
}

/// Loads a workspace and turns it into a generation context.
///
/// Palette problems found while loading are returned in the report.
pub fn load_context(
    path: &Path,
    config: &Config,
) -> CliResult<(GenerationContext, ValidationReport)> {
    let workspace = Workspace::load(path)
        .map_err(|e| CliError::io(format!("Failed to load workspace: {e:#}")))?;
    let mut report = ValidationReport::new();
    let ctx = workspace
        .into_context(&config.layers, &mut report)
        .map_err(|e| CliError::validation(format!("Invalid workspace: {e:#}")))?;
    Ok((ctx, report))
}

/// Serializes `value` as JSON.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> CliResult<String> {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))
}

/// Exit status for a finished run: errors always fail, warnings fail in strict mode.
pub fn check_report(report: &ValidationReport, strict: bool) -> CliResult<()> {
    if !report.is_valid() {
        return Err(CliError::validation(format!(
            "Validation failed with {} errors",
            report.errors.len()
        )));
    }
    if strict && !report.warnings.is_empty() {
        return Err(CliError::validation(format!(
            "{} warnings found in strict mode",
            report.warnings.len()
        )));
    }
    Ok(())
}
