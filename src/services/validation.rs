//! Severity-graded problem reporting shared by generation, graph checks and rules.
//!
//! Errors mark an item that was skipped because its input was invalid.
//! Warnings mark degraded output (a missing alias target, a fallback pairing)
//! and never flip validity. Info lines carry summary counts.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation result with specific errors, warnings and info lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Items skipped because their input was invalid
    pub errors: Vec<ValidationError>,
    /// Non-critical problems
    pub warnings: Vec<ValidationWarning>,
    /// Summary and count reporting
    pub info: Vec<String>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        tracing::debug!(%error, "validation error");
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Adds an info line to the report.
    pub fn add_info(&mut self, line: impl Into<String>) {
        self.info.push(line.into());
    }

    /// Moves every item of `other` into this report.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }

    /// Counts errors of one kind.
    #[must_use]
    pub fn count_errors(&self, kind: ValidationErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("✗ {} errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠ {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        for line in &self.info {
            message.push_str(&format!("  · {line}\n"));
        }

        message
    }
}

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Pipeline layer where the error occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<u8>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            layer: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the layer context.
    #[must_use]
    pub const fn with_layer(mut self, layer: u8) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(layer) = self.layer {
            write!(f, "[Layer {}] {}: {}", layer, self.kind, self.message)?;
        } else {
            write!(f, "{}: {}", self.kind, self.message)?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Palette definition unusable (bad primary step, bad step key)
    InvalidPalette,
    /// Hex color that is not 6-digit RGB
    InvalidHex,
    /// Brand lacks a palette for a required role
    MissingPaletteRole,
    /// Brand references a palette that does not exist
    UnknownPalette,
    /// Layer config names a mode the layer cannot generate
    InvalidMode,
    /// Group points at a collection that does not exist
    OrphanedGroup,
    /// Variable points at a group that does not exist
    OrphanedVariable,
    /// Alias endpoint does not exist
    BrokenAlias,
    /// Variable aliases itself
    SelfAlias,
    /// Alias edges form a cycle
    CircularAlias,
    /// Alias targets an entry that is not in a strictly lower layer
    LayerOrder,
    /// Alias chain is deeper than the enabled layer count
    ChainTooDeep,
    /// Rule target path cannot be resolved
    UnresolvableTarget,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPalette => write!(f, "Invalid Palette"),
            Self::InvalidHex => write!(f, "Invalid Hex"),
            Self::MissingPaletteRole => write!(f, "Missing Palette Role"),
            Self::UnknownPalette => write!(f, "Unknown Palette"),
            Self::InvalidMode => write!(f, "Invalid Mode"),
            Self::OrphanedGroup => write!(f, "Orphaned Group"),
            Self::OrphanedVariable => write!(f, "Orphaned Variable"),
            Self::BrokenAlias => write!(f, "Broken Alias"),
            Self::SelfAlias => write!(f, "Self Alias"),
            Self::CircularAlias => write!(f, "Circular Alias"),
            Self::LayerOrder => write!(f, "Layer Order"),
            Self::ChainTooDeep => write!(f, "Chain Too Deep"),
            Self::UnresolvableTarget => write!(f, "Unresolvable Target"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Pipeline layer the warning came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<u8>,
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            layer: None,
            message: message.into(),
        }
    }

    /// Sets the layer context.
    #[must_use]
    pub const fn with_layer(mut self, layer: u8) -> Self {
        self.layer = Some(layer);
        self
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.layer {
            Some(layer) => write!(f, "[Layer {}] {}", layer, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_do_not_flip_validity() {
        let mut report = ValidationReport::new();
        report.add_warning(ValidationWarning::new("missing target").with_layer(3));
        report.add_info("42 entries");
        assert!(report.is_valid());

        report.add_error(ValidationError::new(ValidationErrorKind::InvalidHex, "bad"));
        assert!(!report.is_valid());
    }

    #[test]
    fn test_error_display_with_context() {
        let error = ValidationError::new(ValidationErrorKind::MissingPaletteRole, "no primary")
            .with_layer(6)
            .with_suggestion("Assign a palette to Primary");
        let text = error.to_string();
        assert!(text.starts_with("[Layer 6] Missing Palette Role: no primary"));
        assert!(text.contains("→ Assign a palette to Primary"));
    }

    #[test]
    fn test_merge_and_count() {
        let mut a = ValidationReport::new();
        a.add_error(ValidationError::new(ValidationErrorKind::BrokenAlias, "x"));
        let mut b = ValidationReport::new();
        b.add_error(ValidationError::new(ValidationErrorKind::BrokenAlias, "y"));
        b.add_error(ValidationError::new(ValidationErrorKind::SelfAlias, "z"));
        b.add_warning(ValidationWarning::new("w"));

        a.merge(b);
        assert_eq!(a.count_errors(ValidationErrorKind::BrokenAlias), 2);
        assert_eq!(a.count_errors(ValidationErrorKind::SelfAlias), 1);
        assert_eq!(a.warnings.len(), 1);
    }

    #[test]
    fn test_format_message_lists_everything() {
        let mut report = ValidationReport::new();
        report.add_error(ValidationError::new(ValidationErrorKind::InvalidMode, "Dusk"));
        report.add_warning(ValidationWarning::new("fallback used"));
        let message = report.format_message();
        assert!(message.contains("1 errors"));
        assert!(message.contains("Invalid Mode: Dusk"));
        assert!(message.contains("fallback used"));
    }
}
