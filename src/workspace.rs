//! Workspace files: the palettes, brands and layer setup one generation
//! run reads, stored as JSON or TOML.

use crate::models::{BrandConfig, LayerConfig, PaletteTable, RawPalette};
use crate::services::pipeline::GenerationContext;
use crate::services::validation::ValidationReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk workspace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Workspace {
    /// Base palettes
    #[serde(default)]
    pub palettes: Vec<RawPalette>,
    /// Brands and their role assignments
    #[serde(default)]
    pub brands: Vec<BrandConfig>,
    /// Layer setup; the configured default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<LayerConfig>,
}

/// File format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn for_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => anyhow::bail!(
                "Unsupported workspace file '{}': expected .json or .toml",
                path.display()
            ),
        }
    }
}

impl Workspace {
    /// Loads a workspace file.
    pub fn load(path: &Path) -> Result<Self> {
        let format = Format::for_path(path)?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workspace: {}", path.display()))?;
        let workspace = match format {
            Format::Json => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse workspace JSON: {}", path.display()))?,
            Format::Toml => toml::from_str(&content)
                .with_context(|| format!("Failed to parse workspace TOML: {}", path.display()))?,
        };
        Ok(workspace)
    }

    /// Writes the workspace; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match Format::for_path(path)? {
            Format::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize workspace")?
            }
            Format::Toml => toml::to_string_pretty(self).context("Failed to serialize workspace")?,
        };
        fs::write(path, content)
            .with_context(|| format!("Failed to write workspace: {}", path.display()))
    }

    /// Builds a generation context, recording palette problems in `report`.
    ///
    /// `default_layers` is used when the workspace carries no layer setup.
    pub fn into_context(
        self,
        default_layers: &LayerConfig,
        report: &mut ValidationReport,
    ) -> Result<GenerationContext> {
        if self.palettes.is_empty() {
            anyhow::bail!("Workspace has no palettes");
        }
        let palettes = PaletteTable::from_raw(self.palettes, report)?;
        Ok(GenerationContext {
            palettes,
            brands: self.brands,
            layers: self.layers.unwrap_or_else(|| default_layers.clone()),
        })
    }
}
