//! User-authored base palettes and the palette table passed into generation.

use super::{RgbColor, Step};
use crate::services::validation::{ValidationError, ValidationErrorKind, ValidationReport};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

/// A base palette: a sparse mapping of steps to colors plus the brand's primary step.
///
/// # Validation
///
/// - `primary_step` is always one of the 24 defined steps (enforced by [`Step`])
/// - `steps` need not be total; searches skip steps that have no color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Stable identifier
    pub id: String,
    /// Display name used in generated token names (e.g. "Indigo")
    pub name: String,
    /// Authored colors per step
    pub steps: BTreeMap<Step, RgbColor>,
    /// Step holding the brand color; Bold searches start here
    pub primary_step: Step,
}

impl Palette {
    /// Creates an empty palette.
    pub fn new(id: impl Into<String>, name: impl Into<String>, primary_step: Step) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            steps: BTreeMap::new(),
            primary_step,
        }
    }

    /// Adds or replaces the color of one step.
    #[must_use]
    pub fn with_step(mut self, step: Step, color: RgbColor) -> Self {
        self.steps.insert(step, color);
        self
    }

    /// Color authored for `step`, if any.
    #[must_use]
    pub fn color(&self, step: Step) -> Option<RgbColor> {
        self.steps.get(&step).copied()
    }

    /// True when every one of the 24 steps has a color.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Step::all().all(|step| self.steps.contains_key(&step))
    }

    /// Builds a palette from its loosely-typed file form.
    ///
    /// Malformed step keys and hex values are reported as errors and the
    /// offending step is dropped; the rest of the palette is kept. An
    /// undefined primary step rejects the whole palette.
    pub fn from_raw(raw: RawPalette, report: &mut ValidationReport) -> Option<Self> {
        let primary_step = match Step::new(raw.primary_step) {
            Ok(step) => step,
            Err(e) => {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::InvalidPalette,
                        format!("Palette '{}': primary step {e}", raw.name),
                    )
                    .with_suggestion("Use one of 200, 300, ... 2500"),
                );
                return None;
            }
        };

        let mut palette = Self::new(raw.id, raw.name, primary_step);
        for (key, hex) in raw.steps {
            let step = match key.trim().parse::<u16>().ok().and_then(|v| Step::new(v).ok()) {
                Some(step) => step,
                None => {
                    report.add_error(ValidationError::new(
                        ValidationErrorKind::InvalidPalette,
                        format!("Palette '{}': '{key}' is not a palette step", palette.name),
                    ));
                    continue;
                }
            };
            match RgbColor::from_hex(&hex) {
                Ok(color) => {
                    palette.steps.insert(step, color);
                }
                Err(e) => report.add_error(ValidationError::new(
                    ValidationErrorKind::InvalidHex,
                    format!("Palette '{}' step {step}: {e}", palette.name),
                )),
            }
        }
        Some(palette)
    }
}

/// Palette as written in workspace files: string step keys and hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPalette {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Step value (as text) to hex color
    #[serde(default)]
    pub steps: BTreeMap<String, String>,
    /// Primary step value
    pub primary_step: u16,
}

/// Ordered set of palettes addressable by id or by name.
#[derive(Debug, Clone, Default)]
pub struct PaletteTable {
    palettes: Vec<Palette>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl PaletteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a palette, replacing any palette with the same id.
    pub fn insert(&mut self, palette: Palette) {
        if let Some(&idx) = self.by_id.get(&palette.id) {
            self.by_name.remove(&self.palettes[idx].name);
            self.by_name.insert(palette.name.clone(), idx);
            self.palettes[idx] = palette;
            return;
        }
        let idx = self.palettes.len();
        self.by_id.insert(palette.id.clone(), idx);
        self.by_name.insert(palette.name.clone(), idx);
        self.palettes.push(palette);
    }

    /// Looks a palette up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Palette> {
        self.by_id.get(id).map(|&idx| &self.palettes[idx])
    }

    /// Looks a palette up by display name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Palette> {
        self.by_name.get(name).map(|&idx| &self.palettes[idx])
    }

    /// Resolves a reference that may be either an id or a name.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Option<&Palette> {
        self.get(reference).or_else(|| self.by_name(reference))
    }

    /// Iterates palettes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    /// Number of palettes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// True when the table holds no palettes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// SHA-256 of the table contents, independent of insertion order.
    ///
    /// Generated entries are pure functions of this snapshot, so the digest
    /// identifies which palette state a generation run was derived from.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut ordered: Vec<&Palette> = self.palettes.iter().collect();
        ordered.sort_by(|a, b| a.id.cmp(&b.id));

        let mut hasher = Sha256::new();
        for palette in ordered {
            hasher.update(palette.id.as_bytes());
            hasher.update([0]);
            hasher.update(palette.name.as_bytes());
            hasher.update([0]);
            hasher.update(palette.primary_step.value().to_be_bytes());
            for (step, color) in &palette.steps {
                hasher.update(step.value().to_be_bytes());
                hasher.update([color.r, color.g, color.b]);
            }
        }
        format!("{:x}", hasher.finalize())
    }

    /// Builds a table from raw palettes, recording problems in `report`.
    pub fn from_raw(raw: Vec<RawPalette>, report: &mut ValidationReport) -> Result<Self> {
        let mut table = Self::new();
        for palette in raw {
            if table.get(&palette.id).is_some() {
                anyhow::bail!("Duplicate palette id '{}'", palette.id);
            }
            if let Some(palette) = Palette::from_raw(palette, report) {
                table.insert(palette);
            }
        }
        Ok(table)
    }
}

impl FromIterator<Palette> for PaletteTable {
    fn from_iter<I: IntoIterator<Item = Palette>>(iter: I) -> Self {
        let mut table = Self::new();
        for palette in iter {
            table.insert(palette);
        }
        table
    }
}
