//! Brand configuration: which palette fills each semantic role.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Semantic role a palette plays inside a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaletteRole {
    /// Greys for text, borders and backgrounds (required)
    Neutral,
    /// Main brand color (required)
    Primary,
    /// Supporting brand color
    Secondary,
    /// Accent for highlights
    Sparkle,
    /// Success states
    Positive,
    /// Error and destructive states
    Negative,
    /// Caution states
    Warning,
    /// Neutral information states
    Informative,
}

impl PaletteRole {
    /// All roles in appearance-mode order.
    pub const ALL: [Self; 8] = [
        Self::Neutral,
        Self::Primary,
        Self::Secondary,
        Self::Sparkle,
        Self::Positive,
        Self::Negative,
        Self::Warning,
        Self::Informative,
    ];

    /// Roles every brand must assign.
    pub const REQUIRED: [Self; 2] = [Self::Neutral, Self::Primary];

    /// Display name, also used as the Appearance mode name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Sparkle => "Sparkle",
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Warning => "Warning",
            Self::Informative => "Informative",
        }
    }

    /// True for roles a brand cannot omit.
    #[must_use]
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for PaletteRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown palette role '{s}'"))
    }
}

/// A brand and its role-to-palette assignments.
///
/// Palette references are resolved against the palette table by id first,
/// then by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandConfig {
    /// Brand name, used as a mode name in the Theme and Brand layers
    pub name: String,
    /// Palette reference per role; unassigned roles are absent
    #[serde(default)]
    pub roles: BTreeMap<PaletteRole, String>,
}

impl BrandConfig {
    /// Creates a brand with no roles assigned.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: BTreeMap::new(),
        }
    }

    /// Assigns a palette reference to a role.
    #[must_use]
    pub fn with_role(mut self, role: PaletteRole, palette: impl Into<String>) -> Self {
        self.roles.insert(role, palette.into());
        self
    }

    /// Palette reference assigned to `role`.
    #[must_use]
    pub fn palette_for(&self, role: PaletteRole) -> Option<&str> {
        self.roles.get(&role).map(String::as_str)
    }

    /// Required roles that have no palette.
    #[must_use]
    pub fn missing_required(&self) -> Vec<PaletteRole> {
        PaletteRole::REQUIRED
            .into_iter()
            .filter(|role| !self.roles.contains_key(role))
            .collect()
    }
}
