//! Flattened pipeline entries and the typed keys layers look them up by.

use super::modes::root_label;
use super::{FillEmphasis, LayerKind, PaletteRole, PaletteTable, RgbColor, ScaleName, Step};
use serde::{Deserialize, Serialize};

/// Typed identity of a generated token, independent of any mode.
///
/// Layers look their targets up by key; the slash name is derived from the
/// key only for display and for the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum TokenKey {
    /// `{Palette}/{step}/{Scale}`
    Primitive {
        /// Palette id
        palette: String,
        /// Surface step
        step: Step,
        /// Scale
        scale: ScaleName,
    },
    /// `{Palette}/{step}/[Semi semantics] {Scale}`
    SemiSemantic {
        /// Palette id
        palette: String,
        /// Surface step
        step: Step,
        /// Scale
        scale: ScaleName,
    },
    /// `{Palette}/Semi semantics/Root +n/[Colour Mode] {Scale}`
    ColourMode {
        /// Palette id
        palette: String,
        /// Root offset (0-6)
        offset: u8,
        /// Scale
        scale: ScaleName,
    },
    /// `{Palette}/{Emphasis}/[Interaction state] {Scale}`
    Interaction {
        /// Palette id
        palette: String,
        /// Emphasis
        emphasis: FillEmphasis,
        /// Scale
        scale: ScaleName,
    },
    /// `{Palette}/{Emphasis}/[Parent] {Scale}`
    Background {
        /// Palette id
        palette: String,
        /// Emphasis
        emphasis: FillEmphasis,
        /// Scale
        scale: ScaleName,
    },
    /// `{Palette}/[Child] {Scale}`
    Fill {
        /// Palette id
        palette: String,
        /// Scale
        scale: ScaleName,
    },
    /// `{Brand}/[appearance] {Scale}`
    Appearance {
        /// Brand name
        brand: String,
        /// Scale
        scale: ScaleName,
    },
    /// `Theme/{Role}/[Theme] {Scale}`
    Theme {
        /// Palette role
        role: PaletteRole,
        /// Scale
        scale: ScaleName,
    },
    /// `Brand/{Role}/[Brand] {Scale}`
    Brand {
        /// Palette role
        role: PaletteRole,
        /// Scale
        scale: ScaleName,
    },
}

impl TokenKey {
    /// Layer that generates tokens of this shape.
    #[must_use]
    pub const fn layer(&self) -> LayerKind {
        match self {
            Self::Primitive { .. } => LayerKind::Primitives,
            Self::SemiSemantic { .. } => LayerKind::SemiSemantics,
            Self::ColourMode { .. } => LayerKind::ColourMode,
            Self::Interaction { .. } => LayerKind::InteractionState,
            Self::Background { .. } => LayerKind::BackgroundLevel,
            Self::Fill { .. } => LayerKind::FillEmphasis,
            Self::Appearance { .. } => LayerKind::Appearance,
            Self::Theme { .. } => LayerKind::Theme,
            Self::Brand { .. } => LayerKind::Brand,
        }
    }

    /// Scale the token carries.
    #[must_use]
    pub const fn scale(&self) -> ScaleName {
        match self {
            Self::Primitive { scale, .. }
            | Self::SemiSemantic { scale, .. }
            | Self::ColourMode { scale, .. }
            | Self::Interaction { scale, .. }
            | Self::Background { scale, .. }
            | Self::Fill { scale, .. }
            | Self::Appearance { scale, .. }
            | Self::Theme { scale, .. }
            | Self::Brand { scale, .. } => *scale,
        }
    }

    /// Palette id for palette-scoped keys.
    #[must_use]
    pub fn palette(&self) -> Option<&str> {
        match self {
            Self::Primitive { palette, .. }
            | Self::SemiSemantic { palette, .. }
            | Self::ColourMode { palette, .. }
            | Self::Interaction { palette, .. }
            | Self::Background { palette, .. }
            | Self::Fill { palette, .. } => Some(palette),
            Self::Appearance { .. } | Self::Theme { .. } | Self::Brand { .. } => None,
        }
    }

    /// Slash-delimited variable name.
    ///
    /// Palette ids are shown by the palette's display name when the table
    /// knows them.
    ///
    /// ```
    /// use rangde::models::{Palette, PaletteTable, ScaleName, Step, TokenKey};
    ///
    /// let table: PaletteTable = [Palette::new("p1", "Indigo", Step::new(600).unwrap())]
    ///     .into_iter()
    ///     .collect();
    /// let key = TokenKey::ColourMode {
    ///     palette: "p1".to_string(),
    ///     offset: 2,
    ///     scale: ScaleName::BoldA11y,
    /// };
    /// assert_eq!(
    ///     key.display_name(&table),
    ///     "Indigo/Semi semantics/Root +2/[Colour Mode] Bold A11Y"
    /// );
    /// ```
    #[must_use]
    pub fn display_name(&self, palettes: &PaletteTable) -> String {
        let palette_name = |id: &str| {
            palettes
                .get(id)
                .map_or_else(|| id.to_string(), |p| p.name.clone())
        };
        let scale = self.scale().display_name();
        match self {
            Self::Primitive { palette, step, .. } => {
                format!("{}/{step}/{scale}", palette_name(palette))
            }
            Self::SemiSemantic { palette, step, .. } => {
                format!("{}/{step}/[Semi semantics] {scale}", palette_name(palette))
            }
            Self::ColourMode {
                palette, offset, ..
            } => format!(
                "{}/Semi semantics/{}/[Colour Mode] {scale}",
                palette_name(palette),
                root_label(*offset)
            ),
            Self::Interaction {
                palette, emphasis, ..
            } => format!(
                "{}/{emphasis}/[Interaction state] {scale}",
                palette_name(palette)
            ),
            Self::Background {
                palette, emphasis, ..
            } => format!("{}/{emphasis}/[Parent] {scale}", palette_name(palette)),
            Self::Fill { palette, .. } => format!("{}/[Child] {scale}", palette_name(palette)),
            Self::Appearance { brand, .. } => format!("{brand}/[appearance] {scale}"),
            Self::Theme { role, .. } => format!("Theme/{role}/[Theme] {scale}"),
            Self::Brand { role, .. } => format!("Brand/{role}/[Brand] {scale}"),
        }
    }
}

/// Value of an entry: a color or an alias, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EntryValue {
    /// Literal color with opacity
    Color {
        /// Opaque color
        rgb: RgbColor,
        /// Opacity (0-1)
        alpha: f64,
    },
    /// Alias to another entry
    #[serde(rename_all = "camelCase")]
    Alias {
        /// Target entry id
        target_id: String,
        /// Target entry name
        target_name: String,
    },
}

impl EntryValue {
    /// Target entry id for aliases.
    #[must_use]
    pub fn alias_target(&self) -> Option<&str> {
        match self {
            Self::Alias { target_id, .. } => Some(target_id),
            Self::Color { .. } => None,
        }
    }

    /// True for aliases.
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self, Self::Alias { .. })
    }
}

/// Provenance carried alongside an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    /// Palette the entry derives from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette_id: Option<String>,
    /// Brand the entry belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Contrast against the surface (value entries)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast_ratio: Option<f64>,
    /// Palette step the color came from (value entries)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_step: Option<Step>,
    /// True when the target mode was a default-mode fallback
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mode_fallback: bool,
}

/// An entry as produced by a layer, before the registry assigns ids.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    /// Typed token identity
    pub key: TokenKey,
    /// Mode this entry fills
    pub mode_name: String,
    /// Color or alias
    pub value: EntryValue,
    /// Provenance
    pub metadata: EntryMetadata,
}

/// One (variable, mode) pair committed to the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableEntry {
    /// Entry id, unique per registry
    pub id: String,
    /// Variable id shared by all modes of the same variable
    pub variable_id: String,
    /// Slash-delimited variable name
    pub name: String,
    /// Typed token identity
    pub key: TokenKey,
    /// Owning collection id
    pub collection_id: String,
    /// Owning collection name
    pub collection_name: String,
    /// Layer number (0-8)
    pub layer: u8,
    /// Mode id
    pub mode_id: String,
    /// Mode name
    pub mode_name: String,
    /// Color or alias
    pub value: EntryValue,
    /// Provenance
    #[serde(default)]
    pub metadata: EntryMetadata,
}
