//! Pipeline layer definitions and the user-facing layer configuration.

use super::graph::CollectionType;
use super::modes::{BackgroundLevel, ColourMode, FillEmphasis, InteractionState};
use super::PaletteRole;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the nine pipeline layers, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Raw scale colors per palette and step
    Primitives,
    /// Step-addressed aliases of the primitives
    SemiSemantics,
    /// Light/Dark Root offsets
    ColourMode,
    /// Emphasis per interaction state
    InteractionState,
    /// Emphasis raised by background nesting
    BackgroundLevel,
    /// One token per scale, emphasis as mode
    FillEmphasis,
    /// Brand tokens with palette roles as modes
    Appearance,
    /// Role tokens with brands as modes
    Theme,
    /// Final brand-facing tokens
    Brand,
}

impl LayerKind {
    /// All layers in ascending order.
    pub const ALL: [Self; 9] = [
        Self::Primitives,
        Self::SemiSemantics,
        Self::ColourMode,
        Self::InteractionState,
        Self::BackgroundLevel,
        Self::FillEmphasis,
        Self::Appearance,
        Self::Theme,
        Self::Brand,
    ];

    /// Layer number (0-8).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Layer for a layer number.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// The layer this one aliases into, or `None` for the value layer.
    #[must_use]
    pub fn source(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Name of the collection the layer fills.
    #[must_use]
    pub const fn collection_name(self) -> &'static str {
        match self {
            Self::Primitives => "00_Primitives",
            Self::SemiSemantics => "00_Semi semantics",
            Self::ColourMode => "02 Colour Mode",
            Self::InteractionState => "4 Interaction state",
            Self::BackgroundLevel => "3 Background Level",
            Self::FillEmphasis => "2 Fill emphasis",
            Self::Appearance => "1 Appearance",
            Self::Theme => "9 Theme",
            Self::Brand => "10 Brand",
        }
    }

    /// Stable collection id.
    #[must_use]
    pub fn collection_id(self) -> String {
        format!("collection:{}", self.index())
    }

    /// Kind of the collection the layer fills.
    #[must_use]
    pub const fn collection_type(self) -> CollectionType {
        match self {
            Self::Primitives => CollectionType::Primitive,
            Self::SemiSemantics | Self::ColourMode => CollectionType::Semantic,
            Self::InteractionState | Self::BackgroundLevel | Self::FillEmphasis => {
                CollectionType::Interaction
            }
            Self::Appearance | Self::Theme => CollectionType::Theme,
            Self::Brand => CollectionType::Brand,
        }
    }

    /// How the layer produces values.
    #[must_use]
    pub const fn generation_type(self) -> GenerationType {
        match self {
            Self::Primitives => GenerationType::Values,
            _ => GenerationType::Aliases,
        }
    }

    /// Modes generated when the configuration lists none.
    ///
    /// Theme and Brand return an empty list: their modes are the brands
    /// taking part in the run.
    #[must_use]
    pub fn default_modes(self) -> Vec<String> {
        fn names<T: fmt::Display>(modes: &[T]) -> Vec<String> {
            modes.iter().map(ToString::to_string).collect()
        }
        match self {
            Self::Primitives | Self::SemiSemantics => vec![VALUE_MODE.to_string()],
            Self::ColourMode => names(ColourMode::ALL),
            Self::InteractionState => names(InteractionState::ALL),
            Self::BackgroundLevel => names(BackgroundLevel::ALL),
            Self::FillEmphasis => names(FillEmphasis::ALL),
            Self::Appearance => names(&PaletteRole::ALL),
            Self::Theme | Self::Brand => Vec::new(),
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer {} ({})", self.index(), self.collection_name())
    }
}

/// Single mode of the value layers.
pub const VALUE_MODE: &str = "Value";

/// Whether a layer writes colors or aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationType {
    /// Direct color values
    Values,
    /// Aliases into the previous layer
    Aliases,
}

/// Configuration of one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Which layer this configures
    pub kind: LayerKind,
    /// Disabled layers are not generated
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Mode names to generate; empty means the layer's defaults
    #[serde(default)]
    pub modes: Vec<String>,
}

const fn default_true() -> bool {
    true
}

impl LayerSpec {
    /// Enabled layer with default modes.
    #[must_use]
    pub const fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            enabled: true,
            modes: Vec::new(),
        }
    }

    /// Configured modes, or the layer's defaults when none are listed.
    #[must_use]
    pub fn effective_modes(&self) -> Vec<String> {
        if self.modes.is_empty() {
            self.kind.default_modes()
        } else {
            self.modes.clone()
        }
    }
}

/// Ordered configuration of the nine layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// One entry per layer; layers missing from the list are disabled
    pub layers: Vec<LayerSpec>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            layers: LayerKind::ALL.into_iter().map(LayerSpec::new).collect(),
        }
    }
}

impl LayerConfig {
    /// Configuration of one layer.
    #[must_use]
    pub fn get(&self, kind: LayerKind) -> Option<&LayerSpec> {
        self.layers.iter().find(|spec| spec.kind == kind)
    }

    /// True when the layer is present and enabled.
    #[must_use]
    pub fn is_enabled(&self, kind: LayerKind) -> bool {
        self.get(kind).is_some_and(|spec| spec.enabled)
    }

    /// Number of enabled layers; the ceiling for alias chain length.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        LayerKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .count()
    }

    /// Enabled layers in ascending order, whatever the listing order.
    #[must_use]
    pub fn enabled_layers(&self) -> Vec<&LayerSpec> {
        LayerKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).filter(|spec| spec.enabled))
            .collect()
    }

    /// Keeps layers up to and including `last`, disabling everything above.
    #[must_use]
    pub fn up_to(mut self, last: LayerKind) -> Self {
        for spec in &mut self.layers {
            if spec.kind > last {
                spec.enabled = false;
            }
        }
        self
    }
}
