//! Data models for palettes, scales, layers, token entries and rules.
//!
//! Models are plain data with small invariant-preserving helpers.
//! Behaviour lives in [`crate::services`].

pub mod brand;
pub mod graph;
pub mod layer_config;
pub mod modes;
pub mod palette;
pub mod rgb;
pub mod rule;
pub mod scale;
pub mod step;
pub mod variable;

// Re-export all model types
pub use brand::{BrandConfig, PaletteRole};
pub use graph::{
    Alias, AliasOperation, Collection, CollectionMode, CollectionType, Group, Mode, ModeMapping,
    ModeValue, Pairing, Variable, VariableType,
};
pub use layer_config::{GenerationType, LayerConfig, LayerKind, LayerSpec, VALUE_MODE};
pub use modes::{BackgroundLevel, ColourMode, FillEmphasis, InteractionState, ROOT_OFFSET_MAX};
pub use palette::{Palette, PaletteTable, RawPalette};
pub use rgb::RgbColor;
pub use rule::{AliasPath, PathError, Rule, RuleAction, RuleCondition, RuleSet};
pub use scale::{ContrastDirection, ScaleName, ScaleResult, StepScales};
pub use step::{Step, StepError, STEP_COUNT};
pub use variable::{EntryDraft, EntryMetadata, EntryValue, TokenKey, VariableEntry};
