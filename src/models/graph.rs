//! Collections, groups, variables and alias edges of the token graph.

use super::RgbColor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a variable collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    /// Raw values
    Primitive,
    /// Meaning-bearing aliases of primitives
    Semantic,
    /// Component state aliases
    Interaction,
    /// Theme-level aliases
    Theme,
    /// Brand-facing aliases
    Brand,
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primitive => "primitive",
            Self::Semantic => "semantic",
            Self::Interaction => "interaction",
            Self::Theme => "theme",
            Self::Brand => "brand",
        };
        f.write_str(name)
    }
}

/// A named mode of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMode {
    /// Mode id, unique across collections
    pub id: String,
    /// Display name (e.g. "Light")
    pub name: String,
}

/// A collection of variables sharing an ordered mode list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection id
    pub id: String,
    /// Collection name (e.g. "02 Colour Mode")
    pub name: String,
    /// Collection kind
    #[serde(rename = "type")]
    pub collection_type: CollectionType,
    /// Modes in order; the first one is the default
    pub modes: Vec<CollectionMode>,
}

impl Collection {
    /// Mode with exactly this name.
    #[must_use]
    pub fn mode_by_name(&self, name: &str) -> Option<&CollectionMode> {
        self.modes.iter().find(|mode| mode.name == name)
    }

    /// Mode with this id.
    #[must_use]
    pub fn mode_by_id(&self, id: &str) -> Option<&CollectionMode> {
        self.modes.iter().find(|mode| mode.id == id)
    }

    /// The first (default) mode.
    #[must_use]
    pub fn default_mode(&self) -> Option<&CollectionMode> {
        self.modes.first()
    }

    /// Mode named `name`, else the default mode tagged as a fallback.
    #[must_use]
    pub fn resolve_mode(&self, name: &str) -> Option<(&CollectionMode, Pairing)> {
        self.mode_by_name(name)
            .map(|mode| (mode, Pairing::ExactMatch))
            .or_else(|| self.default_mode().map(|mode| (mode, Pairing::FallbackMatch)))
    }
}

/// A group of variables: the first segment of their slash-delimited names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group id
    pub id: String,
    /// Group name (first name segment)
    pub name: String,
    /// Owning collection
    pub collection_id: String,
}

impl Group {
    /// Id of the group `name` inside a collection.
    #[must_use]
    pub fn id_for(collection_id: &str, name: &str) -> String {
        format!("group:{collection_id}:{name}")
    }
}

/// Value type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// RGBA color
    #[default]
    Color,
    /// Number
    Float,
    /// Text
    String,
    /// True/false
    Boolean,
}

/// Value of one variable in one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModeValue {
    /// Literal color
    #[serde(rename_all = "camelCase")]
    Direct {
        /// Opaque color
        rgb: RgbColor,
        /// Opacity (0-1)
        alpha: f64,
    },
    /// Reference to another variable in one of its modes
    #[serde(rename_all = "camelCase")]
    Alias {
        /// Target variable
        variable_id: String,
        /// Target mode
        mode_id: String,
    },
}

/// One mode of a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    /// Collection mode id
    pub id: String,
    /// Collection mode name
    pub name: String,
    /// Value in this mode
    pub value: ModeValue,
}

/// A variable with a value (or alias) per mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Variable id
    pub id: String,
    /// Full slash-delimited name, group included
    pub name: String,
    /// Owning collection
    pub collection_id: String,
    /// Owning group
    pub group_id: String,
    /// Value type
    #[serde(default)]
    pub variable_type: VariableType,
    /// Per-mode values
    pub modes: Vec<Mode>,
}

impl Variable {
    /// First name segment, used as the group name.
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.name.split('/').next().unwrap_or(&self.name)
    }

    /// Last name segment, used for pairing by name.
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Mode with this id.
    #[must_use]
    pub fn mode(&self, id: &str) -> Option<&Mode> {
        self.modes.iter().find(|mode| mode.id == id)
    }
}

/// A materialized alias edge between two variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    /// Aliasing variable
    pub from_variable_id: String,
    /// Aliased variable
    pub to_variable_id: String,
    /// Source mode id to target mode id
    pub mode_map: BTreeMap<String, String>,
}

/// Whether a pairing found an exact counterpart or took a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pairing {
    /// Names matched exactly
    ExactMatch,
    /// No name matched; the first candidate was used
    FallbackMatch,
}

/// Source mode paired with a target mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeMapping {
    /// Source mode id
    pub source_mode_id: String,
    /// Source mode name
    pub source_mode_name: String,
    /// Target mode id
    pub target_mode_id: String,
    /// Target mode name
    pub target_mode_name: String,
    /// How the target mode was chosen
    pub pairing: Pairing,
}

/// Alias to be created on the graph by an applier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasOperation {
    /// Rule that produced the operation, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Variable that becomes an alias
    pub source_variable_id: String,
    /// Source name for display
    pub source_name: String,
    /// Variable aliased to
    pub target_variable_id: String,
    /// Target name for display
    pub target_name: String,
    /// How the target variable was chosen
    pub pairing: Pairing,
    /// Per-mode pairing
    pub modes: Vec<ModeMapping>,
}
