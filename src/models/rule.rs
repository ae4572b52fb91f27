//! Declarative alias rules and their import/export form.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Which variables a rule applies to. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCondition {
    /// Exact collection name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Exact group name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// What matched variables become.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAction {
    /// Target path: `Collection/Group[/Variable]`
    pub alias_to: String,
}

/// A bulk aliasing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule id
    pub id: String,
    /// Display name
    pub name: String,
    /// Disabled rules are reported as skipped
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Match condition
    #[serde(default)]
    pub when: RuleCondition,
    /// Alias target
    pub then: RuleAction,
}

const fn default_enabled() -> bool {
    true
}

impl Rule {
    /// Creates an enabled rule with a fresh id.
    pub fn new(name: impl Into<String>, when: RuleCondition, alias_to: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            enabled: true,
            when,
            then: RuleAction {
                alias_to: alias_to.into(),
            },
        }
    }

    /// Parsed target path.
    ///
    /// # Errors
    ///
    /// Returns an error when `then.aliasTo` is not `Collection/Group[/Variable]`.
    pub fn target_path(&self) -> Result<AliasPath, PathError> {
        AliasPath::parse(&self.then.alias_to)
    }
}

/// A parsed `Collection/Group[/Variable]` target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasPath {
    /// Collection name
    pub collection: String,
    /// Group name
    pub group: String,
    /// Rest of the variable name below the group
    pub variable: Option<String>,
}

/// Why a target path could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path is empty
    Empty,
    /// Path has no group segment
    MissingGroup(String),
    /// A segment is blank
    EmptySegment(String),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "alias target is empty"),
            Self::MissingGroup(path) => {
                write!(
                    f,
                    "alias target '{path}' has no group (expected Collection/Group[/Variable])"
                )
            }
            Self::EmptySegment(path) => write!(f, "alias target '{path}' has an empty segment"),
        }
    }
}

impl std::error::Error for PathError {}

impl AliasPath {
    /// Parses a target path.
    ///
    /// ```
    /// use rangde::models::AliasPath;
    ///
    /// let path = AliasPath::parse("02 Colour Mode/Indigo/Semi semantics/Root").unwrap();
    /// assert_eq!(path.collection, "02 Colour Mode");
    /// assert_eq!(path.group, "Indigo");
    /// assert_eq!(path.variable.as_deref(), Some("Semi semantics/Root"));
    /// assert_eq!(path.full_variable_name().unwrap(), "Indigo/Semi semantics/Root");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error for empty paths, paths without a group and blank segments.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let mut parts = path.splitn(3, '/');
        let collection = parts.next().unwrap_or_default();
        let group = parts
            .next()
            .ok_or_else(|| PathError::MissingGroup(path.to_string()))?;
        let variable = parts.next();

        if collection.trim().is_empty()
            || group.trim().is_empty()
            || variable.is_some_and(|v| v.split('/').any(|s| s.trim().is_empty()))
        {
            return Err(PathError::EmptySegment(path.to_string()));
        }

        Ok(Self {
            collection: collection.to_string(),
            group: group.to_string(),
            variable: variable.map(ToString::to_string),
        })
    }

    /// Full variable name (`Group/Variable`) when a variable is named.
    #[must_use]
    pub fn full_variable_name(&self) -> Option<String> {
        self.variable
            .as_ref()
            .map(|rest| format!("{}/{rest}", self.group))
    }
}

/// An ordered, importable collection of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rules in evaluation order
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Parses and validates a rule set.
    ///
    /// Accepts either `{"rules": [...]}` or a bare array of rules.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON and for structurally invalid rules:
    /// empty or duplicate ids, and unparseable `aliasTo` paths.
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Document {
            Wrapped(RuleSet),
            Bare(Vec<Rule>),
        }

        let document: Document =
            serde_json::from_str(json).context("Failed to parse rule set JSON")?;
        let set = match document {
            Document::Wrapped(set) => set,
            Document::Bare(rules) => Self { rules },
        };
        set.validate()?;
        Ok(set)
    }

    /// Serializes the rule set as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize rule set")
    }

    /// Checks rule structure.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                anyhow::bail!("Rule #{} ('{}') has an empty id", idx + 1, rule.name);
            }
            if !seen.insert(rule.id.as_str()) {
                anyhow::bail!("Duplicate rule id '{}'", rule.id);
            }
            rule.target_path()
                .with_context(|| format!("Rule '{}' ({})", rule.name, rule.id))?;
        }
        Ok(())
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Enabled rules only.
    pub fn enabled(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| rule.enabled)
    }
}
