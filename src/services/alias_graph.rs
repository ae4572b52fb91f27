//! Alias graph: collections, groups, variables and the alias edges between them.
//!
//! The graph is additive. Edges are merged as variables are added and are
//! never removed individually; [`AliasGraph::create_alias`] rewrites a
//! variable's modes and then rebuilds every edge from scratch.
//!
//! Two cycle guards exist:
//! - [`AliasGraph::would_create_cycle`] gates a single new edge before mutation
//! - [`AliasGraph::detect_circular_dependencies`] audits the whole graph

use crate::models::{
    Alias, AliasOperation, Collection, EntryValue, Group, Mode, ModeValue, Pairing, Variable,
    VariableEntry, VariableType,
};
use crate::services::validation::{
    ValidationError, ValidationErrorKind, ValidationReport, ValidationWarning,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

/// Why an alias could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    /// Variable id not in the graph
    UnknownVariable(String),
    /// Mode id not on the variable or its collection
    UnknownMode {
        /// Variable the mode was looked up on
        variable_id: String,
        /// Missing mode id
        mode_id: String,
    },
    /// The edge would close a cycle
    WouldCreateCycle {
        /// Aliasing variable
        from: String,
        /// Aliased variable
        to: String,
    },
}

impl fmt::Display for AliasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVariable(id) => write!(f, "unknown variable '{id}'"),
            Self::UnknownMode {
                variable_id,
                mode_id,
            } => write!(f, "variable '{variable_id}' has no mode '{mode_id}'"),
            Self::WouldCreateCycle { from, to } => {
                write!(f, "aliasing '{from}' to '{to}' would create a cycle")
            }
        }
    }
}

impl std::error::Error for AliasError {}

/// Directed variable-to-variable adjacency derived from alias edges.
///
/// Cheap to clone, so callers planning several aliases can extend a working
/// copy and keep checking it for cycles.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    edges: HashMap<String, BTreeSet<String>>,
}

impl Adjacency {
    /// Adds an edge.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }

    /// Direct targets of `from`, in id order.
    pub fn targets<'a>(&'a self, from: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .get(from)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    /// True when following edges from `start` reaches `goal`.
    #[must_use]
    pub fn reaches(&self, start: &str, goal: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if node == goal {
                return true;
            }
            if !visited.insert(node) {
                continue;
            }
            stack.extend(self.targets(node));
        }
        false
    }

    /// True if adding `from -> to` would close a cycle.
    #[must_use]
    pub fn would_create_cycle(&self, from: &str, to: &str) -> bool {
        from == to || self.reaches(to, from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Container of collections, groups, variables and alias edges.
#[derive(Debug, Clone, Default)]
pub struct AliasGraph {
    collections: Vec<Collection>,
    collection_index: HashMap<String, usize>,
    groups: Vec<Group>,
    group_index: HashMap<String, usize>,
    variables: Vec<Variable>,
    variable_index: HashMap<String, usize>,
    aliases: Vec<Alias>,
    alias_index: HashMap<(String, String), usize>,
}

impl AliasGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection, replacing one with the same id.
    pub fn add_collection(&mut self, collection: Collection) {
        if let Some(&idx) = self.collection_index.get(&collection.id) {
            self.collections[idx] = collection;
        } else {
            self.collection_index
                .insert(collection.id.clone(), self.collections.len());
            self.collections.push(collection);
        }
    }

    /// Registers a group, replacing one with the same id.
    pub fn add_group(&mut self, group: Group) {
        if let Some(&idx) = self.group_index.get(&group.id) {
            self.groups[idx] = group;
        } else {
            self.group_index.insert(group.id.clone(), self.groups.len());
            self.groups.push(group);
        }
    }

    /// Id of the group `name` in a collection, creating the group if needed.
    pub fn ensure_group(&mut self, collection_id: &str, name: &str) -> String {
        let id = Group::id_for(collection_id, name);
        if !self.group_index.contains_key(&id) {
            self.add_group(Group {
                id: id.clone(),
                name: name.to_string(),
                collection_id: collection_id.to_string(),
            });
        }
        id
    }

    /// Registers a variable and merges its alias modes into edges.
    ///
    /// Each alias-valued mode extends the edge for its (from, to) pair, or
    /// creates that edge. Re-adding a variable id replaces the variable but
    /// keeps existing edges.
    pub fn add_variable(&mut self, variable: Variable) {
        for mode in &variable.modes {
            if let ModeValue::Alias {
                variable_id,
                mode_id,
            } = &mode.value
            {
                self.merge_edge(&variable.id, variable_id, &mode.id, mode_id);
            }
        }

        if let Some(&idx) = self.variable_index.get(&variable.id) {
            self.variables[idx] = variable;
        } else {
            self.variable_index
                .insert(variable.id.clone(), self.variables.len());
            self.variables.push(variable);
        }
    }

    fn merge_edge(&mut self, from: &str, to: &str, from_mode: &str, to_mode: &str) {
        let key = (from.to_string(), to.to_string());
        if let Some(&idx) = self.alias_index.get(&key) {
            self.aliases[idx]
                .mode_map
                .insert(from_mode.to_string(), to_mode.to_string());
            return;
        }
        let mut alias = Alias {
            from_variable_id: key.0.clone(),
            to_variable_id: key.1.clone(),
            mode_map: BTreeMap::new(),
        };
        alias
            .mode_map
            .insert(from_mode.to_string(), to_mode.to_string());
        self.alias_index.insert(key, self.aliases.len());
        self.aliases.push(alias);
    }

    /// Drops every edge and re-derives them from the variables' modes.
    pub fn rebuild_edges(&mut self) {
        self.aliases.clear();
        self.alias_index.clear();
        let edges: Vec<(String, String, String, String)> = self
            .variables
            .iter()
            .flat_map(|variable| {
                variable.modes.iter().filter_map(move |mode| match &mode.value {
                    ModeValue::Alias {
                        variable_id,
                        mode_id,
                    } => Some((
                        variable.id.clone(),
                        variable_id.clone(),
                        mode.id.clone(),
                        mode_id.clone(),
                    )),
                    ModeValue::Direct { .. } => None,
                })
            })
            .collect();
        for (from, to, from_mode, to_mode) in edges {
            self.merge_edge(&from, &to, &from_mode, &to_mode);
        }
    }

    /// All collections in insertion order.
    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Collection by id.
    #[must_use]
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collection_index.get(id).map(|&idx| &self.collections[idx])
    }

    /// Collection by exact name.
    #[must_use]
    pub fn collection_by_name(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// All groups in insertion order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Group by id.
    #[must_use]
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.group_index.get(id).map(|&idx| &self.groups[idx])
    }

    /// Group by exact name within a collection.
    #[must_use]
    pub fn group_by_name(&self, collection_id: &str, name: &str) -> Option<&Group> {
        self.group(&Group::id_for(collection_id, name))
            .or_else(|| {
                self.groups
                    .iter()
                    .find(|g| g.collection_id == collection_id && g.name == name)
            })
    }

    /// All variables in insertion order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Variable by id.
    #[must_use]
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variable_index.get(id).map(|&idx| &self.variables[idx])
    }

    /// Variables of a group in insertion order.
    pub fn variables_in_group<'a>(
        &'a self,
        group_id: &'a str,
    ) -> impl Iterator<Item = &'a Variable> {
        self.variables.iter().filter(move |v| v.group_id == group_id)
    }

    /// All alias edges in creation order.
    #[must_use]
    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    /// Edge for a (from, to) pair.
    #[must_use]
    pub fn alias(&self, from: &str, to: &str) -> Option<&Alias> {
        self.alias_index
            .get(&(from.to_string(), to.to_string()))
            .map(|&idx| &self.aliases[idx])
    }

    /// Adjacency of the current edges.
    #[must_use]
    pub fn adjacency(&self) -> Adjacency {
        let mut adjacency = Adjacency::default();
        for alias in &self.aliases {
            adjacency.add_edge(&alias.from_variable_id, &alias.to_variable_id);
        }
        adjacency
    }

    /// True if aliasing `from` to `to` would let a variable reach itself.
    ///
    /// ```
    /// use rangde::services::alias_graph::AliasGraph;
    ///
    /// let graph = AliasGraph::new();
    /// assert!(graph.would_create_cycle("a", "a"));
    /// assert!(!graph.would_create_cycle("a", "b"));
    /// ```
    #[must_use]
    pub fn would_create_cycle(&self, from: &str, to: &str) -> bool {
        from == to || self.adjacency().reaches(to, from)
    }

    /// Every distinct cycle reachable by a depth-first walk of the graph.
    ///
    /// Each cycle is listed once, as variable ids rotated to start at the
    /// smallest id.
    #[must_use]
    pub fn detect_circular_dependencies(&self) -> Vec<Vec<String>> {
        let adjacency = self.adjacency();
        let mut state: HashMap<String, Visit> = HashMap::new();
        let mut stack: Vec<String> = Vec::new();
        let mut seen: HashSet<Vec<String>> = HashSet::new();
        let mut cycles = Vec::new();

        let starts: Vec<&str> = self
            .variables
            .iter()
            .map(|v| v.id.as_str())
            .chain(self.aliases.iter().map(|a| a.from_variable_id.as_str()))
            .collect();
        for start in starts {
            if !state.contains_key(start) {
                visit(
                    start,
                    &adjacency,
                    &mut state,
                    &mut stack,
                    &mut seen,
                    &mut cycles,
                );
            }
        }
        cycles
    }

    /// Structural integrity report.
    ///
    /// Errors: orphaned groups and variables, broken aliases (dangling
    /// variable or mode ids), self-aliases and cycles. Warnings: variables
    /// without modes, and variables missing a value for one of their
    /// collection's modes.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        for group in &self.groups {
            if self.collection(&group.collection_id).is_none() {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::OrphanedGroup,
                    format!(
                        "Group '{}' points at missing collection '{}'",
                        group.name, group.collection_id
                    ),
                ));
            }
        }

        for variable in &self.variables {
            if self.group(&variable.group_id).is_none() {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::OrphanedVariable,
                    format!(
                        "Variable '{}' points at missing group '{}'",
                        variable.name, variable.group_id
                    ),
                ));
            }
            if self.collection(&variable.collection_id).is_none() {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::OrphanedVariable,
                    format!(
                        "Variable '{}' points at missing collection '{}'",
                        variable.name, variable.collection_id
                    ),
                ));
            }
            if variable.modes.is_empty() {
                report.add_warning(ValidationWarning::new(format!(
                    "Variable '{}' has no modes",
                    variable.name
                )));
            } else if let Some(collection) = self.collection(&variable.collection_id) {
                for mode in &collection.modes {
                    if variable.mode(&mode.id).is_none() {
                        report.add_warning(ValidationWarning::new(format!(
                            "Variable '{}' has no value for mode '{}'",
                            variable.name, mode.name
                        )));
                    }
                }
            }
        }

        for alias in &self.aliases {
            let from = self.variable(&alias.from_variable_id);
            let to = self.variable(&alias.to_variable_id);
            if from.is_none() {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::BrokenAlias,
                    format!("Alias source '{}' does not exist", alias.from_variable_id),
                ));
            }
            let Some(to) = to else {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::BrokenAlias,
                    format!(
                        "Alias from '{}' targets missing variable '{}'",
                        from.map_or(alias.from_variable_id.as_str(), |v| v.name.as_str()),
                        alias.to_variable_id
                    ),
                ));
                continue;
            };
            if alias.from_variable_id == alias.to_variable_id {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::SelfAlias,
                    format!("Variable '{}' aliases itself", to.name),
                ));
            }
            let target_modes = self.collection(&to.collection_id);
            for to_mode in alias.mode_map.values() {
                let known = to.mode(to_mode).is_some()
                    || target_modes.is_some_and(|c| c.mode_by_id(to_mode).is_some());
                if !known {
                    report.add_error(ValidationError::new(
                        ValidationErrorKind::BrokenAlias,
                        format!("Alias into '{}' uses missing mode '{to_mode}'", to.name),
                    ));
                }
            }
        }

        for cycle in self.detect_circular_dependencies() {
            if cycle.len() > 1 {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::CircularAlias,
                    format!("Alias cycle: {} -> {}", cycle.join(" -> "), cycle[0]),
                ));
            }
        }

        report.add_info(format!(
            "{} collections, {} groups, {} variables, {} aliases",
            self.collections.len(),
            self.groups.len(),
            self.variables.len(),
            self.aliases.len()
        ));
        report
    }

    /// Builds a graph from committed pipeline entries.
    ///
    /// Entries sharing a `variable_id` become the modes of one variable. An
    /// alias whose target entry is missing keeps the raw target id so that
    /// validation reports it as broken.
    #[must_use]
    pub fn from_entries<'a>(
        collections: impl IntoIterator<Item = &'a Collection>,
        entries: &[VariableEntry],
    ) -> Self {
        let mut graph = Self::new();
        for collection in collections {
            graph.add_collection(collection.clone());
        }

        let by_id: HashMap<&str, &VariableEntry> =
            entries.iter().map(|e| (e.id.as_str(), e)).collect();

        let mut order: Vec<&str> = Vec::new();
        let mut grouped: HashMap<&str, Vec<&VariableEntry>> = HashMap::new();
        for entry in entries {
            grouped
                .entry(entry.variable_id.as_str())
                .or_insert_with(|| {
                    order.push(entry.variable_id.as_str());
                    Vec::new()
                })
                .push(entry);
        }

        for variable_id in order {
            let Some(modes) = grouped.get(variable_id) else {
                continue;
            };
            let Some(first) = modes.first() else {
                continue;
            };
            let group_name = first.name.split('/').next().unwrap_or(&first.name);
            let group_id = graph.ensure_group(&first.collection_id, group_name);

            let modes = modes
                .iter()
                .map(|entry| Mode {
                    id: entry.mode_id.clone(),
                    name: entry.mode_name.clone(),
                    value: match &entry.value {
                        EntryValue::Color { rgb, alpha } => ModeValue::Direct {
                            rgb: *rgb,
                            alpha: *alpha,
                        },
                        EntryValue::Alias { target_id, .. } => match by_id.get(target_id.as_str()) {
                            Some(target) => ModeValue::Alias {
                                variable_id: target.variable_id.clone(),
                                mode_id: target.mode_id.clone(),
                            },
                            None => ModeValue::Alias {
                                variable_id: target_id.clone(),
                                mode_id: String::new(),
                            },
                        },
                    },
                })
                .collect();

            graph.add_variable(Variable {
                id: variable_id.to_string(),
                name: first.name.clone(),
                collection_id: first.collection_id.clone(),
                group_id,
                variable_type: VariableType::Color,
                modes,
            });
        }

        tracing::debug!(
            variables = graph.variables.len(),
            aliases = graph.aliases.len(),
            "built alias graph from entries"
        );
        graph
    }

    /// Applies an alias operation, refusing any that would close a cycle.
    ///
    /// # Errors
    ///
    /// Returns an error when either variable or any paired mode is unknown,
    /// or when the alias would create a cycle. The graph is unchanged on error.
    pub fn create_alias(&mut self, operation: &AliasOperation) -> Result<(), AliasError> {
        let source = &operation.source_variable_id;
        let target = &operation.target_variable_id;

        let source_idx = *self
            .variable_index
            .get(source)
            .ok_or_else(|| AliasError::UnknownVariable(source.clone()))?;
        let target_variable = self
            .variable(target)
            .ok_or_else(|| AliasError::UnknownVariable(target.clone()))?;

        if self.would_create_cycle(source, target) {
            return Err(AliasError::WouldCreateCycle {
                from: source.clone(),
                to: target.clone(),
            });
        }

        let target_collection = self.collection(&target_variable.collection_id);
        for mapping in &operation.modes {
            let known = target_variable.mode(&mapping.target_mode_id).is_some()
                || target_collection
                    .is_some_and(|c| c.mode_by_id(&mapping.target_mode_id).is_some());
            if !known {
                return Err(AliasError::UnknownMode {
                    variable_id: target.clone(),
                    mode_id: mapping.target_mode_id.clone(),
                });
            }
            if self.variables[source_idx].mode(&mapping.source_mode_id).is_none() {
                return Err(AliasError::UnknownMode {
                    variable_id: source.clone(),
                    mode_id: mapping.source_mode_id.clone(),
                });
            }
        }

        let variable = &mut self.variables[source_idx];
        for mapping in &operation.modes {
            if let Some(mode) = variable
                .modes
                .iter_mut()
                .find(|m| m.id == mapping.source_mode_id)
            {
                mode.value = ModeValue::Alias {
                    variable_id: target.clone(),
                    mode_id: mapping.target_mode_id.clone(),
                };
            }
        }
        if operation.pairing == Pairing::FallbackMatch {
            tracing::debug!(%source, %target, "applying fallback-paired alias");
        }

        self.rebuild_edges();
        Ok(())
    }

    /// Applies operations in order, collecting the ones that failed.
    pub fn apply_operations(&mut self, operations: &[AliasOperation]) -> Vec<(usize, AliasError)> {
        let mut failures = Vec::new();
        for (idx, operation) in operations.iter().enumerate() {
            if let Err(e) = self.create_alias(operation) {
                tracing::warn!(%e, "alias operation {} not applied", idx + 1);
                failures.push((idx, e));
            }
        }
        failures
    }
}

fn visit(
    node: &str,
    adjacency: &Adjacency,
    state: &mut HashMap<String, Visit>,
    stack: &mut Vec<String>,
    seen: &mut HashSet<Vec<String>>,
    cycles: &mut Vec<Vec<String>>,
) {
    state.insert(node.to_string(), Visit::InProgress);
    stack.push(node.to_string());

    for next in adjacency.targets(node) {
        match state.get(next).copied() {
            Some(Visit::InProgress) => {
                if let Some(pos) = stack.iter().position(|n| n == next) {
                    let cycle = canonical_cycle(&stack[pos..]);
                    if seen.insert(cycle.clone()) {
                        cycles.push(cycle);
                    }
                }
            }
            Some(Visit::Done) => {}
            None => visit(next, adjacency, state, stack, seen, cycles),
        }
    }

    stack.pop();
    state.insert(node.to_string(), Visit::Done);
}

/// Rotates a cycle to start at its smallest id.
fn canonical_cycle(nodes: &[String]) -> Vec<String> {
    let start = nodes
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map_or(0, |(idx, _)| idx);
    nodes[start..]
        .iter()
        .chain(nodes[..start].iter())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollectionMode, CollectionType, ModeMapping, RgbColor};

    fn collection(id: &str, modes: &[&str]) -> Collection {
        Collection {
            id: id.to_string(),
            name: id.to_uppercase(),
            collection_type: CollectionType::Semantic,
            modes: modes
                .iter()
                .map(|m| CollectionMode {
                    id: format!("{id}:{m}"),
                    name: (*m).to_string(),
                })
                .collect(),
        }
    }

    fn color_var(graph: &mut AliasGraph, id: &str) {
        let group_id = graph.ensure_group("c", "G");
        graph.add_variable(Variable {
            id: id.to_string(),
            name: format!("G/{id}"),
            collection_id: "c".to_string(),
            group_id,
            variable_type: VariableType::Color,
            modes: vec![Mode {
                id: "c:Value".to_string(),
                name: "Value".to_string(),
                value: ModeValue::Direct {
                    rgb: RgbColor::WHITE,
                    alpha: 1.0,
                },
            }],
        });
    }

    fn alias_var(graph: &mut AliasGraph, id: &str, to: &str) {
        let group_id = graph.ensure_group("c", "G");
        graph.add_variable(Variable {
            id: id.to_string(),
            name: format!("G/{id}"),
            collection_id: "c".to_string(),
            group_id,
            variable_type: VariableType::Color,
            modes: vec![Mode {
                id: "c:Value".to_string(),
                name: "Value".to_string(),
                value: ModeValue::Alias {
                    variable_id: to.to_string(),
                    mode_id: "c:Value".to_string(),
                },
            }],
        });
    }

    fn graph() -> AliasGraph {
        let mut graph = AliasGraph::new();
        graph.add_collection(collection("c", &["Value"]));
        graph
    }

    #[test]
    fn test_self_alias_always_cycles() {
        let graph = graph();
        for id in ["a", "b", "missing"] {
            assert!(graph.would_create_cycle(id, id));
        }
    }

    #[test]
    fn test_would_create_cycle_follows_chains() {
        let mut graph = graph();
        color_var(&mut graph, "a");
        alias_var(&mut graph, "b", "a");
        alias_var(&mut graph, "c", "b");

        assert!(graph.would_create_cycle("a", "c"));
        assert!(graph.would_create_cycle("b", "c"));
        assert!(!graph.would_create_cycle("c", "a"));
    }

    #[test]
    fn test_detect_two_node_cycle() {
        let mut graph = graph();
        alias_var(&mut graph, "a", "b");
        alias_var(&mut graph, "b", "a");

        let cycles = graph.detect_circular_dependencies();
        assert_eq!(cycles, vec![vec!["a".to_string(), "b".to_string()]]);

        let report = graph.validate();
        assert_eq!(report.count_errors(ValidationErrorKind::CircularAlias), 1);
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let mut graph = graph();
        color_var(&mut graph, "a");
        alias_var(&mut graph, "b", "a");
        alias_var(&mut graph, "c", "a");
        assert!(graph.detect_circular_dependencies().is_empty());
        assert!(graph.validate().is_valid());
    }

    #[test]
    fn test_add_variable_merges_modes_into_one_edge() {
        let mut graph = AliasGraph::new();
        graph.add_collection(collection("c", &["Light", "Dark"]));
        color_var(&mut graph, "a");
        let group_id = graph.ensure_group("c", "G");
        graph.add_variable(Variable {
            id: "b".to_string(),
            name: "G/b".to_string(),
            collection_id: "c".to_string(),
            group_id,
            variable_type: VariableType::Color,
            modes: ["Light", "Dark"]
                .iter()
                .map(|m| Mode {
                    id: format!("c:{m}"),
                    name: (*m).to_string(),
                    value: ModeValue::Alias {
                        variable_id: "a".to_string(),
                        mode_id: "c:Value".to_string(),
                    },
                })
                .collect(),
        });

        assert_eq!(graph.aliases().len(), 1);
        assert_eq!(graph.alias("b", "a").unwrap().mode_map.len(), 2);
    }

    #[test]
    fn test_validate_reports_broken_and_self_aliases() {
        let mut graph = graph();
        alias_var(&mut graph, "a", "ghost");
        alias_var(&mut graph, "s", "s");

        let report = graph.validate();
        assert_eq!(report.count_errors(ValidationErrorKind::BrokenAlias), 1);
        assert_eq!(report.count_errors(ValidationErrorKind::SelfAlias), 1);
    }

    #[test]
    fn test_validate_reports_orphans_and_empty_variables() {
        let mut graph = AliasGraph::new();
        graph.add_group(Group {
            id: "g".to_string(),
            name: "G".to_string(),
            collection_id: "nowhere".to_string(),
        });
        graph.add_variable(Variable {
            id: "v".to_string(),
            name: "X/v".to_string(),
            collection_id: "nowhere".to_string(),
            group_id: "missing".to_string(),
            variable_type: VariableType::Color,
            modes: Vec::new(),
        });

        let report = graph.validate();
        assert_eq!(report.count_errors(ValidationErrorKind::OrphanedGroup), 1);
        assert_eq!(report.count_errors(ValidationErrorKind::OrphanedVariable), 2);
        assert!(report.warnings.iter().any(|w| w.message.contains("no modes")));
    }

    #[test]
    fn test_validate_warns_on_incomplete_modes() {
        let mut graph = AliasGraph::new();
        graph.add_collection(collection("c", &["Value", "Extra"]));
        color_var(&mut graph, "a");
        let report = graph.validate();
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.message.contains("no value for mode 'Extra'")));
    }

    #[test]
    fn test_create_alias_refuses_cycles() {
        let mut graph = graph();
        color_var(&mut graph, "a");
        alias_var(&mut graph, "b", "a");

        let op = AliasOperation {
            rule_id: None,
            source_variable_id: "a".to_string(),
            source_name: "G/a".to_string(),
            target_variable_id: "b".to_string(),
            target_name: "G/b".to_string(),
            pairing: Pairing::ExactMatch,
            modes: vec![ModeMapping {
                source_mode_id: "c:Value".to_string(),
                source_mode_name: "Value".to_string(),
                target_mode_id: "c:Value".to_string(),
                target_mode_name: "Value".to_string(),
                pairing: Pairing::ExactMatch,
            }],
        };
        assert!(matches!(
            graph.create_alias(&op),
            Err(AliasError::WouldCreateCycle { .. })
        ));
        assert_eq!(graph.aliases().len(), 1);
    }

    #[test]
    fn test_create_alias_rewrites_modes_and_edges() {
        let mut graph = graph();
        color_var(&mut graph, "a");
        color_var(&mut graph, "x");
        alias_var(&mut graph, "b", "a");

        let op = AliasOperation {
            rule_id: Some("r1".to_string()),
            source_variable_id: "b".to_string(),
            source_name: "G/b".to_string(),
            target_variable_id: "x".to_string(),
            target_name: "G/x".to_string(),
            pairing: Pairing::ExactMatch,
            modes: vec![ModeMapping {
                source_mode_id: "c:Value".to_string(),
                source_mode_name: "Value".to_string(),
                target_mode_id: "c:Value".to_string(),
                target_mode_name: "Value".to_string(),
                pairing: Pairing::ExactMatch,
            }],
        };
        graph.create_alias(&op).unwrap();

        assert!(graph.alias("b", "a").is_none());
        assert!(graph.alias("b", "x").is_some());
        assert_eq!(graph.aliases().len(), 1);
    }

    #[test]
    fn test_adjacency_working_copy() {
        let mut adjacency = Adjacency::default();
        adjacency.add_edge("a", "b");
        assert!(!adjacency.would_create_cycle("c", "a"));
        adjacency.add_edge("b", "c");
        assert!(adjacency.would_create_cycle("c", "a"));
        assert_eq!(adjacency.targets("a").collect::<Vec<_>>(), vec!["b"]);
    }
}
