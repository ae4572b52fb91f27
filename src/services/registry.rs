//! Flattened, indexed store of pipeline entries.
//!
//! Layers commit drafts here in ascending order and look their targets up by
//! typed [`TokenKey`] plus mode name. The registry does not check for cycles;
//! alias chains are walked with an explicit depth ceiling instead.

use crate::models::{
    Collection, CollectionMode, EntryDraft, EntryValue, LayerKind, Pairing, PaletteTable, RgbColor,
    TokenKey, VariableEntry,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fmt::Write as _;

/// Why an alias chain could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// An entry id on the chain is not in the registry
    MissingEntry(String),
    /// The chain is longer than the allowed depth
    DepthExceeded {
        /// Entry the walk started from
        start: String,
        /// Depth ceiling that was hit
        max_depth: usize,
    },
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEntry(id) => write!(f, "alias chain references missing entry '{id}'"),
            Self::DepthExceeded { start, max_depth } => write!(
                f,
                "alias chain from '{start}' is longer than {max_depth} entries"
            ),
        }
    }
}

impl std::error::Error for ChainError {}

/// Indexed store of committed entries.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    entries: Vec<VariableEntry>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<(String, String), Vec<usize>>,
    by_collection: HashMap<String, Vec<usize>>,
    by_layer: BTreeMap<u8, Vec<usize>>,
    by_key: HashMap<(TokenKey, String), usize>,
    variable_ids: HashMap<TokenKey, String>,
    collections: Vec<Collection>,
    next_id: u64,
}

impl VariableRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new id; ids increase monotonically and never repeat.
    pub fn generate_id(&mut self) -> String {
        self.next_id += 1;
        format!("var-{:06}", self.next_id)
    }

    /// Registers the collection a layer fills, with its modes in order.
    ///
    /// Mode ids are derived from the layer and the mode position.
    pub fn register_collection(&mut self, kind: LayerKind, modes: &[String]) -> &Collection {
        let collection = Collection {
            id: kind.collection_id(),
            name: kind.collection_name().to_string(),
            collection_type: kind.collection_type(),
            modes: modes
                .iter()
                .enumerate()
                .map(|(idx, name)| CollectionMode {
                    id: format!("mode:{}:{idx}", kind.index()),
                    name: name.clone(),
                })
                .collect(),
        };
        let idx = match self.collections.iter().position(|c| c.id == collection.id) {
            Some(idx) => {
                self.collections[idx] = collection;
                idx
            }
            None => {
                self.collections.push(collection);
                self.collections.len() - 1
            }
        };
        &self.collections[idx]
    }

    /// Collection of a layer, if registered.
    #[must_use]
    pub fn collection_for(&self, kind: LayerKind) -> Option<&Collection> {
        let id = kind.collection_id();
        self.collections.iter().find(|c| c.id == id)
    }

    /// Registered collections in layer order of registration.
    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Commits a layer's drafts, assigning entry and variable ids.
    ///
    /// Drafts naming a mode the collection lacks, or repeating a (key, mode)
    /// pair already committed, are dropped. Returns the number committed.
    pub fn commit(
        &mut self,
        kind: LayerKind,
        drafts: Vec<EntryDraft>,
        palettes: &PaletteTable,
    ) -> usize {
        let Some(collection) = self.collection_for(kind).cloned() else {
            tracing::warn!(layer = kind.index(), "commit without a registered collection");
            return 0;
        };

        let mut committed = 0;
        for draft in drafts {
            let Some(mode) = collection.mode_by_name(&draft.mode_name) else {
                tracing::warn!(
                    mode = %draft.mode_name,
                    collection = %collection.name,
                    "dropping entry for unknown mode"
                );
                continue;
            };
            let lookup = (draft.key.clone(), draft.mode_name.clone());
            if self.by_key.contains_key(&lookup) {
                tracing::warn!(
                    key = ?draft.key,
                    mode = %draft.mode_name,
                    "dropping duplicate entry"
                );
                continue;
            }

            let variable_id = match self.variable_ids.get(&draft.key) {
                Some(id) => id.clone(),
                None => {
                    let id = self.generate_id();
                    self.variable_ids.insert(draft.key.clone(), id.clone());
                    id
                }
            };
            let entry = VariableEntry {
                id: self.generate_id(),
                variable_id,
                name: draft.key.display_name(palettes),
                key: draft.key,
                collection_id: collection.id.clone(),
                collection_name: collection.name.clone(),
                layer: kind.index(),
                mode_id: mode.id.clone(),
                mode_name: mode.name.clone(),
                value: draft.value,
                metadata: draft.metadata,
            };
            self.insert(entry, lookup);
            committed += 1;
        }
        committed
    }

    fn insert(&mut self, entry: VariableEntry, lookup: (TokenKey, String)) {
        let idx = self.entries.len();
        self.by_id.insert(entry.id.clone(), idx);
        self.by_name
            .entry((entry.collection_id.clone(), entry.name.clone()))
            .or_default()
            .push(idx);
        self.by_collection
            .entry(entry.collection_id.clone())
            .or_default()
            .push(idx);
        self.by_layer.entry(entry.layer).or_default().push(idx);
        self.by_key.insert(lookup, idx);
        self.entries.push(entry);
    }

    /// All entries in commit order.
    #[must_use]
    pub fn entries(&self) -> &[VariableEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&VariableEntry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Entries (one per mode) of a variable by collection and name.
    #[must_use]
    pub fn find_by_name(&self, collection_id: &str, name: &str) -> Vec<&VariableEntry> {
        self.by_name
            .get(&(collection_id.to_string(), name.to_string()))
            .map(|idxs| idxs.iter().map(|&idx| &self.entries[idx]).collect())
            .unwrap_or_default()
    }

    /// Entries of a collection.
    #[must_use]
    pub fn in_collection(&self, collection_id: &str) -> Vec<&VariableEntry> {
        self.by_collection
            .get(collection_id)
            .map(|idxs| idxs.iter().map(|&idx| &self.entries[idx]).collect())
            .unwrap_or_default()
    }

    /// Entries of a layer.
    #[must_use]
    pub fn in_layer(&self, layer: u8) -> Vec<&VariableEntry> {
        self.by_layer
            .get(&layer)
            .map(|idxs| idxs.iter().map(|&idx| &self.entries[idx]).collect())
            .unwrap_or_default()
    }

    /// Entry counts per layer.
    #[must_use]
    pub fn layer_counts(&self) -> BTreeMap<u8, usize> {
        self.by_layer
            .iter()
            .map(|(&layer, idxs)| (layer, idxs.len()))
            .collect()
    }

    /// Entry by typed key and exact mode name.
    #[must_use]
    pub fn find(&self, key: &TokenKey, mode_name: &str) -> Option<&VariableEntry> {
        self.by_key
            .get(&(key.clone(), mode_name.to_string()))
            .map(|&idx| &self.entries[idx])
    }

    /// Entry by key in the mode named `preferred`, else in the default mode.
    #[must_use]
    pub fn resolve(&self, key: &TokenKey, preferred: &str) -> Option<(&VariableEntry, Pairing)> {
        let collection = self.collection_for(key.layer())?;
        let (mode, pairing) = collection.resolve_mode(preferred)?;
        self.find(key, &mode.name).map(|entry| (entry, pairing))
    }

    /// Entries from `id` to the value-holding leaf, both included.
    ///
    /// ```
    /// use rangde::models::{EntryDraft, EntryMetadata, EntryValue, LayerKind, PaletteTable,
    ///     RgbColor, ScaleName, Step, TokenKey};
    /// use rangde::services::registry::VariableRegistry;
    ///
    /// let mut registry = VariableRegistry::new();
    /// registry.register_collection(LayerKind::Primitives, &["Value".to_string()]);
    /// let key = TokenKey::Primitive {
    ///     palette: "p".to_string(),
    ///     step: Step::LIGHTEST,
    ///     scale: ScaleName::Surface,
    /// };
    /// let draft = EntryDraft {
    ///     key: key.clone(),
    ///     mode_name: "Value".to_string(),
    ///     value: EntryValue::Color { rgb: RgbColor::WHITE, alpha: 1.0 },
    ///     metadata: EntryMetadata::default(),
    /// };
    /// registry.commit(LayerKind::Primitives, vec![draft], &PaletteTable::new());
    ///
    /// let leaf = registry.find(&key, "Value").unwrap();
    /// assert_eq!(registry.get_alias_chain(&leaf.id, 9).unwrap().len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::MissingEntry`] when an id on the chain is
    /// unknown, and [`ChainError::DepthExceeded`] when the chain would hold
    /// more than `max_depth` entries.
    pub fn get_alias_chain(
        &self,
        id: &str,
        max_depth: usize,
    ) -> Result<Vec<&VariableEntry>, ChainError> {
        let mut chain = Vec::new();
        let mut current = id;
        loop {
            if chain.len() == max_depth {
                return Err(ChainError::DepthExceeded {
                    start: id.to_string(),
                    max_depth,
                });
            }
            let entry = self
                .get(current)
                .ok_or_else(|| ChainError::MissingEntry(current.to_string()))?;
            chain.push(entry);
            match &entry.value {
                EntryValue::Color { .. } => return Ok(chain),
                EntryValue::Alias { target_id, .. } => current = target_id.as_str(),
            }
        }
    }

    /// Color and alpha an entry ultimately resolves to.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_alias_chain`].
    pub fn resolve_value(&self, id: &str, max_depth: usize) -> Result<(RgbColor, f64), ChainError> {
        let chain = self.get_alias_chain(id, max_depth)?;
        match chain.last().map(|leaf| &leaf.value) {
            Some(EntryValue::Color { rgb, alpha }) => Ok((*rgb, *alpha)),
            _ => Err(ChainError::MissingEntry(id.to_string())),
        }
    }

    /// Human-readable rendering of an alias chain, one entry per line.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_alias_chain`].
    pub fn trace(&self, id: &str, max_depth: usize) -> Result<String, ChainError> {
        let chain = self.get_alias_chain(id, max_depth)?;
        let mut out = String::new();
        for (depth, entry) in chain.iter().enumerate() {
            let indent = "  ".repeat(depth);
            let arrow = if depth == 0 { "" } else { "→ " };
            let _ = write!(
                out,
                "{indent}{arrow}[L{}] {} / {} ({})",
                entry.layer, entry.collection_name, entry.name, entry.mode_name
            );
            if let EntryValue::Color { rgb, alpha } = &entry.value {
                let _ = write!(out, " = {rgb} @ {:.0}%", alpha * 100.0);
            }
            out.push('\n');
        }
        Ok(out)
    }
}
