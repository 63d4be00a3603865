//! Loading, upgrading and persisting the configuration tree.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::backend::KeyValueStore;
use super::error::StoreError;
use crate::axis::ConfigAxis;
use crate::error::DesignerError;
use crate::profile::StyleValue;
use crate::tree::{ConfigTree, MergeReport};

/// Key the tree is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cineshelf_ultimate_styles";

/// Where a loaded tree came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing was stored.
    Defaults,
    /// Stored data was parsed and merged over the defaults.
    Persisted,
    /// Stored data existed but could not be read or parsed, and was ignored.
    Recovered,
}

/// The result of [`ConfigStore::load_with_report`].
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub tree: ConfigTree,
    pub source: LoadSource,
    pub merge: MergeReport,
}

/// Whether a mutation reached durable storage.
///
/// A failed write does not undo the mutation: the in-memory tree stays
/// authoritative and the next successful save persists it.
#[derive(Debug)]
pub enum WriteStatus {
    Durable,
    Failed(StoreError),
}

impl WriteStatus {
    pub fn is_durable(&self) -> bool {
        matches!(self, WriteStatus::Durable)
    }
}

/// Persists a [`ConfigTree`] as one JSON value under one key.
#[derive(Debug, Clone)]
pub struct ConfigStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ConfigStore<S> {
    /// Creates a store using [`DEFAULT_STORAGE_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Loads the tree, falling back to defaults on any problem.
    ///
    /// Never fails: missing or unreadable data yields the all-defaults tree.
    pub fn load(&self) -> ConfigTree {
        self.load_with_report().tree
    }

    /// Loads the tree and reports what had to be repaired.
    pub fn load_with_report(&self) -> LoadOutcome {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(key = %self.key, "no stored styles, using defaults");
                return Self::defaults_outcome(LoadSource::Defaults);
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "could not read stored styles, using defaults");
                return Self::defaults_outcome(LoadSource::Recovered);
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored styles are corrupt, using defaults");
                return Self::defaults_outcome(LoadSource::Recovered);
            }
        };

        let (tree, merge) = ConfigTree::merged_over_defaults(&value);
        if merge.is_clean() {
            info!(key = %self.key, "loaded stored styles");
        } else {
            info!(key = %self.key, "loaded stored styles with schema drift");
            if merge.root_mismatch {
                warn!(key = %self.key, "stored styles are not an object, using defaults");
            }
            debug!(
                dropped = ?merge.dropped,
                rejected = ?merge.rejected,
                backfilled = merge.backfilled,
                missing_leaves = merge.missing_leaves,
                "merged stored styles over defaults"
            );
        }

        LoadOutcome {
            tree,
            source: LoadSource::Persisted,
            merge,
        }
    }

    fn defaults_outcome(source: LoadSource) -> LoadOutcome {
        LoadOutcome {
            tree: ConfigTree::defaults(),
            source,
            merge: MergeReport::default(),
        }
    }

    /// Serializes the whole tree and writes it under the store key.
    pub fn save(&mut self, tree: &ConfigTree) -> Result<(), StoreError> {
        let json = serde_json::to_string(tree)?;
        self.backend.write(&self.key, &json)?;
        debug!(key = %self.key, bytes = json.len(), "saved styles");
        Ok(())
    }

    /// Sets one property on the leaf addressed by `axis`, then persists.
    ///
    /// Validation errors leave the tree untouched. A failed write is reported
    /// through [`WriteStatus::Failed`] while the mutation is kept.
    pub fn set_property(
        &mut self,
        tree: &mut ConfigTree,
        axis: &ConfigAxis,
        name: &str,
        value: StyleValue,
    ) -> Result<WriteStatus, DesignerError> {
        tree.profile_mut(axis).set(name, value)?;
        Ok(self.persist(tree))
    }

    /// Restores the leaf addressed by `axis` to defaults, then persists.
    pub fn reset_leaf(&mut self, tree: &mut ConfigTree, axis: &ConfigAxis) -> WriteStatus {
        tree.profile_mut(axis).reset();
        self.persist(tree)
    }

    fn persist(&mut self, tree: &ConfigTree) -> WriteStatus {
        match self.save(tree) {
            Ok(()) => WriteStatus::Durable,
            Err(err) => {
                warn!(key = %self.key, error = %err, "styles not saved; keeping changes in memory");
                WriteStatus::Failed(err)
            }
        }
    }
}
