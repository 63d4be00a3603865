//! The configuration tree: one profile for every axis combination.
//!
//! The persisted form nests `scope → view → (density →) profile`:
//!
//! ```json
//! {
//!   "both":       { "grid": { "2": {..}, .., "8": {..} }, "list": {..}, "detail": {..}, "small": {..} },
//!   "collection": { .. },
//!   "wishlist":   { .. }
//! }
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::axis::{ConfigAxis, GridDensity, LeafKey, Scope, ViewMode};
use crate::profile::StyleProfile;

/// What a merge of persisted data over the defaults had to repair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Unknown keys that were discarded, as dotted paths.
    pub dropped: Vec<String>,
    /// Values whose JSON type did not fit the schema, replaced by defaults.
    pub rejected: Vec<String>,
    /// Properties filled from defaults inside leaves that were present.
    pub backfilled: usize,
    /// Leaves that were absent from the persisted data.
    pub missing_leaves: usize,
    /// The persisted root was not a JSON object.
    pub root_mismatch: bool,
}

impl MergeReport {
    /// Returns `true` when the persisted data matched the schema exactly.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
            && self.rejected.is_empty()
            && self.backfilled == 0
            && self.missing_leaves == 0
            && !self.root_mismatch
    }
}

/// The profiles of one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeTree {
    grid: [StyleProfile; 7],
    list: StyleProfile,
    detail: StyleProfile,
    compact: StyleProfile,
}

impl ScopeTree {
    fn defaults() -> Self {
        Self {
            grid: std::array::from_fn(|_| StyleProfile::defaults()),
            list: StyleProfile::defaults(),
            detail: StyleProfile::defaults(),
            compact: StyleProfile::defaults(),
        }
    }

    pub fn leaf(&self, key: LeafKey) -> &StyleProfile {
        match key {
            LeafKey::Grid(density) => &self.grid[density.index()],
            LeafKey::List => &self.list,
            LeafKey::Detail => &self.detail,
            LeafKey::Compact => &self.compact,
        }
    }

    pub fn leaf_mut(&mut self, key: LeafKey) -> &mut StyleProfile {
        match key {
            LeafKey::Grid(density) => &mut self.grid[density.index()],
            LeafKey::List => &mut self.list,
            LeafKey::Detail => &mut self.detail,
            LeafKey::Compact => &mut self.compact,
        }
    }

    fn merged(persisted: Option<&Map<String, Value>>, scope: Scope, report: &mut MergeReport) -> Self {
        let mut tree = Self::defaults();

        for key in LeafKey::all() {
            let path = leaf_path(scope, key);
            let leaf = persisted.and_then(|scope_map| persisted_leaf(scope_map, key));
            match leaf {
                Some(Value::Object(props)) => {
                    *tree.leaf_mut(key) = StyleProfile::merged(props, &path, report);
                }
                Some(_) => report.rejected.push(path),
                None => report.missing_leaves += 1,
            }
        }

        if let Some(scope_map) = persisted {
            for (key, value) in scope_map {
                let known = ViewMode::ALL.iter().any(|view| view.key() == key);
                if !known {
                    report.dropped.push(format!("{}.{}", scope.key(), key));
                } else if key == ViewMode::Grid.key() {
                    if let Value::Object(grid) = value {
                        for density_key in grid.keys() {
                            let valid = density_key
                                .parse::<u8>()
                                .ok()
                                .and_then(|n| GridDensity::new(n).ok())
                                .is_some();
                            if !valid {
                                report
                                    .dropped
                                    .push(format!("{}.grid.{}", scope.key(), density_key));
                            }
                        }
                    }
                }
            }
        }

        tree
    }
}

fn persisted_leaf(scope_map: &Map<String, Value>, key: LeafKey) -> Option<&Value> {
    match key {
        LeafKey::Grid(density) => scope_map
            .get(ViewMode::Grid.key())
            .and_then(Value::as_object)
            .and_then(|grid| grid.get(&density.to_string())),
        other => scope_map.get(other.view().key()),
    }
}

fn leaf_path(scope: Scope, key: LeafKey) -> String {
    match key {
        LeafKey::Grid(density) => format!("{}.grid.{}", scope.key(), density),
        other => format!("{}.{}", scope.key(), other.view().key()),
    }
}

/// Every style profile, indexed by scope, view mode and grid density.
///
/// The tree is total: each of the 3 × (7 + 3) leaves exists from
/// construction on, so addressing never fails and never allocates.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    scopes: [ScopeTree; 3],
}

impl ConfigTree {
    /// Builds the tree with every leaf at its defaults.
    pub fn defaults() -> Self {
        Self {
            scopes: std::array::from_fn(|_| ScopeTree::defaults()),
        }
    }

    /// Layers persisted JSON over the all-defaults tree, leaf by leaf.
    pub fn merged_over_defaults(persisted: &Value) -> (Self, MergeReport) {
        let mut report = MergeReport::default();
        let root = match persisted {
            Value::Object(root) => Some(root),
            _ => {
                report.root_mismatch = true;
                None
            }
        };

        let scopes = Scope::ALL.map(|scope| {
            let scope_map = root
                .and_then(|root| root.get(scope.key()))
                .and_then(Value::as_object);
            ScopeTree::merged(scope_map, scope, &mut report)
        });

        if let Some(root) = root {
            for key in root.keys() {
                if !Scope::ALL.iter().any(|scope| scope.key() == key) {
                    report.dropped.push(key.clone());
                }
            }
        }

        (Self { scopes }, report)
    }

    pub fn scope(&self, scope: Scope) -> &ScopeTree {
        &self.scopes[scope.index()]
    }

    /// Borrows the leaf addressed by `axis`.
    pub fn profile(&self, axis: &ConfigAxis) -> &StyleProfile {
        self.leaf(axis.scope, axis.leaf())
    }

    /// Mutably borrows the leaf addressed by `axis`.
    pub fn profile_mut(&mut self, axis: &ConfigAxis) -> &mut StyleProfile {
        self.scopes[axis.scope.index()].leaf_mut(axis.leaf())
    }

    pub fn leaf(&self, scope: Scope, key: LeafKey) -> &StyleProfile {
        self.scope(scope).leaf(key)
    }

    /// Iterates every leaf in stylesheet emission order.
    pub fn leaves(&self) -> impl Iterator<Item = (Scope, LeafKey, &StyleProfile)> {
        Scope::ALL
            .into_iter()
            .flat_map(|scope| LeafKey::all().map(move |key| (scope, key)))
            .map(move |(scope, key)| (scope, key, self.leaf(scope, key)))
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::defaults()
    }
}

struct GridLeaves<'a>(&'a [StyleProfile; 7]);

impl Serialize for GridLeaves<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for density in GridDensity::all() {
            map.serialize_entry(&density.to_string(), &self.0[density.index()])?;
        }
        map.end()
    }
}

impl Serialize for ScopeTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(ViewMode::Grid.key(), &GridLeaves(&self.grid))?;
        map.serialize_entry(ViewMode::List.key(), &self.list)?;
        map.serialize_entry(ViewMode::Detail.key(), &self.detail)?;
        map.serialize_entry(ViewMode::Compact.key(), &self.compact)?;
        map.end()
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Scope::ALL.len()))?;
        for scope in Scope::ALL {
            map.serialize_entry(scope.key(), self.scope(scope))?;
        }
        map.end()
    }
}
