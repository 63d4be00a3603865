//! Configuration axes and the selector tracking which leaf is being edited.
//!
//! A leaf of the [`ConfigTree`](crate::ConfigTree) is addressed by a
//! [`ConfigAxis`]: a [`Scope`], a [`ViewMode`] and, for grids only, a
//! [`GridDensity`]. [`LeafKey`] is the normalized form with the density
//! folded into the view mode.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DesignerError;
use crate::profile::StyleProfile;
use crate::tree::ConfigTree;

/// Which collection view a profile applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    /// Applies to both tabs.
    #[serde(rename = "both")]
    Global,
    /// Applies to the movie collection tab only.
    #[serde(rename = "collection")]
    CollectionOnly,
    /// Applies to the wishlist tab only.
    #[serde(rename = "wishlist")]
    WishlistOnly,
}

impl Scope {
    /// All scopes, in stylesheet emission order.
    pub const ALL: [Scope; 3] = [Scope::Global, Scope::CollectionOnly, Scope::WishlistOnly];

    /// Key used in the persisted tree.
    pub fn key(self) -> &'static str {
        match self {
            Scope::Global => "both",
            Scope::CollectionOnly => "collection",
            Scope::WishlistOnly => "wishlist",
        }
    }

    /// Label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Scope::Global => "Global (Both)",
            Scope::CollectionOnly => "Movies",
            Scope::WishlistOnly => "Wishlist",
        }
    }

    /// Element id of the tab root, or `None` for the global scope.
    pub fn root_id(self) -> Option<&'static str> {
        match self {
            Scope::Global => None,
            Scope::CollectionOnly => Some("collection"),
            Scope::WishlistOnly => Some("wishlist"),
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Scope {
    type Err = DesignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" | "global" => Ok(Scope::Global),
            "collection" | "movies" => Ok(Scope::CollectionOnly),
            "wishlist" => Ok(Scope::WishlistOnly),
            _ => Err(DesignerError::UnknownScope(s.to_string())),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The layout family a profile targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    List,
    Detail,
    /// Persisted and rendered as `small`.
    #[serde(rename = "small")]
    Compact,
}

impl ViewMode {
    /// All view modes, in stylesheet emission order.
    pub const ALL: [ViewMode; 4] = [ViewMode::Grid, ViewMode::List, ViewMode::Detail, ViewMode::Compact];

    /// Key used in the persisted tree and in `*-view` class names.
    pub fn key(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
            ViewMode::Detail => "detail",
            ViewMode::Compact => "small",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Grid => "Grid",
            ViewMode::List => "List",
            ViewMode::Detail => "Detail",
            ViewMode::Compact => "Small",
        }
    }
}

impl FromStr for ViewMode {
    type Err = DesignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            "detail" => Ok(ViewMode::Detail),
            "small" | "compact" => Ok(ViewMode::Compact),
            _ => Err(DesignerError::UnknownViewMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Number of grid columns, always within 2..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GridDensity(u8);

impl GridDensity {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 8;

    pub fn new(columns: u8) -> Result<Self, DesignerError> {
        if (Self::MIN..=Self::MAX).contains(&columns) {
            Ok(Self(columns))
        } else {
            Err(DesignerError::InvalidDensity(columns))
        }
    }

    /// Every density in ascending order.
    pub fn all() -> impl Iterator<Item = GridDensity> {
        (Self::MIN..=Self::MAX).map(GridDensity)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }
}

impl Default for GridDensity {
    fn default() -> Self {
        Self(4)
    }
}

impl TryFrom<u8> for GridDensity {
    type Error = DesignerError;

    fn try_from(columns: u8) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<GridDensity> for u8 {
    fn from(density: GridDensity) -> u8 {
        density.0
    }
}

impl std::fmt::Display for GridDensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized leaf address within one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKey {
    Grid(GridDensity),
    List,
    Detail,
    Compact,
}

impl LeafKey {
    /// Every leaf of a scope in emission order: grid densities ascending,
    /// then list, detail and compact.
    pub fn all() -> impl Iterator<Item = LeafKey> {
        GridDensity::all()
            .map(LeafKey::Grid)
            .chain([LeafKey::List, LeafKey::Detail, LeafKey::Compact])
    }

    pub fn view(self) -> ViewMode {
        match self {
            LeafKey::Grid(_) => ViewMode::Grid,
            LeafKey::List => ViewMode::List,
            LeafKey::Detail => ViewMode::Detail,
            LeafKey::Compact => ViewMode::Compact,
        }
    }

    pub fn density(self) -> Option<GridDensity> {
        match self {
            LeafKey::Grid(density) => Some(density),
            _ => None,
        }
    }
}

/// The `(scope, view mode, grid density)` triple naming one profile.
///
/// The density is carried for every view mode so switching back to the grid
/// restores the previously chosen column count, but it only takes part in
/// addressing when the view mode is [`ViewMode::Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigAxis {
    pub scope: Scope,
    pub view: ViewMode,
    pub density: GridDensity,
}

impl ConfigAxis {
    pub fn new(scope: Scope, view: ViewMode, density: GridDensity) -> Self {
        Self {
            scope,
            view,
            density,
        }
    }

    /// Axis for a grid leaf.
    pub fn grid(scope: Scope, density: GridDensity) -> Self {
        Self::new(scope, ViewMode::Grid, density)
    }

    /// Axis for a non-grid leaf; the density keeps its default.
    pub fn view(scope: Scope, view: ViewMode) -> Self {
        Self::new(scope, view, GridDensity::default())
    }

    /// Resolves the leaf this axis addresses.
    pub fn leaf(&self) -> LeafKey {
        match self.view {
            ViewMode::Grid => LeafKey::Grid(self.density),
            ViewMode::List => LeafKey::List,
            ViewMode::Detail => LeafKey::Detail,
            ViewMode::Compact => LeafKey::Compact,
        }
    }

    /// Status text naming the leaf, e.g. `Movies → Grid → 4 Columns`.
    pub fn status_label(&self) -> String {
        match self.view {
            ViewMode::Grid => format!(
                "{} → {} → {} Columns",
                self.scope.label(),
                self.view.label(),
                self.density
            ),
            _ => format!("{} → {} View", self.scope.label(), self.view.label()),
        }
    }
}

impl Default for ConfigAxis {
    fn default() -> Self {
        Self::grid(Scope::Global, GridDensity::default())
    }
}

/// Tracks the axis currently being edited and previewed.
///
/// Changing the axis is a pure state change: the tree is total, so every
/// axis already has a leaf and nothing is created or reset.
#[derive(Debug, Clone, Default)]
pub struct AxisSelector {
    axis: ConfigAxis,
}

impl AxisSelector {
    pub fn new(axis: ConfigAxis) -> Self {
        Self { axis }
    }

    pub fn axis(&self) -> ConfigAxis {
        self.axis
    }

    /// Selects a new axis.
    ///
    /// Passing `None` for the density keeps the current column count.
    pub fn set_axis(&mut self, scope: Scope, view: ViewMode, density: Option<GridDensity>) -> ConfigAxis {
        self.axis = ConfigAxis::new(scope, view, density.unwrap_or(self.axis.density));
        debug!(axis = %self.axis.status_label(), "axis changed");
        self.axis
    }

    /// Borrows the leaf addressed by the current axis.
    pub fn current_profile<'t>(&self, tree: &'t ConfigTree) -> &'t StyleProfile {
        tree.profile(&self.axis)
    }

    /// Mutably borrows the leaf addressed by the current axis.
    pub fn current_profile_mut<'t>(&self, tree: &'t mut ConfigTree) -> &'t mut StyleProfile {
        tree.profile_mut(&self.axis)
    }

    /// Status line for the editing panel.
    pub fn status_label(&self) -> String {
        format!("Editing: {}", self.axis.status_label())
    }

    /// The density control only applies to grids.
    pub fn shows_density_control(&self) -> bool {
        self.axis.view == ViewMode::Grid
    }
}
