//! # CineShelf Designer
//!
//! Per-view card styling for the CineShelf collection tracker, compiled to CSS.
//!
//! The designer keeps one [`StyleProfile`] for every combination of
//! [`Scope`] (both tabs, collection only, wishlist only), [`ViewMode`] and,
//! for grids, [`GridDensity`]. The whole [`ConfigTree`] is persisted as one
//! JSON value, upgraded against the current [schema](schema()) on load, and
//! compiled into a single stylesheet where tab-specific rules always win over
//! global ones.
//!
//! ## Quick start
//!
//! ```rust
//! use cineshelf_designer::{
//!     Designer, DesignerConfig, MemoryStore, RecordingPage, Scope, StyleValue, ViewMode,
//! };
//!
//! let mut designer =
//!     Designer::new(DesignerConfig::default(), MemoryStore::new(), RecordingPage::new()).unwrap();
//!
//! designer.set_axis(Scope::Global, ViewMode::List, None).unwrap();
//! designer
//!     .update_property("cardBorderRadius", StyleValue::Number(20.0))
//!     .unwrap();
//!
//! assert!(designer.css().contains("border-radius: 20px !important;"));
//! assert_eq!(designer.export().file_name, "cineshelf-custom-styles.css");
//! ```
//!
//! ## Pieces
//!
//! - [`schema()`]: the property table (kind, unit, range, default, display)
//! - [`ConfigStore`]: load with drift repair, whole-tree saves over a [`KeyValueStore`]
//! - [`AxisSelector`]: which leaf is being edited
//! - [`compile`] / [`compile_sheet`]: the pure tree-to-CSS compiler
//! - [`PreviewRenderer`]: sample cards for the active axis
//! - [`Exporter`]: the stylesheet as a downloadable file
//! - [`Designer`]: ties them together behind a [`Page`]

mod axis;
mod config;
pub mod css;
mod designer;
mod error;
mod export;
mod page;
pub mod preview;
mod profile;
mod schema;
pub mod store;
mod tree;
mod util;

pub use axis::{AxisSelector, ConfigAxis, GridDensity, LeafKey, Scope, ViewMode};
pub use config::DesignerConfig;
pub use css::{compile, compile_sheet, hex_to_rgba, ColorParseError, Rgb, StyleSheet};
pub use designer::Designer;
pub use error::DesignerError;
pub use export::{ExportArtifact, Exporter, CSS_MEDIA_TYPE};
pub use page::{ControlState, ControlSync, Notice, Page, RecordingPage};
pub use preview::{Preview, PreviewRenderer};
pub use profile::{StyleProfile, StyleValue};
pub use schema::{schema, DefaultValue, PropertyKind, PropertySpec, Schema, Unit, ASPECT_RATIOS, FIT_MODES};
pub use store::{
    ConfigStore, FileStore, KeyValueStore, LoadOutcome, LoadSource, MemoryStore, StoreError,
    WriteStatus, DEFAULT_STORAGE_KEY,
};
pub use tree::{ConfigTree, MergeReport, ScopeTree};
pub use util::{format_number, slugify};
