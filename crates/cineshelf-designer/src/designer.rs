//! The designer: one context object owning the tree and everything around it.

use tracing::{debug, trace, warn};

use crate::axis::{AxisSelector, ConfigAxis, GridDensity, Scope, ViewMode};
use crate::config::DesignerConfig;
use crate::css::compile_sheet;
use crate::error::DesignerError;
use crate::export::{ExportArtifact, Exporter};
use crate::page::{ControlState, ControlSync, Notice, Page};
use crate::preview::PreviewRenderer;
use crate::profile::{StyleProfile, StyleValue};
use crate::schema::schema;
use crate::store::{ConfigStore, KeyValueStore, LoadSource, WriteStatus};
use crate::tree::{ConfigTree, MergeReport};

/// Drives edits from the page through the tree, the store and back.
///
/// Every edit runs the same sequence before returning:
///
/// 1. validate and apply the change to the active leaf,
/// 2. persist the whole tree,
/// 3. recompile the whole tree,
/// 4. replace the page's style container,
/// 5. rebuild the preview,
/// 6. push the new value back to its control.
///
/// Mutations take `&mut self`, so edits never interleave.
pub struct Designer<S, P> {
    config: DesignerConfig,
    tree: ConfigTree,
    selector: AxisSelector,
    store: ConfigStore<S>,
    renderer: PreviewRenderer,
    exporter: Exporter,
    page: P,
    css: String,
    load_source: LoadSource,
    load_report: MergeReport,
}

impl<S: KeyValueStore, P: Page> Designer<S, P> {
    /// Loads the stored tree and brings the page up to date.
    ///
    /// # Errors
    ///
    /// Only fails if the preview templates do not compile. Missing or corrupt
    /// stored styles fall back to defaults.
    pub fn new(config: DesignerConfig, backend: S, page: P) -> Result<Self, DesignerError> {
        let store = ConfigStore::with_key(backend, config.storage_key.clone());
        let outcome = store.load_with_report();

        let mut designer = Self {
            selector: AxisSelector::new(config.initial_axis),
            exporter: Exporter::new(config.product_name.clone()),
            renderer: PreviewRenderer::new()?,
            config,
            tree: outcome.tree,
            store,
            page,
            css: String::new(),
            load_source: outcome.source,
            load_report: outcome.merge,
        };

        designer.apply_styles();
        designer.refresh_preview()?;
        designer.sync_inputs();
        designer.show_status();
        Ok(designer)
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    pub fn axis(&self) -> ConfigAxis {
        self.selector.axis()
    }

    pub fn selector(&self) -> &AxisSelector {
        &self.selector
    }

    /// The leaf currently being edited.
    pub fn current_profile(&self) -> &StyleProfile {
        self.selector.current_profile(&self.tree)
    }

    /// The stylesheet last injected into the page.
    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// How the tree was obtained at startup.
    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// What the startup merge had to repair.
    pub fn load_report(&self) -> &MergeReport {
        &self.load_report
    }

    /// Selects another leaf to edit.
    ///
    /// Passing `None` for the density keeps the current column count. The
    /// tree and the stylesheet are untouched; controls, status and preview
    /// follow the new axis.
    pub fn set_axis(
        &mut self,
        scope: Scope,
        view: ViewMode,
        density: Option<GridDensity>,
    ) -> Result<ConfigAxis, DesignerError> {
        let axis = self.selector.set_axis(scope, view, density);
        self.sync_inputs();
        self.show_status();
        self.refresh_preview()?;
        Ok(axis)
    }

    /// Sets one property on the active leaf.
    ///
    /// Invalid values are rejected before anything changes. A failed save is
    /// not an error: the change stays in memory, the page gets a
    /// [`Notice::StylesNotSaved`] and the returned status says so.
    pub fn update_property(
        &mut self,
        name: &str,
        value: StyleValue,
    ) -> Result<WriteStatus, DesignerError> {
        let axis = self.selector.axis();
        let status = self.store.set_property(&mut self.tree, &axis, name, value)?;
        debug!(property = name, axis = %axis.status_label(), "property updated");
        self.after_edit(&status)?;
        self.sync_input(name);
        Ok(status)
    }

    /// Parses raw control input for `name`, then applies it like
    /// [`update_property`](Self::update_property).
    pub fn update_from_input(&mut self, name: &str, raw: &str) -> Result<WriteStatus, DesignerError> {
        let spec = schema()
            .get(name)
            .ok_or_else(|| DesignerError::UnknownProperty(name.to_string()))?;
        let value = spec.parse_input(raw)?;
        self.update_property(spec.name, value)
    }

    /// Restores the active leaf to defaults. Other leaves are untouched.
    pub fn reset_current(&mut self) -> Result<WriteStatus, DesignerError> {
        let axis = self.selector.axis();
        let status = self.store.reset_leaf(&mut self.tree, &axis);
        debug!(axis = %axis.status_label(), "leaf reset to defaults");
        self.after_edit(&status)?;
        self.sync_inputs();
        Ok(status)
    }

    /// Packages the current stylesheet for download.
    pub fn export(&self) -> ExportArtifact {
        self.exporter.export(&self.tree)
    }

    /// A standalone page showing the preview with the current stylesheet.
    pub fn preview_document(&self) -> Result<String, DesignerError> {
        self.renderer.document(
            &self.selector.axis(),
            &self.css,
            &self.config.style_container_id,
            &self.config.preview_container_id,
        )
    }

    /// Recompiles the whole tree and replaces the page's style container.
    pub fn apply_styles(&mut self) {
        let sheet = compile_sheet(&self.tree);
        for diagnostic in &sheet.diagnostics {
            warn!(
                scope = %diagnostic.scope,
                leaf = ?diagnostic.leaf,
                property = diagnostic.property,
                "{}",
                diagnostic.message
            );
        }
        self.css = sheet.to_css();
        self.page
            .replace_styles(&self.config.style_container_id, &self.css);
    }

    /// Pushes every property of the active leaf to its control.
    ///
    /// Properties without a control on the page are skipped.
    pub fn sync_inputs(&mut self) {
        for spec in schema().iter() {
            self.sync_input(spec.name);
        }
    }

    fn sync_input(&mut self, name: &str) {
        let Some(spec) = schema().get(name) else {
            return;
        };
        let profile = self.selector.current_profile(&self.tree);
        let Some(value) = profile.get(spec.name) else {
            return;
        };
        let control = ControlState {
            property: spec.name,
            value: value.to_string(),
            display: spec.display(value),
            kind: spec.kind,
        };
        if self.page.sync_control(&control) == ControlSync::Missing {
            trace!(property = spec.name, "no control on page");
        }
    }

    fn after_edit(&mut self, status: &WriteStatus) -> Result<(), DesignerError> {
        if let WriteStatus::Failed(err) = status {
            self.page.notify(&Notice::StylesNotSaved {
                reason: err.to_string(),
            });
        }
        self.apply_styles();
        self.refresh_preview()
    }

    fn refresh_preview(&mut self) -> Result<(), DesignerError> {
        let preview = self.renderer.render(&self.selector.axis())?;
        self.page
            .replace_preview(&self.config.preview_container_id, &preview);
        Ok(())
    }

    fn show_status(&mut self) {
        let label = self.selector.status_label();
        let density_visible = self.selector.shows_density_control();
        self.page.show_status(&label, density_visible);
    }
}

impl<S, P> std::fmt::Debug for Designer<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Designer")
            .field("axis", &self.selector.axis())
            .field("load_source", &self.load_source)
            .finish_non_exhaustive()
    }
}
