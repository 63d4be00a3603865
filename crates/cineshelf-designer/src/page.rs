//! The surface of the hosting page the designer drives.

use std::collections::HashSet;

use crate::preview::Preview;
use crate::schema::PropertyKind;

/// What an input control should show for one property.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub property: &'static str,
    /// Raw value for the control (`16`, `#ffffff`, `true`).
    pub value: String,
    /// Formatted label shown next to the control (`16px`, `Yes`).
    pub display: String,
    pub kind: PropertyKind,
}

/// Whether the page had a control for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSync {
    Updated,
    Missing,
}

/// Non-blocking messages for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A change was applied but could not be saved.
    StylesNotSaved { reason: String },
}

/// Operations the designer performs on the hosting page.
///
/// None of these may fail: a page that lacks an element simply ignores the
/// request.
pub trait Page {
    /// Replaces the contents of the style container with `css`, creating the
    /// container if needed. There is only ever one such container.
    fn replace_styles(&mut self, container_id: &str, css: &str);

    /// Replaces the preview container's class and children.
    ///
    /// When `preview.tab_root` is set the container must sit inside an
    /// element with that id, or tab-specific rules will not reach it.
    fn replace_preview(&mut self, container_id: &str, preview: &Preview);

    /// Pushes a value into the control for one property.
    fn sync_control(&mut self, _control: &ControlState) -> ControlSync {
        ControlSync::Missing
    }

    /// Updates the "Editing: ..." line and the density control's visibility.
    fn show_status(&mut self, _label: &str, _density_visible: bool) {}

    fn notify(&mut self, _notice: &Notice) {}
}

/// A page that records everything the designer does to it.
///
/// Used by tests and by hosts that render the page state themselves.
#[derive(Debug, Clone, Default)]
pub struct RecordingPage {
    controls: Option<HashSet<&'static str>>,
    /// `(container id, css)` of the single style container.
    pub styles: Option<(String, String)>,
    /// Number of times the style container was replaced.
    pub style_writes: usize,
    pub preview: Option<(String, Preview)>,
    pub preview_renders: usize,
    pub synced: Vec<ControlState>,
    pub skipped: Vec<&'static str>,
    pub status: Option<(String, bool)>,
    pub notices: Vec<Notice>,
}

impl RecordingPage {
    /// A page with a control for every property.
    pub fn new() -> Self {
        Self::default()
    }

    /// A page that only has controls for `properties`.
    pub fn with_controls(properties: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            controls: Some(properties.into_iter().collect()),
            ..Self::default()
        }
    }

    /// The css currently in the style container.
    pub fn css(&self) -> Option<&str> {
        self.styles.as_ref().map(|(_, css)| css.as_str())
    }

    /// The synced state of one control, latest first.
    pub fn control(&self, property: &str) -> Option<&ControlState> {
        self.synced.iter().rev().find(|c| c.property == property)
    }
}

impl Page for RecordingPage {
    fn replace_styles(&mut self, container_id: &str, css: &str) {
        self.styles = Some((container_id.to_string(), css.to_string()));
        self.style_writes += 1;
    }

    fn replace_preview(&mut self, container_id: &str, preview: &Preview) {
        self.preview = Some((container_id.to_string(), preview.clone()));
        self.preview_renders += 1;
    }

    fn sync_control(&mut self, control: &ControlState) -> ControlSync {
        let present = self
            .controls
            .as_ref()
            .map_or(true, |controls| controls.contains(control.property));
        if present {
            self.synced.push(control.clone());
            ControlSync::Updated
        } else {
            self.skipped.push(control.property);
            ControlSync::Missing
        }
    }

    fn show_status(&mut self, label: &str, density_visible: bool) {
        self.status = Some((label.to_string(), density_visible));
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
