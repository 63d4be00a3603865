//! Preview markup for the active axis.

use minijinja::{context, Environment};
use serde::Serialize;

use super::samples::{SampleMovie, SAMPLE_MOVIES};
use crate::axis::{ConfigAxis, Scope, ViewMode};
use crate::error::DesignerError;

/// Inline image shown when a poster fails to load.
const POSTER_PLACEHOLDER: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%22200%22 height=%22300%22%3E%3Crect width=%22200%22 height=%22300%22 fill=%22%23333%22/%3E%3Ctext x=%2250%25%22 y=%2250%25%22 fill=%22white%22 text-anchor=%22middle%22 dy=%22.3em%22%3ENo Image%3C/text%3E%3C/svg%3E";

// List and detail cards put year, format and rating on one line; grid and
// compact tiles break after the format.
const PREVIEW_TEMPLATE: &str = r#"{% for movie in movies -%}
<div class="{{ card_class }}">
  <img src="{{ movie.poster }}" alt="{{ movie.title }}" class="movie-poster" onerror="this.src='{{ placeholder | safe }}'">
{%- if row_layout %}
  <div class="movie-content">
    <div class="movie-title">{{ movie.title }}</div>
    <div class="movie-info">
      <span class="movie-card-year">{{ movie.year }}</span> ·
      <span class="movie-card-format">{{ movie.format }}</span> ·
      <span class="movie-card-rating">⭐ {{ movie.rating }}</span>
      <br>
{%- else %}
  <div class="movie-card-content">
    <div class="movie-title">{{ movie.title }}</div>
    <div class="movie-info">
      <span class="movie-card-year">{{ movie.year }}</span> ·
      <span class="movie-card-format">{{ movie.format }}</span><br>
      <span class="movie-card-rating">⭐ {{ movie.rating }}</span>
{%- endif %}
      <span class="movie-card-runtime">{{ movie.runtime }}</span>
      <span class="movie-card-director">{{ movie.director }}</span>
      <span class="movie-card-genre">{{ movie.genre }}</span>
    </div>
  </div>
</div>
{% endfor %}"#;

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style id="{{ style_id }}">
{{ css | safe }}</style>
</head>
<body>
<p class="css-current-config-display">{{ status }}</p>
{%- if tab_root %}
<div id="{{ tab_root }}">
{%- endif %}
<div id="{{ preview_id }}" class="{{ container_class }}">
{{ cards | safe }}</div>
{%- if tab_root %}
</div>
{%- endif %}
</body>
</html>
"#;

/// Rendered preview cards plus where the preview container must sit.
///
/// Tab-specific rules are prefixed with the tab root's id, so a preview of a
/// tab-specific leaf only shows its styles when the container is placed
/// inside an element with `tab_root` as id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub scope: Scope,
    pub tab_root: Option<&'static str>,
    pub container_class: String,
    pub markup: String,
}

/// Builds the sample cards for a given axis.
///
/// Rendering is a full rebuild: nothing is cached between calls, so the
/// output only depends on the axis.
pub struct PreviewRenderer {
    env: Environment<'static>,
}

impl std::fmt::Debug for PreviewRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRenderer").finish_non_exhaustive()
    }
}

impl PreviewRenderer {
    /// Compiles the preview templates.
    ///
    /// # Errors
    ///
    /// Returns [`DesignerError::Template`] if a template fails to compile.
    pub fn new() -> Result<Self, DesignerError> {
        let mut env = Environment::new();
        env.add_template("preview.html", PREVIEW_TEMPLATE)?;
        env.add_template("document.html", DOCUMENT_TEMPLATE)?;
        Ok(Self { env })
    }

    /// The sample movies every preview shows.
    pub fn samples(&self) -> &'static [SampleMovie] {
        &SAMPLE_MOVIES
    }

    /// Renders the sample cards for `axis`.
    pub fn render(&self, axis: &ConfigAxis) -> Result<Preview, DesignerError> {
        let tmpl = self.env.get_template("preview.html")?;
        let markup = tmpl.render(context! {
            movies => &SAMPLE_MOVIES[..],
            placeholder => POSTER_PLACEHOLDER,
            card_class => card_class(axis.view),
            row_layout => matches!(axis.view, ViewMode::List | ViewMode::Detail),
        })?;
        Ok(Preview {
            scope: axis.scope,
            tab_root: axis.scope.root_id(),
            container_class: container_class(axis),
            markup,
        })
    }

    /// Renders a standalone page carrying `css` in the style container and
    /// the preview for `axis` in the preview container.
    pub fn document(
        &self,
        axis: &ConfigAxis,
        css: &str,
        style_id: &str,
        preview_id: &str,
    ) -> Result<String, DesignerError> {
        let preview = self.render(axis)?;
        let tmpl = self.env.get_template("document.html")?;
        Ok(tmpl.render(context! {
            title => "CineShelf Designer Preview",
            style_id => style_id,
            preview_id => preview_id,
            css => css,
            status => format!("Editing: {}", axis.status_label()),
            tab_root => preview.tab_root,
            container_class => preview.container_class,
            cards => preview.markup,
        })?)
    }
}

/// Class list of the preview container, e.g. `movie-grid grid-view grid-cols-4`.
pub fn container_class(axis: &ConfigAxis) -> String {
    match axis.view {
        ViewMode::Grid => format!("movie-grid grid-view grid-cols-{}", axis.density),
        view => format!("movie-grid {}-view", view.key()),
    }
}

/// Class list of one preview card.
pub fn card_class(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Grid => "movie-card",
        ViewMode::List => "movie-card list-item",
        ViewMode::Detail => "movie-card detail-item",
        ViewMode::Compact => "movie-card small-item",
    }
}
