//! Command-line host for the CineShelf designer.
//!
//! Stands in for the hosting page: the tree is stored as JSON files in a
//! directory, and each invocation loads it, optionally applies one edit and
//! prints the result.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use cineshelf_designer::{
    schema, Designer, DesignerConfig, FileStore, GridDensity, Notice, Page, Preview, PropertyKind,
    Scope, ViewMode, WriteStatus,
};
use clap::{Args, Parser, Subcommand};
use console::style;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Parser)]
#[command(name = "cineshelf-designer", version, about = "Edit and compile CineShelf card styles")]
pub struct Cli {
    /// Directory holding the stored styles [default: <config dir>/cineshelf]
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// JSON designer configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub axis: AxisArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Selects the leaf to work on. Unset parts keep the configured axis.
#[derive(Debug, Clone, Default, Args)]
pub struct AxisArgs {
    /// both, collection or wishlist
    #[arg(long, global = true)]
    pub scope: Option<Scope>,

    /// grid, list, detail or small
    #[arg(long, global = true)]
    pub view: Option<ViewMode>,

    /// Grid columns (2-8); implies --view grid when no view is given
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(2..=8))]
    pub cols: Option<u8>,
}

impl AxisArgs {
    fn is_set(&self) -> bool {
        self.scope.is_some() || self.view.is_some() || self.cols.is_some()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every property of the selected leaf
    Show,
    /// Set one property of the selected leaf
    Set {
        property: String,
        /// Value as typed into the control (`20`, `20px`, `off`, `#112233`)
        value: String,
    },
    /// Reset the selected leaf to defaults
    Reset,
    /// Print the compiled stylesheet
    Compile {
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write the stylesheet as a downloadable file
    Export {
        #[arg(long, default_value = ".", value_name = "DIR")]
        dir: PathBuf,
    },
    /// Write a standalone HTML preview of the selected leaf
    Preview {
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Show which leaf is selected and where styles are stored
    Status,
}

/// The terminal as the designer's page. Notices go to stderr.
#[derive(Debug, Default)]
pub struct TerminalPage {
    status: Option<(String, bool)>,
    notices: Vec<Notice>,
}

impl TerminalPage {
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl Page for TerminalPage {
    fn replace_styles(&mut self, container_id: &str, css: &str) {
        debug!(container = container_id, bytes = css.len(), "styles replaced");
    }

    fn replace_preview(&mut self, container_id: &str, preview: &Preview) {
        debug!(
            container = container_id,
            tab_root = preview.tab_root.unwrap_or("-"),
            class = %preview.container_class,
            "preview rebuilt"
        );
    }

    fn show_status(&mut self, label: &str, density_visible: bool) {
        self.status = Some((label.to_string(), density_visible));
    }

    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::StylesNotSaved { reason } => {
                eprintln!("{} styles not saved: {}", style("warning:").yellow().bold(), reason);
            }
        }
        self.notices.push(notice.clone());
    }
}

/// Resolves the store directory: `--store`, else `<config dir>/cineshelf`.
pub fn store_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir.to_path_buf()),
        None => dirs::config_dir()
            .map(|dir| dir.join("cineshelf"))
            .ok_or_else(|| anyhow!("no config directory on this platform; pass --store")),
    }
}

fn load_config(path: Option<&Path>) -> Result<DesignerConfig> {
    let Some(path) = path else {
        return Ok(DesignerConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    DesignerConfig::from_json_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}

/// Runs one command and returns what should be printed to stdout.
pub fn run(cli: Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref())?;
    let dir = store_dir(cli.store.as_deref())?;
    let mut designer = Designer::new(config, FileStore::new(&dir), TerminalPage::default())?;

    if cli.axis.is_set() {
        let current = designer.axis();
        let view = match (cli.axis.view, cli.axis.cols) {
            (Some(view), _) => view,
            (None, Some(_)) => ViewMode::Grid,
            (None, None) => current.view,
        };
        let density = cli.axis.cols.map(GridDensity::new).transpose()?;
        designer.set_axis(cli.axis.scope.unwrap_or(current.scope), view, density)?;
    }

    match cli.command {
        Command::Show => Ok(render_profile(&designer)),
        Command::Set { property, value } => {
            let status = designer.update_from_input(&property, &value)?;
            let spec = schema()
                .get(&property)
                .ok_or_else(|| anyhow!("unknown style property `{}`", property))?;
            let shown = designer
                .current_profile()
                .get(spec.name)
                .map(|v| spec.display(v))
                .unwrap_or_default();
            Ok(format!(
                "{} {} = {}{}\n",
                style_status(&designer),
                spec.name,
                shown,
                saved_suffix(&status)
            ))
        }
        Command::Reset => {
            let status = designer.reset_current()?;
            Ok(format!(
                "{} reset to defaults{}\n",
                style_status(&designer),
                saved_suffix(&status)
            ))
        }
        Command::Compile { output } => match output {
            Some(path) => {
                fs::write(&path, designer.css())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                Ok(format!("wrote {}\n", path.display()))
            }
            None => Ok(designer.css().to_string()),
        },
        Command::Export { dir } => {
            let artifact = designer.export();
            let path = artifact
                .write_to(&dir)
                .with_context(|| format!("failed to export into {}", dir.display()))?;
            Ok(format!("wrote {} ({})\n", path.display(), artifact.media_type))
        }
        Command::Preview { output } => {
            let document = designer.preview_document()?;
            match output {
                Some(path) => {
                    fs::write(&path, document)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    Ok(format!("wrote {}\n", path.display()))
                }
                None => Ok(document),
            }
        }
        Command::Status => {
            let (label, density_visible) = designer
                .page()
                .status
                .clone()
                .unwrap_or_else(|| (designer.selector().status_label(), true));
            let mut out = format!("{}\n", label);
            if density_visible {
                out.push_str(&format!("grid columns: {}\n", designer.axis().density));
            }
            out.push_str(&format!(
                "store: {}\n",
                designer.store().backend().path_for(designer.store().key()).display()
            ));
            out.push_str(&format!("loaded from: {:?}\n", designer.load_source()));
            Ok(out)
        }
    }
}

fn style_status<P: Page>(designer: &Designer<FileStore, P>) -> String {
    style(designer.selector().status_label()).dim().to_string()
}

fn saved_suffix(status: &WriteStatus) -> &'static str {
    if status.is_durable() {
        ""
    } else {
        " (not saved)"
    }
}

fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

fn describe_kind(kind: PropertyKind) -> String {
    match kind {
        PropertyKind::Number { min, max, .. } => format!("{}..{}", min, max),
        PropertyKind::Choice(choices) => choices.join(" | "),
        PropertyKind::Flag => "yes | no".to_string(),
        PropertyKind::Color => "#rrggbb".to_string(),
    }
}

/// Formats the active leaf as an aligned table, marking changed values.
pub fn render_profile<P: Page>(designer: &Designer<FileStore, P>) -> String {
    let profile = designer.current_profile();
    let rows: Vec<_> = schema()
        .iter()
        .filter_map(|spec| {
            let value = profile.get(spec.name)?;
            let changed = *value != spec.default_value();
            Some((spec, spec.display(value), changed))
        })
        .collect();

    let name_width = rows.iter().map(|(s, _, _)| s.name.width()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v, _)| v.width()).max().unwrap_or(0);

    let mut out = format!("{}\n\n", style(designer.selector().status_label()).bold());
    for (spec, display, changed) in rows {
        let value = pad(&display, value_width);
        let value = if changed {
            style(value).yellow().bold().to_string()
        } else {
            value
        };
        out.push_str(&format!(
            "  {}  {}  {}\n",
            style(pad(spec.name, name_width)).cyan(),
            value,
            style(format!("{} ({})", spec.label, describe_kind(spec.kind))).dim()
        ));
    }
    out
}
