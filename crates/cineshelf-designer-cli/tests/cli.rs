//! Tests for the command-line host, run against a temporary store directory.

use std::fs;
use std::path::Path;

use cineshelf_designer_cli::{run, Cli};
use clap::Parser;

fn run_in(store: &Path, args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["cineshelf-designer", "--store", store.to_str().unwrap()];
    argv.extend_from_slice(args);
    run(Cli::try_parse_from(argv)?)
}

#[test]
fn test_set_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_in(dir.path(), &["--view", "list", "set", "cardBorderRadius", "20px"]).unwrap();
    assert!(out.contains("cardBorderRadius = 20px"));
    assert!(!out.contains("not saved"));

    let shown = run_in(dir.path(), &["--view", "list", "show"]).unwrap();
    assert!(radius_line(&shown).contains("20px"));

    // The grid leaf was not touched.
    let grid = run_in(dir.path(), &["show"]).unwrap();
    assert!(radius_line(&grid).contains("16px"));
}

fn radius_line(table: &str) -> &str {
    table
        .lines()
        .find(|line| line.contains("cardBorderRadius"))
        .unwrap()
}

#[test]
fn test_compile_reflects_stored_edits() {
    let dir = tempfile::tempdir().unwrap();
    run_in(dir.path(), &["--scope", "wishlist", "--cols", "6", "set", "showGenre", "off"]).unwrap();

    let css = run_in(dir.path(), &["compile"]).unwrap();
    assert!(css.starts_with("/* CineShelf Custom Styles - Generated by Designer */"));
    assert!(css.contains(
        "#wishlist .movie-grid.grid-view.grid-cols-6 .movie-card .movie-card-genre {\n    \
         font-size: 12px !important;\n    display: none !important;\n}"
    ));
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    assert!(run_in(dir.path(), &["set", "cardBorderRadius", "400"]).is_err());
    assert!(run_in(dir.path(), &["set", "cardBorderColor", "#12345"]).is_err());
    assert!(run_in(dir.path(), &["set", "noSuchProperty", "1"]).is_err());
    assert!(Cli::try_parse_from(["cineshelf-designer", "--cols", "9", "show"]).is_err());
    assert!(Cli::try_parse_from(["cineshelf-designer", "--scope", "everywhere", "show"]).is_err());
}

#[test]
fn test_corrupt_store_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cineshelf_ultimate_styles.json"), "{not json").unwrap();
    let status = run_in(dir.path(), &["status"]).unwrap();
    assert!(status.contains("Recovered"));
    let css = run_in(dir.path(), &["compile"]).unwrap();
    assert!(css.contains("border-radius: 16px !important;"));
}

#[test]
fn test_unreadable_store_reports_recovered() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cineshelf_ultimate_styles.json"), [0xff, 0xfe, 0x7b]).unwrap();
    let status = run_in(dir.path(), &["status"]).unwrap();
    assert!(status.contains("Recovered"));
}

#[test]
fn test_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_in(dir.path(), &["--view", "detail", "set", "detailGap", "10"]).unwrap();
    run_in(dir.path(), &["--view", "detail", "reset"]).unwrap();
    let css = run_in(dir.path(), &["compile"]).unwrap();
    assert!(!css.contains("gap: 10px"));
}

#[test]
fn test_export_and_preview_write_files() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let out = run_in(dir.path(), &["export", "--dir", out_dir.to_str().unwrap()]).unwrap();
    assert!(out.contains("text/css"));
    let exported = fs::read_to_string(out_dir.join("cineshelf-custom-styles.css")).unwrap();
    assert_eq!(exported, run_in(dir.path(), &["compile"]).unwrap());

    let page = dir.path().join("preview.html");
    run_in(
        dir.path(),
        &["--view", "small", "preview", "--output", page.to_str().unwrap()],
    )
    .unwrap();
    let html = fs::read_to_string(page).unwrap();
    assert!(html.contains("movie-grid small-view"));
    assert!(html.contains("<style id=\"cineshelf-custom-styles\">"));
}

#[test]
fn test_status_hides_columns_outside_grid() {
    let dir = tempfile::tempdir().unwrap();
    let grid = run_in(dir.path(), &["--cols", "3", "status"]).unwrap();
    assert!(grid.starts_with("Editing: Global (Both) → Grid → 3 Columns"));
    assert!(grid.contains("grid columns: 3"));

    let list = run_in(dir.path(), &["--scope", "collection", "--view", "list", "status"]).unwrap();
    assert!(list.starts_with("Editing: Movies → List View"));
    assert!(!list.contains("grid columns"));
}

#[test]
fn test_config_file_sets_initial_axis() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("designer.json");
    fs::write(
        &config,
        r#"{ "initialAxis": { "scope": "wishlist", "view": "detail", "density": 5 } }"#,
    )
    .unwrap();
    let out = run_in(dir.path(), &["--config", config.to_str().unwrap(), "status"]).unwrap();
    assert!(out.starts_with("Editing: Wishlist → Detail View"));
}
