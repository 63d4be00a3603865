//! End-to-end tests for the designer: storage, compilation and page updates.
//!
//! These drive the public API only, the same way a hosting page would.

use cineshelf_designer::css::{Element, Target};
use cineshelf_designer::{
    compile, compile_sheet, schema, ConfigAxis, ConfigStore, ConfigTree, Designer, DesignerConfig,
    FileStore, GridDensity, KeyValueStore, LeafKey, LoadSource, MemoryStore, RecordingPage, Scope,
    StyleValue, ViewMode, DEFAULT_STORAGE_KEY,
};
use serde_json::{json, Value};

fn density(n: u8) -> GridDensity {
    GridDensity::new(n).unwrap()
}

fn all_axes() -> Vec<ConfigAxis> {
    let mut axes = Vec::new();
    for scope in Scope::ALL {
        for d in GridDensity::all() {
            axes.push(ConfigAxis::grid(scope, d));
        }
        for view in [ViewMode::List, ViewMode::Detail, ViewMode::Compact] {
            axes.push(ConfigAxis::view(scope, view));
        }
    }
    axes
}

#[test]
fn test_every_axis_resolves_to_a_full_profile() {
    let tree = ConfigStore::new(MemoryStore::new()).load();
    let axes = all_axes();
    assert_eq!(axes.len(), 30);
    for axis in axes {
        let profile = tree.profile(&axis);
        for spec in schema().iter() {
            assert!(profile.get(spec.name).is_some(), "{} missing", spec.name);
        }
    }
}

#[test]
fn test_density_is_ignored_outside_grid() {
    let mut tree = ConfigTree::defaults();
    tree.profile_mut(&ConfigAxis::new(Scope::Global, ViewMode::List, density(2)))
        .set("listGap", StyleValue::Number(4.0))
        .unwrap();
    let other = ConfigAxis::new(Scope::Global, ViewMode::List, density(7));
    assert_eq!(tree.profile(&other).number("listGap"), 4.0);
}

#[test]
fn test_corrupt_blob_gives_defaults_and_matching_css() {
    let mut backend = MemoryStore::new();
    backend.insert(DEFAULT_STORAGE_KEY, "{not json");
    let outcome = ConfigStore::new(backend).load_with_report();
    assert_eq!(outcome.source, LoadSource::Recovered);
    assert_eq!(outcome.tree, ConfigTree::defaults());
    assert_eq!(compile(&outcome.tree), compile(&ConfigTree::defaults()));
}

#[test]
fn test_legacy_blob_is_upgraded() {
    // An older build stored fewer properties and a since-removed one.
    let legacy = json!({
        "both": {
            "grid": { "4": { "cardBorderRadius": 8, "cardGlow": 0.3 } },
            "small": { "showYear": false }
        },
        "collection": { "list": { "listGap": 30 } }
    });
    let mut backend = MemoryStore::new();
    backend.insert(DEFAULT_STORAGE_KEY, legacy.to_string());
    let mut store = ConfigStore::new(backend);
    let outcome = store.load_with_report();

    let tree = &outcome.tree;
    let grid4 = tree.profile(&ConfigAxis::grid(Scope::Global, density(4)));
    assert_eq!(grid4.number("cardBorderRadius"), 8.0);
    assert_eq!(grid4.number("cardBlur"), 20.0);
    assert!(grid4.get("cardGlow").is_none());
    assert!(!tree
        .profile(&ConfigAxis::view(Scope::Global, ViewMode::Compact))
        .flag("showYear"));
    assert_eq!(
        tree.profile(&ConfigAxis::view(Scope::CollectionOnly, ViewMode::List))
            .number("listGap"),
        30.0
    );
    assert_eq!(outcome.merge.dropped, vec!["both.grid.4.cardGlow".to_string()]);

    // Saving writes the upgraded shape back.
    store.save(tree).unwrap();
    let raw = store.backend().read(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    let saved: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["both"]["grid"]["4"]["cardBorderRadius"], json!(8));
    assert_eq!(saved["wishlist"]["detail"]["detailGap"], json!(24));
    assert!(saved["both"]["grid"]["4"].get("cardGlow").is_none());
}

#[test]
fn test_round_trip_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut tree = ConfigTree::defaults();
    let axis = ConfigAxis::grid(Scope::WishlistOnly, density(8));
    {
        let mut store = ConfigStore::new(FileStore::new(dir.path()));
        store
            .set_property(&mut tree, &axis, "posterAspectRatio", StyleValue::Choice("16/9".into()))
            .unwrap();
        store
            .set_property(&mut tree, &axis, "cardHoverScale", StyleValue::Number(1.07))
            .unwrap();
    }

    let reopened = ConfigStore::new(FileStore::new(dir.path()));
    assert_eq!(reopened.load(), tree);
}

#[test]
fn test_save_of_load_is_byte_stable() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConfigStore::new(FileStore::new(dir.path()));
    let mut tree = ConfigTree::defaults();
    store
        .set_property(
            &mut tree,
            &ConfigAxis::view(Scope::Global, ViewMode::Detail),
            "titleLineHeight",
            StyleValue::Number(1.4),
        )
        .unwrap();

    let before = store.backend().read(DEFAULT_STORAGE_KEY).unwrap();
    let loaded = store.load();
    store.save(&loaded).unwrap();
    let after = store.backend().read(DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_global_list_scenario() {
    let mut designer =
        Designer::new(DesignerConfig::default(), MemoryStore::new(), RecordingPage::new()).unwrap();
    designer
        .set_axis(Scope::Global, ViewMode::List, None)
        .unwrap();
    designer
        .update_property("cardBorderRadius", StyleValue::Number(20.0))
        .unwrap();
    designer
        .update_property("cardBorderColor", StyleValue::Color("#112233".into()))
        .unwrap();
    designer
        .update_property("cardBorderOpacity", StyleValue::Number(0.5))
        .unwrap();

    let css = designer.page().css().unwrap();
    let marker = ".movie-grid.list-view .movie-card.list-item {";
    let start = css.find(marker).unwrap();
    let end = start + css[start..].find('}').unwrap();
    let rule = &css[start..end];
    assert!(rule.contains("border-radius: 20px !important;"));
    assert!(rule.contains("border-color: rgba(17, 34, 51, 0.5) !important;"));
}

#[test]
fn test_tab_specific_rules_win_inside_their_tab() {
    let mut designer =
        Designer::new(DesignerConfig::default(), MemoryStore::new(), RecordingPage::new()).unwrap();
    designer
        .update_property("cardBorderRadius", StyleValue::Number(10.0))
        .unwrap();
    designer
        .set_axis(Scope::CollectionOnly, ViewMode::Grid, Some(density(4)))
        .unwrap();
    designer
        .update_property("cardBorderRadius", StyleValue::Number(30.0))
        .unwrap();

    let sheet = compile_sheet(designer.tree());
    let card = |tab| Element {
        tab,
        leaf: LeafKey::Grid(density(4)),
        target: Target::Card,
    };
    assert_eq!(
        sheet.winning_value(&card(Some(Scope::CollectionOnly)), "border-radius"),
        Some("30px")
    );
    assert_eq!(sheet.winning_value(&card(None), "border-radius"), Some("10px"));

    // Global text comes first, so the scoped rule is also later in source.
    let css = designer.css();
    let global = css
        .find(".movie-grid.grid-view.grid-cols-4 .movie-card {")
        .unwrap();
    let scoped = css
        .find("#collection .movie-grid.grid-view.grid-cols-4 .movie-card {")
        .unwrap();
    assert!(global < scoped);
}

#[test]
fn test_edit_touches_exactly_one_leaf() {
    let mut designer =
        Designer::new(DesignerConfig::default(), MemoryStore::new(), RecordingPage::new()).unwrap();
    let target = ConfigAxis::grid(Scope::WishlistOnly, density(3));
    designer
        .set_axis(target.scope, target.view, Some(target.density))
        .unwrap();
    designer
        .update_property("showRuntime", StyleValue::Flag(false))
        .unwrap();

    let defaults = ConfigTree::defaults();
    for axis in all_axes() {
        let expected_same = axis.leaf() != target.leaf() || axis.scope != target.scope;
        assert_eq!(
            designer.tree().profile(&axis) == defaults.profile(&axis),
            expected_same,
            "{}",
            axis.status_label()
        );
    }
}

#[test]
fn test_hidden_field_emits_display_none() {
    let mut designer =
        Designer::new(DesignerConfig::default(), MemoryStore::new(), RecordingPage::new()).unwrap();
    designer
        .set_axis(Scope::Global, ViewMode::Compact, None)
        .unwrap();
    designer.update_from_input("showFormat", "false").unwrap();

    let css = designer.css();
    assert!(css.contains(
        ".movie-grid.small-view .movie-card.small-item .movie-card-format {\n    \
         font-size: 13px !important;\n    display: none !important;\n}"
    ));
    assert!(css.contains(
        ".movie-grid.list-view .movie-card.list-item .movie-card-format {\n    \
         font-size: 13px !important;\n    display: inline !important;\n}"
    ));
}

#[test]
fn test_compile_is_deterministic_across_loads() {
    let mut designer =
        Designer::new(DesignerConfig::default(), MemoryStore::new(), RecordingPage::new()).unwrap();
    designer
        .update_property("posterFit", StyleValue::Choice("contain".into()))
        .unwrap();
    let reloaded = designer.store().load();
    assert_eq!(compile(&reloaded), designer.css());
    assert_eq!(designer.export().contents, designer.css());
}

#[test]
fn test_scoped_preview_sits_inside_its_tab_root() {
    let mut designer =
        Designer::new(DesignerConfig::default(), MemoryStore::new(), RecordingPage::new()).unwrap();
    designer
        .set_axis(Scope::CollectionOnly, ViewMode::Grid, Some(density(4)))
        .unwrap();
    designer
        .update_property("cardBorderRadius", StyleValue::Number(30.0))
        .unwrap();

    let (_, preview) = designer.page().preview.clone().unwrap();
    assert_eq!(preview.tab_root, Some("collection"));
    let card = Element {
        tab: Some(preview.scope),
        leaf: LeafKey::Grid(density(4)),
        target: Target::Card,
    };
    assert_eq!(
        compile_sheet(designer.tree()).winning_value(&card, "border-radius"),
        Some("30px")
    );

    let page = designer.preview_document().unwrap();
    let root = page.find("<div id=\"collection\">").unwrap();
    let container = page
        .find("<div id=\"cssPreviewGrid\" class=\"movie-grid grid-view grid-cols-4\">")
        .unwrap();
    assert!(root < container);
    assert!(page.contains("#collection .movie-grid.grid-view.grid-cols-4 .movie-card {"));

    designer.set_axis(Scope::Global, ViewMode::Grid, Some(density(4))).unwrap();
    let (_, preview) = designer.page().preview.clone().unwrap();
    assert_eq!(preview.tab_root, None);
    assert!(!designer.preview_document().unwrap().contains("<div id=\"collection\">"));
}
