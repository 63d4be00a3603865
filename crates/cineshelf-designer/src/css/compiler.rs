//! Compiles a [`ConfigTree`] into a stylesheet.
//!
//! Blocks are emitted global scope first, then collection, then wishlist;
//! within a scope grid densities 2..8 ascending, then list, detail and
//! compact. Every declaration is `!important`, so at equal specificity the
//! later (tab-specific) block wins, and tab-specific selectors also carry the
//! tab id, which raises their specificity above the global ones.

use super::color::{hex_to_rgba, Rgb};
use super::selector::{InfoField, Selector, Target};
use super::sheet::{Block, Diagnostic, Rule, StyleSheet};
use crate::axis::{LeafKey, Scope};
use crate::profile::StyleProfile;
use crate::tree::ConfigTree;
use crate::util::format_number;

/// First line of every generated stylesheet.
pub const SHEET_HEADER: &str = "CineShelf Custom Styles - Generated by Designer";

/// Compiles the whole tree to CSS text.
///
/// Pure and deterministic: equal trees produce byte-identical output.
pub fn compile(tree: &ConfigTree) -> String {
    compile_sheet(tree).to_css()
}

/// Compiles the whole tree to a structured [`StyleSheet`].
pub fn compile_sheet(tree: &ConfigTree) -> StyleSheet {
    let mut diagnostics = Vec::new();
    let blocks = tree
        .leaves()
        .map(|(scope, leaf, profile)| compile_leaf(scope, leaf, profile, &mut diagnostics))
        .collect();

    StyleSheet {
        header: SHEET_HEADER.to_string(),
        blocks,
        diagnostics,
    }
}

fn px(value: f64) -> String {
    format!("{}px", format_number(value))
}

fn num(value: f64) -> String {
    format_number(value)
}

fn block_comment(scope: Scope, leaf: LeafKey) -> String {
    let scope_name = match scope {
        Scope::Global => "Global",
        Scope::CollectionOnly => "Movies",
        Scope::WishlistOnly => "Wishlist",
    };
    match leaf {
        LeafKey::Grid(density) => format!("{} - Grid {} Columns", scope_name, density),
        other => format!("{} - {} View", scope_name, other.view().label()),
    }
}

fn border_color(
    scope: Scope,
    leaf: LeafKey,
    p: &StyleProfile,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let hex = p.text("cardBorderColor");
    let alpha = p.number("cardBorderOpacity");
    match hex_to_rgba(&hex, alpha) {
        Ok(color) => color,
        Err(err) => {
            diagnostics.push(Diagnostic {
                scope,
                leaf,
                property: "cardBorderColor",
                message: format!("{}; using white", err),
            });
            Rgb::WHITE.with_alpha(alpha)
        }
    }
}

fn compile_leaf(
    scope: Scope,
    leaf: LeafKey,
    p: &StyleProfile,
    diagnostics: &mut Vec<Diagnostic>,
) -> Block {
    let sel = |target| Selector::new(scope, leaf, target);
    let mut rules = Vec::new();

    let blur = px(p.number("cardBlur"));
    rules.push(
        Rule::new(sel(Target::Card))
            .set("background", Rgb::WHITE.with_alpha(p.number("cardBgOpacity")))
            .set("border-radius", px(p.number("cardBorderRadius")))
            .set("border-color", border_color(scope, leaf, p, diagnostics))
            .set("backdrop-filter", format!("blur({})", blur))
            .set("-webkit-backdrop-filter", format!("blur({})", blur))
            .set(
                "box-shadow",
                format!(
                    "0 8px {} {}",
                    px(p.number("cardShadowBlur")),
                    Rgb::BLACK.with_alpha(p.number("cardShadowOpacity"))
                ),
            ),
    );

    rules.push(Rule::new(sel(Target::CardHover)).set(
        "transform",
        format!(
            "translateY({}) scale({})",
            px(p.number("cardHoverLift")),
            num(p.number("cardHoverScale"))
        ),
    ));

    let radius = px(p.number("posterBorderRadius"));
    let fit = p.text("posterFit");
    let padding = px(p.number("cardPadding"));
    match leaf {
        LeafKey::Grid(_) => {
            rules.push(
                Rule::new(sel(Target::Poster))
                    .set("border-radius", format!("{} {} 0 0", radius, radius))
                    .set("aspect-ratio", p.text("posterAspectRatio"))
                    .set("object-fit", fit)
                    .set("height", px(p.number("posterHeight"))),
            );
        }
        LeafKey::List | LeafKey::Detail => {
            let (width, height, gap) = if leaf == LeafKey::List {
                ("listPosterWidth", "listPosterHeight", "listGap")
            } else {
                ("detailPosterWidth", "detailPosterHeight", "detailGap")
            };
            rules.push(
                Rule::new(sel(Target::Poster))
                    .set("width", px(p.number(width)))
                    .set("height", px(p.number(height)))
                    .set("border-radius", radius)
                    .set("object-fit", fit),
            );
            rules.push(
                Rule::new(sel(Target::Card))
                    .set("gap", px(p.number(gap)))
                    .set("padding", padding.clone()),
            );
        }
        LeafKey::Compact => {
            rules.push(
                Rule::new(sel(Target::Poster))
                    .set("height", px(p.number("smallPosterHeight")))
                    .set("border-radius", radius)
                    .set("object-fit", fit),
            );
            rules.push(
                Rule::new(sel(Target::Card))
                    .set("max-width", px(p.number("smallMaxWidth")))
                    .set("padding", padding.clone()),
            );
        }
    }

    rules.push(
        Rule::new(sel(Target::Content))
            .set("padding", padding)
            .set("gap", px(p.number("cardGap"))),
    );

    rules.push(
        Rule::new(sel(Target::Title))
            .set("font-size", px(p.number("titleFontSize")))
            .set("line-height", num(p.number("titleLineHeight")))
            .set("-webkit-line-clamp", num(p.number("titleLineClamp")))
            .set("margin-bottom", px(p.number("titleMarginBottom")))
            .set("font-weight", num(p.number("titleFontWeight"))),
    );

    rules.push(
        Rule::new(sel(Target::Info))
            .set("font-size", px(p.number("infoFontSize")))
            .set("line-height", num(p.number("infoLineHeight"))),
    );

    for field in InfoField::ALL {
        rules.push(
            Rule::new(sel(Target::Field(field)))
                .set("font-size", px(p.number(field.font_size_property())))
                .set("display", field.display_for(p.flag(field.visibility_property()))),
        );
    }

    Block {
        scope,
        leaf,
        comment: block_comment(scope, leaf),
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{ConfigAxis, GridDensity, ViewMode};
    use crate::css::selector::Element;
    use crate::profile::StyleValue;

    fn density(n: u8) -> GridDensity {
        GridDensity::new(n).unwrap()
    }

    #[test]
    fn test_block_order() {
        let sheet = compile_sheet(&ConfigTree::defaults());
        assert_eq!(sheet.blocks.len(), 30);
        let comments: Vec<_> = sheet.blocks.iter().map(|b| b.comment.as_str()).collect();
        assert_eq!(comments[0], "Global - Grid 2 Columns");
        assert_eq!(comments[6], "Global - Grid 8 Columns");
        assert_eq!(comments[7], "Global - List View");
        assert_eq!(comments[9], "Global - Small View");
        assert_eq!(comments[10], "Movies - Grid 2 Columns");
        assert_eq!(comments[29], "Wishlist - Small View");
    }

    #[test]
    fn test_global_block_precedes_scoped_blocks_in_text() {
        let css = compile(&ConfigTree::defaults());
        let global = css.find("/* Global - Grid 4 Columns */").unwrap();
        let movies = css.find("/* Movies - Grid 4 Columns */").unwrap();
        let wishlist = css.find("/* Wishlist - Grid 4 Columns */").unwrap();
        assert!(global < movies && movies < wishlist);
    }

    #[test]
    fn test_every_declaration_is_important() {
        let sheet = compile_sheet(&ConfigTree::defaults());
        assert!(sheet
            .rules()
            .flat_map(|r| r.declarations.iter())
            .all(|d| d.important));
    }

    #[test]
    fn test_default_grid_card_rule() {
        let css = compile(&ConfigTree::defaults());
        let expected = ".movie-grid.grid-view.grid-cols-4 .movie-card {\n    \
            background: rgba(255, 255, 255, 0.12) !important;\n    \
            border-radius: 16px !important;\n    \
            border-color: rgba(255, 255, 255, 0.25) !important;\n    \
            backdrop-filter: blur(20px) !important;\n    \
            -webkit-backdrop-filter: blur(20px) !important;\n    \
            box-shadow: 0 8px 25px rgba(0, 0, 0, 0.1) !important;\n}\n";
        assert!(css.contains(expected), "missing grid card rule in:\n{}", css);
    }

    #[test]
    fn test_view_specific_poster_rules() {
        let sheet = compile_sheet(&ConfigTree::defaults());

        let grid = sheet.block(Scope::Global, LeafKey::Grid(density(3))).unwrap();
        let poster = grid.rules.iter().find(|r| r.selector.target == Target::Poster).unwrap();
        assert_eq!(poster.get("border-radius"), Some("16px 16px 0 0"));
        assert_eq!(poster.get("aspect-ratio"), Some("2/3"));
        assert_eq!(poster.get("height"), Some("220px"));

        let detail = sheet.block(Scope::Global, LeafKey::Detail).unwrap();
        let poster = detail.rules.iter().find(|r| r.selector.target == Target::Poster).unwrap();
        assert_eq!(poster.get("width"), Some("120px"));
        assert_eq!(poster.get("height"), Some("180px"));

        let compact = sheet.block(Scope::Global, LeafKey::Compact).unwrap();
        assert!(compact
            .rules
            .iter()
            .any(|r| r.selector.target == Target::Card && r.get("max-width") == Some("140px")));
    }

    #[test]
    fn test_list_scenario() {
        let mut tree = ConfigTree::defaults();
        let axis = ConfigAxis::view(Scope::Global, ViewMode::List);
        let profile = tree.profile_mut(&axis);
        profile.set("cardBorderRadius", StyleValue::Number(20.0)).unwrap();
        profile
            .set("cardBorderColor", StyleValue::Color("#112233".into()))
            .unwrap();
        profile.set("cardBorderOpacity", StyleValue::Number(0.5)).unwrap();

        let css = compile(&tree);
        let start = css
            .find(".movie-grid.list-view .movie-card.list-item {")
            .unwrap();
        let rule = &css[start..start + css[start..].find('}').unwrap()];
        assert!(rule.contains("border-radius: 20px"));
        assert!(rule.contains("border-color: rgba(17, 34, 51, 0.5)"));
    }

    #[test]
    fn test_priority_contract() {
        let mut tree = ConfigTree::defaults();
        tree.profile_mut(&ConfigAxis::grid(Scope::Global, density(4)))
            .set("cardBorderRadius", StyleValue::Number(10.0))
            .unwrap();
        tree.profile_mut(&ConfigAxis::grid(Scope::CollectionOnly, density(4)))
            .set("cardBorderRadius", StyleValue::Number(30.0))
            .unwrap();

        let sheet = compile_sheet(&tree);
        let in_collection = Element {
            tab: Some(Scope::CollectionOnly),
            leaf: LeafKey::Grid(density(4)),
            target: Target::Card,
        };
        assert_eq!(sheet.winning_value(&in_collection, "border-radius"), Some("30px"));

        let in_wishlist = Element {
            tab: Some(Scope::WishlistOnly),
            ..in_collection
        };
        // The wishlist leaf still holds the default, and it comes last.
        assert_eq!(sheet.winning_value(&in_wishlist, "border-radius"), Some("16px"));
    }

    #[test]
    fn test_visibility_toggle_changes_only_display() {
        let axis = ConfigAxis::grid(Scope::WishlistOnly, density(5));
        let before = compile_sheet(&ConfigTree::defaults());

        let mut tree = ConfigTree::defaults();
        tree.profile_mut(&axis)
            .set("showDirector", StyleValue::Flag(false))
            .unwrap();
        let after = compile_sheet(&tree);

        let changed: Vec<_> = before
            .rules()
            .zip(after.rules())
            .flat_map(|(a, b)| a.declarations.iter().zip(b.declarations.iter()).map(move |(x, y)| (a, x, y)))
            .filter(|(_, x, y)| x != y)
            .collect();

        assert_eq!(changed.len(), 1);
        let (rule, old, new) = changed[0];
        assert_eq!(rule.selector.target, Target::Field(InfoField::Director));
        assert_eq!(rule.selector.scope, Scope::WishlistOnly);
        assert_eq!(old.value, "block");
        assert_eq!(new.property, "display");
        assert_eq!(new.value, "none");
    }

    #[test]
    fn test_every_flag_emits_display() {
        let sheet = compile_sheet(&ConfigTree::defaults());
        for block in &sheet.blocks {
            for field in InfoField::ALL {
                let rule = block
                    .rules
                    .iter()
                    .find(|r| r.selector.target == Target::Field(field))
                    .unwrap();
                assert_eq!(rule.get("display"), Some(field.shown_display()));
            }
        }
    }

    #[test]
    fn test_malformed_color_falls_back_to_white() {
        let persisted = serde_json::json!({
            "both": { "detail": { "cardBorderColor": "#12zz56", "cardBorderOpacity": 0.4 } }
        });
        let (tree, _) = ConfigTree::merged_over_defaults(&persisted);
        let sheet = compile_sheet(&tree);

        let detail = sheet.block(Scope::Global, LeafKey::Detail).unwrap();
        assert_eq!(
            detail.rules[0].get("border-color"),
            Some("rgba(255, 255, 255, 0.4)")
        );
        assert_eq!(sheet.diagnostics.len(), 1);
        assert_eq!(sheet.diagnostics[0].property, "cardBorderColor");
        assert!(!sheet.to_css().contains("NaN"));
    }

    #[test]
    fn test_card_opacities_are_clamped() {
        let persisted = serde_json::json!({
            "both": { "list": { "cardBgOpacity": 1.7, "cardShadowOpacity": -0.3 } }
        });
        let (tree, _) = ConfigTree::merged_over_defaults(&persisted);
        let sheet = compile_sheet(&tree);

        let card = &sheet.block(Scope::Global, LeafKey::List).unwrap().rules[0];
        assert_eq!(card.get("background"), Some("rgba(255, 255, 255, 1)"));
        assert_eq!(card.get("box-shadow"), Some("0 8px 25px rgba(0, 0, 0, 0)"));

        let untouched = &sheet.block(Scope::Global, LeafKey::Detail).unwrap().rules[0];
        assert_eq!(untouched.get("background"), Some("rgba(255, 255, 255, 0.12)"));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let mut a = ConfigTree::defaults();
        a.profile_mut(&ConfigAxis::view(Scope::CollectionOnly, ViewMode::Compact))
            .set("posterFit", StyleValue::Choice("contain".into()))
            .unwrap();
        let b = a.clone();
        assert_eq!(compile(&a), compile(&b));
    }
}
