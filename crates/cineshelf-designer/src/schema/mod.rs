//! The style property schema.
//!
//! Every [`StyleProfile`](crate::StyleProfile) holds exactly the properties
//! listed here. The table drives:
//!
//! - default profiles and backfilling during load,
//! - validation of edits,
//! - parsing of raw control input,
//! - the value labels shown next to each control.
//!
//! Property names are the camelCase keys used in the persisted JSON.

mod property;

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub use property::{DefaultValue, PropertyKind, PropertySpec, Unit};

const fn number(
    name: &'static str,
    label: &'static str,
    default: f64,
    unit: Unit,
    min: f64,
    max: f64,
    step: f64,
) -> PropertySpec {
    PropertySpec {
        name,
        label,
        kind: PropertyKind::Number { min, max, step },
        unit,
        default: DefaultValue::Number(default),
    }
}

const fn px(name: &'static str, label: &'static str, default: f64, min: f64, max: f64) -> PropertySpec {
    number(name, label, default, Unit::Px, min, max, 1.0)
}

const fn flag(name: &'static str, label: &'static str) -> PropertySpec {
    PropertySpec {
        name,
        label,
        kind: PropertyKind::Flag,
        unit: Unit::None,
        default: DefaultValue::Flag(true),
    }
}

const fn choice(
    name: &'static str,
    label: &'static str,
    default: &'static str,
    choices: &'static [&'static str],
) -> PropertySpec {
    PropertySpec {
        name,
        label,
        kind: PropertyKind::Choice(choices),
        unit: Unit::None,
        default: DefaultValue::Text(default),
    }
}

/// Aspect ratios offered for posters.
pub const ASPECT_RATIOS: &[&str] = &["2/3", "3/4", "1/1", "16/9"];

/// Object-fit modes offered for posters.
pub const FIT_MODES: &[&str] = &["cover", "contain", "fill", "scale-down"];

static PROPERTIES: &[PropertySpec] = &[
    // Card appearance
    number("cardBgOpacity", "Background opacity", 0.12, Unit::None, 0.0, 1.0, 0.01),
    px("cardBorderRadius", "Corner radius", 16.0, 0.0, 40.0),
    PropertySpec {
        name: "cardBorderColor",
        label: "Border color",
        kind: PropertyKind::Color,
        unit: Unit::None,
        default: DefaultValue::Text("#ffffff"),
    },
    number("cardBorderOpacity", "Border opacity", 0.25, Unit::None, 0.0, 1.0, 0.01),
    px("cardBlur", "Backdrop blur", 20.0, 0.0, 40.0),
    px("cardShadowBlur", "Shadow blur", 25.0, 0.0, 60.0),
    number("cardShadowOpacity", "Shadow opacity", 0.1, Unit::None, 0.0, 1.0, 0.01),
    number("cardHoverScale", "Hover scale", 1.02, Unit::None, 1.0, 1.2, 0.01),
    px("cardHoverLift", "Hover lift", -8.0, -20.0, 0.0),
    // Card layout
    px("cardPadding", "Card padding", 12.0, 0.0, 32.0),
    px("cardGap", "Content gap", 4.0, 0.0, 24.0),
    // Poster
    px("posterBorderRadius", "Poster radius", 16.0, 0.0, 40.0),
    choice("posterAspectRatio", "Poster aspect ratio", "2/3", ASPECT_RATIOS),
    choice("posterFit", "Poster fit", "cover", FIT_MODES),
    px("posterHeight", "Poster height", 220.0, 100.0, 400.0),
    // Title
    px("titleFontSize", "Title size", 15.0, 10.0, 28.0),
    number("titleLineHeight", "Title line height", 1.3, Unit::None, 1.0, 2.0, 0.1),
    number("titleLineClamp", "Title lines", 2.0, Unit::None, 1.0, 4.0, 1.0),
    px("titleMarginBottom", "Title spacing", 6.0, 0.0, 20.0),
    number("titleFontWeight", "Title weight", 700.0, Unit::None, 300.0, 900.0, 100.0),
    // Info block
    px("infoFontSize", "Info size", 13.0, 9.0, 20.0),
    number("infoLineHeight", "Info line height", 1.5, Unit::None, 1.0, 2.0, 0.1),
    // Individual info fields
    px("yearFontSize", "Year size", 13.0, 9.0, 20.0),
    px("formatFontSize", "Format size", 13.0, 9.0, 20.0),
    px("ratingFontSize", "Rating size", 13.0, 9.0, 20.0),
    px("runtimeFontSize", "Runtime size", 12.0, 9.0, 20.0),
    px("directorFontSize", "Director size", 12.0, 9.0, 20.0),
    px("genreFontSize", "Genre size", 12.0, 9.0, 20.0),
    // Visibility
    flag("showYear", "Show year"),
    flag("showFormat", "Show format"),
    flag("showRating", "Show rating"),
    flag("showRuntime", "Show runtime"),
    flag("showDirector", "Show director"),
    flag("showGenre", "Show genre"),
    // List view
    px("listPosterWidth", "List poster width", 60.0, 40.0, 120.0),
    px("listPosterHeight", "List poster height", 90.0, 60.0, 180.0),
    px("listGap", "List gap", 16.0, 0.0, 40.0),
    // Detail view
    px("detailPosterWidth", "Detail poster width", 120.0, 80.0, 200.0),
    px("detailPosterHeight", "Detail poster height", 180.0, 120.0, 300.0),
    px("detailGap", "Detail gap", 24.0, 0.0, 48.0),
    // Compact view
    px("smallPosterHeight", "Compact poster height", 130.0, 80.0, 200.0),
    px("smallMaxWidth", "Compact card width", 140.0, 100.0, 200.0),
];

/// Name-indexed view over the property table.
#[derive(Debug)]
pub struct Schema {
    properties: &'static [PropertySpec],
    index: HashMap<&'static str, usize>,
}

impl Schema {
    fn new(properties: &'static [PropertySpec]) -> Self {
        let index = properties
            .iter()
            .enumerate()
            .map(|(i, spec)| (spec.name, i))
            .collect();
        Self { properties, index }
    }

    /// Looks up a property by its persisted name.
    pub fn get(&self, name: &str) -> Option<&'static PropertySpec> {
        let properties = self.properties;
        self.index.get(name).map(|&i| &properties[i])
    }

    /// Returns `true` if the property exists.
    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates properties in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'static PropertySpec> {
        self.properties.iter()
    }

    /// Number of properties in the schema.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

static SCHEMA: Lazy<Schema> = Lazy::new(|| Schema::new(PROPERTIES));

/// Returns the style property schema.
pub fn schema() -> &'static Schema {
    &SCHEMA
}
