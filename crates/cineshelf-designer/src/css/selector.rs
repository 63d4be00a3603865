//! Structured selectors for the generated stylesheet.
//!
//! Selectors are kept as data (scope, leaf, target) and rendered to text on
//! demand. Keeping the structure lets the stylesheet answer cascade queries
//! ("which rule sets `border-radius` on this card?") without reparsing CSS.

use crate::axis::{LeafKey, Scope};

/// The optional info fields shown on a movie card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoField {
    Year,
    Format,
    Rating,
    Runtime,
    Director,
    Genre,
}

impl InfoField {
    pub const ALL: [InfoField; 6] = [
        InfoField::Year,
        InfoField::Format,
        InfoField::Rating,
        InfoField::Runtime,
        InfoField::Director,
        InfoField::Genre,
    ];

    pub fn class(self) -> &'static str {
        match self {
            InfoField::Year => "movie-card-year",
            InfoField::Format => "movie-card-format",
            InfoField::Rating => "movie-card-rating",
            InfoField::Runtime => "movie-card-runtime",
            InfoField::Director => "movie-card-director",
            InfoField::Genre => "movie-card-genre",
        }
    }

    /// Property holding the field's font size.
    pub fn font_size_property(self) -> &'static str {
        match self {
            InfoField::Year => "yearFontSize",
            InfoField::Format => "formatFontSize",
            InfoField::Rating => "ratingFontSize",
            InfoField::Runtime => "runtimeFontSize",
            InfoField::Director => "directorFontSize",
            InfoField::Genre => "genreFontSize",
        }
    }

    /// Flag property controlling the field's visibility.
    pub fn visibility_property(self) -> &'static str {
        match self {
            InfoField::Year => "showYear",
            InfoField::Format => "showFormat",
            InfoField::Rating => "showRating",
            InfoField::Runtime => "showRuntime",
            InfoField::Director => "showDirector",
            InfoField::Genre => "showGenre",
        }
    }

    /// `display` value when the field is shown. Year, format and rating sit
    /// on one line; the rest stack.
    pub fn shown_display(self) -> &'static str {
        match self {
            InfoField::Year | InfoField::Format | InfoField::Rating => "inline",
            InfoField::Runtime | InfoField::Director | InfoField::Genre => "block",
        }
    }

    /// Maps a visibility flag to its `display` value.
    pub fn display_for(self, shown: bool) -> &'static str {
        if shown {
            self.shown_display()
        } else {
            "none"
        }
    }
}

/// The element a rule styles within a card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Card,
    CardHover,
    Poster,
    Content,
    Title,
    Info,
    Field(InfoField),
}

/// A selector for one element of one leaf's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector {
    pub scope: Scope,
    pub leaf: LeafKey,
    pub target: Target,
}

/// CSS specificity as `(ids, classes, types)`; compares lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// An element in the hosting page, described by where it sits.
///
/// `tab` is the tab root the element lives under, if any. Elements outside
/// both tabs are only reached by global rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub tab: Option<Scope>,
    pub leaf: LeafKey,
    pub target: Target,
}

impl Selector {
    pub fn new(scope: Scope, leaf: LeafKey, target: Target) -> Self {
        Self {
            scope,
            leaf,
            target,
        }
    }

    /// Returns `true` if this selector matches the element.
    ///
    /// Global selectors carry no tab prefix and therefore match inside
    /// either tab; scoped selectors only match inside their own tab.
    pub fn matches(&self, element: &Element) -> bool {
        let tab_ok = match self.scope {
            Scope::Global => true,
            scope => element.tab == Some(scope),
        };
        tab_ok && self.leaf == element.leaf && self.target == element.target
    }

    /// Specificity of the rendered selector.
    ///
    /// The generated grammar only uses ids, classes and the `:hover`
    /// pseudo-class, so counting `#`, `.` and `:` is exact.
    pub fn specificity(&self) -> Specificity {
        let text = self.to_string();
        let ids = text.matches('#').count() as u32;
        let classes = text.matches('.').count() as u32 + text.matches(':').count() as u32;
        Specificity(ids, classes, 0)
    }
}

fn container_class(leaf: LeafKey) -> String {
    match leaf {
        LeafKey::Grid(density) => format!(".movie-grid.grid-view.grid-cols-{}", density),
        LeafKey::List => ".movie-grid.list-view".to_string(),
        LeafKey::Detail => ".movie-grid.detail-view".to_string(),
        LeafKey::Compact => ".movie-grid.small-view".to_string(),
    }
}

fn card_class(leaf: LeafKey) -> &'static str {
    match leaf {
        LeafKey::Grid(_) => ".movie-card",
        LeafKey::List => ".movie-card.list-item",
        LeafKey::Detail => ".movie-card.detail-item",
        LeafKey::Compact => ".movie-card.small-item",
    }
}

fn content_class(leaf: LeafKey) -> &'static str {
    match leaf {
        LeafKey::Grid(_) | LeafKey::Compact => ".movie-card-content",
        LeafKey::List | LeafKey::Detail => ".movie-content",
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(id) = self.scope.root_id() {
            write!(f, "#{} ", id)?;
        }
        let container = container_class(self.leaf);
        let card = card_class(self.leaf);
        match self.target {
            Target::Card => write!(f, "{} {}", container, card),
            Target::CardHover => write!(f, "{} {}:hover", container, card),
            Target::Poster => write!(f, "{} .movie-poster", container),
            Target::Content => write!(f, "{} {}", container, content_class(self.leaf)),
            Target::Title => write!(f, "{} {} .movie-title", container, card),
            Target::Info => write!(f, "{} {} .movie-info", container, card),
            Target::Field(field) => write!(f, "{} {} .{}", container, card, field.class()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::GridDensity;

    fn grid4() -> LeafKey {
        LeafKey::Grid(GridDensity::new(4).unwrap())
    }

    #[test]
    fn test_global_selector_text() {
        let sel = Selector::new(Scope::Global, grid4(), Target::Card);
        assert_eq!(sel.to_string(), ".movie-grid.grid-view.grid-cols-4 .movie-card");
    }

    #[test]
    fn test_scoped_selector_text() {
        let sel = Selector::new(Scope::WishlistOnly, LeafKey::List, Target::Content);
        assert_eq!(sel.to_string(), "#wishlist .movie-grid.list-view .movie-content");
        let sel = Selector::new(Scope::CollectionOnly, LeafKey::Compact, Target::CardHover);
        assert_eq!(
            sel.to_string(),
            "#collection .movie-grid.small-view .movie-card.small-item:hover"
        );
    }

    #[test]
    fn test_field_selector_text() {
        let sel = Selector::new(Scope::Global, LeafKey::Detail, Target::Field(InfoField::Genre));
        assert_eq!(
            sel.to_string(),
            ".movie-grid.detail-view .movie-card.detail-item .movie-card-genre"
        );
    }

    #[test]
    fn test_specificity() {
        let global = Selector::new(Scope::Global, grid4(), Target::Card);
        let scoped = Selector::new(Scope::CollectionOnly, grid4(), Target::Card);
        assert_eq!(global.specificity(), Specificity(0, 4, 0));
        assert_eq!(scoped.specificity(), Specificity(1, 4, 0));
        assert!(scoped.specificity() > global.specificity());
    }

    #[test]
    fn test_matching() {
        let element = Element {
            tab: Some(Scope::CollectionOnly),
            leaf: grid4(),
            target: Target::Card,
        };
        assert!(Selector::new(Scope::Global, grid4(), Target::Card).matches(&element));
        assert!(Selector::new(Scope::CollectionOnly, grid4(), Target::Card).matches(&element));
        assert!(!Selector::new(Scope::WishlistOnly, grid4(), Target::Card).matches(&element));
        assert!(!Selector::new(Scope::Global, LeafKey::List, Target::Card).matches(&element));
        assert!(!Selector::new(Scope::Global, grid4(), Target::Poster).matches(&element));
    }

    #[test]
    fn test_visibility_mapping() {
        assert_eq!(InfoField::Year.display_for(true), "inline");
        assert_eq!(InfoField::Genre.display_for(true), "block");
        for field in InfoField::ALL {
            assert_eq!(field.display_for(false), "none");
        }
    }
}
