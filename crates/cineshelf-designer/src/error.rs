//! Error types for designer operations.

use thiserror::Error;

use crate::css::ColorParseError;

/// Errors returned to callers of the designer.
///
/// These describe caller mistakes (a property that does not exist, a value
/// of the wrong kind) or setup failures. Recoverable runtime conditions such
/// as corrupt persisted data or a failed storage write are handled inside
/// the designer and never surface as a `DesignerError`.
#[derive(Debug, Error)]
pub enum DesignerError {
    /// The property name is not part of the style schema.
    #[error("unknown style property `{0}`")]
    UnknownProperty(String),

    /// The value kind does not match the property's declared kind.
    #[error("`{property}` expects a {expected} value, got {found}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A numeric value lies outside the property's control range.
    #[error("`{property}` must be between {min} and {max}, got {value}")]
    OutOfRange {
        property: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An enumerated property received a value outside its choice set.
    #[error("`{property}` must be one of {allowed}, got `{value}`")]
    UnknownChoice {
        property: String,
        value: String,
        allowed: String,
    },

    /// A color property received text that is not `#rrggbb`.
    #[error("`{property}`: {source}")]
    InvalidColor {
        property: String,
        #[source]
        source: ColorParseError,
    },

    /// Raw control input could not be read as the property's kind.
    #[error("could not read `{raw}` as a value for `{property}`")]
    InvalidInput { property: String, raw: String },

    /// Grid density outside 2..=8.
    #[error("grid density must be between 2 and 8, got {0}")]
    InvalidDensity(u8),

    #[error("unknown scope `{0}` (expected both, collection or wishlist)")]
    UnknownScope(String),

    #[error("unknown view mode `{0}` (expected grid, list, detail or small)")]
    UnknownViewMode(String),

    /// Preview templates failed to compile or render.
    #[error("preview template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Designer configuration could not be parsed.
    #[error("invalid designer configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = DesignerError::OutOfRange {
            property: "cardBorderRadius".to_string(),
            value: 99.0,
            min: 0.0,
            max: 40.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("cardBorderRadius"));
        assert!(msg.contains("between 0 and 40"));
        assert!(msg.contains("99"));
    }

    #[test]
    fn test_invalid_color_keeps_source() {
        let err = DesignerError::InvalidColor {
            property: "cardBorderColor".to_string(),
            source: ColorParseError::MissingHash {
                input: "112233".to_string(),
            },
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("cardBorderColor"));
    }
}
