//! Typed style values.

use serde::{Serialize, Serializer};

use crate::util::{format_number, is_integral};

/// A single property value inside a [`StyleProfile`](super::StyleProfile).
///
/// Serializes to the plain JSON scalar (number, string or boolean) so the
/// persisted tree stays readable and compatible with older blobs. Integral
/// numbers serialize as JSON integers, which keeps `save(load())` byte-stable
/// for data that was written as `16` rather than `16.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Number(f64),
    Choice(String),
    Flag(bool),
    Color(String),
}

impl StyleValue {
    /// Name of the value kind, matching [`PropertyKind::as_str`](crate::PropertyKind::as_str).
    pub fn kind_name(&self) -> &'static str {
        match self {
            StyleValue::Number(_) => "number",
            StyleValue::Choice(_) => "choice",
            StyleValue::Flag(_) => "boolean",
            StyleValue::Color(_) => "color",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            StyleValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text of a choice or color value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Choice(s) | StyleValue::Color(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for StyleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleValue::Number(n) => f.write_str(&format_number(*n)),
            StyleValue::Choice(s) | StyleValue::Color(s) => f.write_str(s),
            StyleValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            StyleValue::Number(n) => serializer.serialize_f64(*n),
            StyleValue::Choice(s) | StyleValue::Color(s) => serializer.serialize_str(s),
            StyleValue::Flag(b) => serializer.serialize_bool(*b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_integral_as_integer() {
        let json = serde_json::to_string(&StyleValue::Number(16.0)).unwrap();
        assert_eq!(json, "16");
        let json = serde_json::to_string(&StyleValue::Number(-8.0)).unwrap();
        assert_eq!(json, "-8");
    }

    #[test]
    fn test_serialize_fraction() {
        let json = serde_json::to_string(&StyleValue::Number(0.12)).unwrap();
        assert_eq!(json, "0.12");
    }

    #[test]
    fn test_serialize_text_and_flag() {
        assert_eq!(
            serde_json::to_string(&StyleValue::Color("#ffffff".into())).unwrap(),
            "\"#ffffff\""
        );
        assert_eq!(
            serde_json::to_string(&StyleValue::Flag(false)).unwrap(),
            "false"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(StyleValue::Number(1.02).to_string(), "1.02");
        assert_eq!(StyleValue::Choice("2/3".into()).to_string(), "2/3");
        assert_eq!(StyleValue::Flag(true).to_string(), "true");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(StyleValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(StyleValue::Flag(true).as_number(), None);
        assert_eq!(StyleValue::Color("#000000".into()).as_text(), Some("#000000"));
        assert_eq!(StyleValue::Flag(false).as_flag(), Some(false));
    }
}
