//! Per-property metadata: kind, unit, control range and display formatting.

use serde_json::Value;

use crate::css::Rgb;
use crate::error::DesignerError;
use crate::profile::StyleValue;
use crate::util::format_number;

/// Unit appended when a numeric value is displayed or emitted as CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Pixel lengths (`16px`).
    Px,
    /// Unitless scalars: opacities, scales, line heights, weights, clamps.
    None,
}

impl Unit {
    /// Returns the CSS suffix for this unit.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::None => "",
        }
    }
}

/// The kind of value a property holds, with its control constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyKind {
    /// A number edited with a slider.
    Number { min: f64, max: f64, step: f64 },
    /// One of a fixed set of strings, edited with a select box.
    Choice(&'static [&'static str]),
    /// A visibility toggle, edited with a checkbox.
    Flag,
    /// A `#rrggbb` color, edited with a color picker.
    Color,
}

impl PropertyKind {
    /// Returns a human-readable name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Number { .. } => "number",
            PropertyKind::Choice(_) => "choice",
            PropertyKind::Flag => "boolean",
            PropertyKind::Color => "color",
        }
    }
}

/// Default value of a property, stored in const-friendly form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Number(f64),
    Text(&'static str),
    Flag(bool),
}

/// Metadata for one style property.
///
/// The table of specs is the single place that knows how a property is
/// typed, validated, parsed from control input and displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertySpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: PropertyKind,
    pub unit: Unit,
    pub default: DefaultValue,
}

impl PropertySpec {
    /// Returns the default value as a [`StyleValue`].
    pub fn default_value(&self) -> StyleValue {
        match (self.kind, self.default) {
            (PropertyKind::Color, DefaultValue::Text(text)) => StyleValue::Color(text.to_string()),
            (_, DefaultValue::Text(text)) => StyleValue::Choice(text.to_string()),
            (_, DefaultValue::Number(n)) => StyleValue::Number(n),
            (_, DefaultValue::Flag(b)) => StyleValue::Flag(b),
        }
    }

    /// Checks a value against this property's kind and constraints.
    ///
    /// Numbers must be finite and inside the control range, choices must be
    /// in the choice set and colors must parse as `#rrggbb`.
    pub fn validate(&self, value: StyleValue) -> Result<StyleValue, DesignerError> {
        match (self.kind, value) {
            (PropertyKind::Number { min, max, .. }, StyleValue::Number(n)) => {
                if n.is_finite() && n >= min && n <= max {
                    Ok(StyleValue::Number(n))
                } else {
                    Err(DesignerError::OutOfRange {
                        property: self.name.to_string(),
                        value: n,
                        min,
                        max,
                    })
                }
            }
            (PropertyKind::Choice(choices), StyleValue::Choice(text)) => {
                if choices.contains(&text.as_str()) {
                    Ok(StyleValue::Choice(text))
                } else {
                    Err(DesignerError::UnknownChoice {
                        property: self.name.to_string(),
                        value: text,
                        allowed: choices.join(", "),
                    })
                }
            }
            (PropertyKind::Flag, StyleValue::Flag(b)) => Ok(StyleValue::Flag(b)),
            (PropertyKind::Color, StyleValue::Color(text)) => match Rgb::parse_hex(&text) {
                Ok(_) => Ok(StyleValue::Color(text)),
                Err(source) => Err(DesignerError::InvalidColor {
                    property: self.name.to_string(),
                    source,
                }),
            },
            (kind, other) => Err(DesignerError::TypeMismatch {
                property: self.name.to_string(),
                expected: kind.as_str(),
                found: other.kind_name(),
            }),
        }
    }

    /// Reads a persisted JSON value for this property.
    ///
    /// Returns `None` when the JSON type does not fit the property or a
    /// choice is outside the set; the caller substitutes the default.
    /// Persisted numbers are not range-checked and persisted colors are kept
    /// verbatim, so values written by other schema versions survive.
    pub fn from_json(&self, value: &Value) -> Option<StyleValue> {
        match (self.kind, value) {
            (PropertyKind::Number { .. }, Value::Number(n)) => {
                n.as_f64().filter(|n| n.is_finite()).map(StyleValue::Number)
            }
            (PropertyKind::Choice(choices), Value::String(s)) => choices
                .contains(&s.as_str())
                .then(|| StyleValue::Choice(s.clone())),
            (PropertyKind::Flag, Value::Bool(b)) => Some(StyleValue::Flag(*b)),
            (PropertyKind::Color, Value::String(s)) => Some(StyleValue::Color(s.clone())),
            _ => None,
        }
    }

    /// Parses raw control input (slider text, checkbox state, picker value).
    pub fn parse_input(&self, raw: &str) -> Result<StyleValue, DesignerError> {
        let trimmed = raw.trim();
        let invalid = || DesignerError::InvalidInput {
            property: self.name.to_string(),
            raw: raw.to_string(),
        };

        let value = match self.kind {
            PropertyKind::Number { .. } => {
                let n: f64 = trimmed
                    .strip_suffix("px")
                    .unwrap_or(trimmed)
                    .trim()
                    .parse()
                    .map_err(|_| invalid())?;
                StyleValue::Number(n)
            }
            PropertyKind::Flag => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => StyleValue::Flag(true),
                "false" | "no" | "off" | "0" => StyleValue::Flag(false),
                _ => return Err(invalid()),
            },
            PropertyKind::Choice(_) => StyleValue::Choice(trimmed.to_string()),
            PropertyKind::Color => StyleValue::Color(trimmed.to_ascii_lowercase()),
        };

        self.validate(value)
    }

    /// Formats a value for the label next to its control.
    ///
    /// Flags read `Yes`/`No`, pixel numbers carry `px`, unitless numbers and
    /// text are shown as-is.
    pub fn display(&self, value: &StyleValue) -> String {
        match value {
            StyleValue::Flag(true) => "Yes".to_string(),
            StyleValue::Flag(false) => "No".to_string(),
            StyleValue::Number(n) => format!("{}{}", format_number(*n), self.unit.suffix()),
            StyleValue::Choice(text) | StyleValue::Color(text) => text.clone(),
        }
    }
}
