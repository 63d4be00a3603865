//! The style profile: one complete set of property values.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::value::StyleValue;
use crate::error::DesignerError;
use crate::schema::schema;
use crate::tree::MergeReport;

/// A complete set of typed property values for one view configuration.
///
/// A profile always holds every property of the [schema](crate::schema());
/// the only ways to build one are [`StyleProfile::defaults`] and
/// [`StyleProfile::merged`], and [`StyleProfile::set`] only replaces values
/// of known properties after validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleProfile {
    values: BTreeMap<&'static str, StyleValue>,
}

impl StyleProfile {
    /// Creates a profile holding every schema default.
    pub fn defaults() -> Self {
        let values = schema()
            .iter()
            .map(|spec| (spec.name, spec.default_value()))
            .collect();
        Self { values }
    }

    /// Builds a profile from persisted properties layered over the defaults.
    ///
    /// Known properties with a fitting JSON type overwrite the default.
    /// Missing properties keep the default, unknown ones are dropped, and
    /// values of the wrong type fall back to the default. Every such event
    /// is recorded in `report` under `path`.
    pub fn merged(persisted: &Map<String, Value>, path: &str, report: &mut MergeReport) -> Self {
        let mut profile = Self::defaults();

        for spec in schema().iter() {
            match persisted.get(spec.name) {
                Some(raw) => match spec.from_json(raw) {
                    Some(value) => {
                        profile.values.insert(spec.name, value);
                    }
                    None => report.rejected.push(format!("{}.{}", path, spec.name)),
                },
                None => report.backfilled += 1,
            }
        }

        for key in persisted.keys() {
            if !schema().has(key) {
                report.dropped.push(format!("{}.{}", path, key));
            }
        }

        profile
    }

    /// Returns the value of a property, or `None` for unknown names.
    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.values.get(name)
    }

    /// Returns a numeric property, falling back to its schema default.
    pub fn number(&self, name: &str) -> f64 {
        self.get(name)
            .and_then(StyleValue::as_number)
            .or_else(|| default_of(name).and_then(|v| v.as_number()))
            .unwrap_or(0.0)
    }

    /// Returns a flag property, falling back to its schema default.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name)
            .and_then(StyleValue::as_flag)
            .or_else(|| default_of(name).and_then(|v| v.as_flag()))
            .unwrap_or(false)
    }

    /// Returns a choice or color property as text.
    pub fn text(&self, name: &str) -> String {
        self.get(name)
            .and_then(StyleValue::as_text)
            .map(str::to_string)
            .or_else(|| default_of(name).and_then(|v| v.as_text().map(str::to_string)))
            .unwrap_or_default()
    }

    /// Replaces one property after validating it against the schema.
    ///
    /// On error the profile is left unchanged.
    pub fn set(&mut self, name: &str, value: StyleValue) -> Result<(), DesignerError> {
        let spec = schema()
            .get(name)
            .ok_or_else(|| DesignerError::UnknownProperty(name.to_string()))?;
        let value = spec.validate(value)?;
        self.values.insert(spec.name, value);
        Ok(())
    }

    /// Restores every property to its default.
    pub fn reset(&mut self) {
        *self = Self::defaults();
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StyleValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Number of properties held (always the schema size).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self::defaults()
    }
}

fn default_of(name: &str) -> Option<StyleValue> {
    schema().get(name).map(|spec| spec.default_value())
}
