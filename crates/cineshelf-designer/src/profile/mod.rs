//! Style profiles and their values.
//!
//! - [`StyleValue`]: a typed property value (number, choice, flag, color)
//! - [`StyleProfile`]: a complete, schema-total set of values for one leaf

#[allow(clippy::module_inception)]
mod profile;
mod value;

pub use profile::StyleProfile;
pub use value::StyleValue;
