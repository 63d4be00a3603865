//! Stylesheet generation.
//!
//! [`compile`] turns a [`ConfigTree`](crate::ConfigTree) into CSS text;
//! [`compile_sheet`] returns the same output as a [`StyleSheet`] that can
//! still be inspected rule by rule.

mod color;
mod compiler;
mod selector;
mod sheet;

pub use color::{hex_to_rgba, ColorParseError, Rgb};
pub use compiler::{compile, compile_sheet, SHEET_HEADER};
pub use selector::{Element, InfoField, Selector, Specificity, Target};
pub use sheet::{Block, Declaration, Diagnostic, Rule, StyleSheet};
