//! The compiled stylesheet in structured form.

use std::fmt::Write as _;

use super::selector::{Element, Selector};
use crate::axis::{LeafKey, Scope};

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
    pub important: bool,
}

/// A selector with its declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: Selector,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            declarations: Vec::new(),
        }
    }

    /// Appends an `!important` declaration, returning the rule for chaining.
    pub fn set(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration {
            property,
            value: value.into(),
            important: true,
        });
        self
    }

    /// Returns the last value this rule sets for `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }
}

/// The rules generated for one leaf, with a heading comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub scope: Scope,
    pub leaf: LeafKey,
    pub comment: String,
    pub rules: Vec<Rule>,
}

/// Something the compiler had to work around while compiling a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub scope: Scope,
    pub leaf: LeafKey,
    pub property: &'static str,
    pub message: String,
}

/// A compiled stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub header: String,
    pub blocks: Vec<Block>,
    pub diagnostics: Vec<Diagnostic>,
}

impl StyleSheet {
    /// Iterates every rule in source order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.blocks.iter().flat_map(|block| block.rules.iter())
    }

    /// Returns the block compiled for one leaf.
    pub fn block(&self, scope: Scope, leaf: LeafKey) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|block| block.scope == scope && block.leaf == leaf)
    }

    /// Resolves the cascade for one property on one element.
    ///
    /// Among declarations of `property` in rules matching `element`, the
    /// winner is the one with the highest importance, then specificity,
    /// then source position.
    pub fn winning_value(&self, element: &Element, property: &str) -> Option<&str> {
        self.rules()
            .enumerate()
            .filter(|(_, rule)| rule.selector.matches(element))
            .flat_map(|(position, rule)| {
                let specificity = rule.selector.specificity();
                rule.declarations
                    .iter()
                    .filter(move |d| d.property == property)
                    .map(move |d| ((d.important, specificity, position), d.value.as_str()))
            })
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, value)| value)
    }

    /// Renders the stylesheet as CSS text.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let _ = writeln!(css, "/* {} */", self.header);
        css.push('\n');

        for block in &self.blocks {
            let _ = writeln!(css, "\n/* {} */", block.comment);
            for rule in &block.rules {
                let _ = writeln!(css, "{} {{", rule.selector);
                for d in &rule.declarations {
                    let important = if d.important { " !important" } else { "" };
                    let _ = writeln!(css, "    {}: {}{};", d.property, d.value, important);
                }
                css.push_str("}\n\n");
            }
        }

        css
    }
}

impl std::fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}
