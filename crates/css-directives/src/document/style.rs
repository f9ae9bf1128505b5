//! Inline style of a single element.

use crate::format::{declaration_key, property_name};

/// The inline style of an element, keyed by style-property identifier.
///
/// Properties keep the order in which they were first set, the way an
/// element's inline style does in a browser. Setting an existing property
/// replaces its value in place; setting a property to the empty string
/// removes it.
///
/// Keys may be given as identifiers (`textAlign`) or as CSS property names
/// (`text-align`); both address the same property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    properties: Vec<(String, String)>,
}

impl StyleDeclaration {
    /// Creates an empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property. An empty value removes the property instead.
    pub fn set(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.remove(key);
            return;
        }

        let key = declaration_key(key);
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.properties.push((key, value.to_string())),
        }
    }

    /// Returns a property's value.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = declaration_key(key);
        self.properties
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes a property, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let key = declaration_key(key);
        let index = self.properties.iter().position(|(k, _)| *k == key)?;
        Some(self.properties.remove(index).1)
    }

    /// Iterates over `(key, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no property is set.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Writes the declaration as CSS text, e.g. `text-align: center; color: red;`.
    pub fn to_css_text(&self) -> String {
        self.properties
            .iter()
            .map(|(k, v)| format!("{}: {};", property_name(k), v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
