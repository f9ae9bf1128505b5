//! The element tree directives are applied to.
//!
//! The engine does not own a DOM. It reads and writes the host's tree through
//! the [`Document`] trait, which exposes only what a pass needs: the elements
//! inside the body, their attributes, their inline style, and attribute
//! removal.
//!
//! [`HtmlDocument`] is an in-memory implementation used by the markup adapter
//! and the command-line tool, and by tests that need a tree to work on.

mod style;
mod tree;

pub use style::StyleDeclaration;
pub use tree::{HtmlDocument, NodeId, NodeKind};

/// A name/value attribute pair as exposed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, as stored by the host.
    pub name: String,
    /// Attribute value; empty for valueless attributes.
    pub value: String,
}

impl Attribute {
    /// Creates an attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Read/write access to a host element tree.
///
/// # Contract
///
/// - [`body_elements`](Self::body_elements) lists every element strictly inside
///   the body, in document order. The body element itself is not included.
/// - [`attributes`](Self::attributes) lists an element's attributes in the
///   order the host keeps them.
/// - [`remove_attribute`](Self::remove_attribute) is a no-op when the element
///   has no such attribute.
pub trait Document {
    /// Handle to an element of this document.
    type Element: Copy + Eq + std::fmt::Debug;

    /// Returns the elements inside the body, in document order.
    fn body_elements(&self) -> Vec<Self::Element>;

    /// Returns the attributes of an element.
    fn attributes(&self, element: Self::Element) -> Vec<Attribute>;

    /// Sets one property of the element's inline style.
    fn set_style_property(&mut self, element: Self::Element, key: &str, value: &str);

    /// Removes an attribute from the element.
    fn remove_attribute(&mut self, element: Self::Element, name: &str);
}
