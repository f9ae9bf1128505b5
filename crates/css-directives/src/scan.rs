//! Discovery of directive attributes in a document.
//!
//! A directive attribute (a *marker*) is any attribute whose name starts with
//! [`DIRECTIVE_PREFIX`]. The scanner walks the elements inside the body in
//! document order and yields every marker of every element, in the order the
//! host keeps the element's attributes.
//!
//! # Snapshots
//!
//! The list of elements is taken when the scan starts. The attributes of an
//! element are taken when the scan reaches that element. [`Scan`] is a cursor
//! that only borrows the document for the duration of each step, so the
//! caller is free to modify the document between steps (which is exactly what
//! a pass does when it strips each marker after applying it).

use crate::document::{Attribute, Document};

/// Prefix that marks an attribute as a directive.
pub const DIRECTIVE_PREFIX: &str = "css:";

/// Label of the directive that lists several named directives.
pub const ATTACH_LABEL: &str = "attach";

/// A directive attribute found on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerAttribute {
    name: String,
    value: String,
}

impl MarkerAttribute {
    /// Creates a marker from an attribute, or returns `None` if the attribute
    /// name does not start with [`DIRECTIVE_PREFIX`].
    ///
    /// The prefix comparison is case-sensitive.
    pub fn from_attribute(attribute: Attribute) -> Option<Self> {
        if !attribute.name.starts_with(DIRECTIVE_PREFIX) {
            return None;
        }
        Some(Self {
            name: attribute.name,
            value: attribute.value,
        })
    }

    /// Full attribute name, prefix included (`css:center`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value, as written.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The name with the prefix stripped (`center`).
    pub fn label(&self) -> &str {
        &self.name[DIRECTIVE_PREFIX.len()..]
    }

    /// Returns true for the `attach` directive, in any case.
    pub fn is_attach(&self) -> bool {
        self.label().to_lowercase() == ATTACH_LABEL
    }
}

/// Cursor over the markers of a document.
///
/// Created by [`scan`]. Call [`next_marker`](Self::next_marker) with the same
/// document until it returns `None`.
#[derive(Debug)]
pub struct Scan<E> {
    elements: std::vec::IntoIter<E>,
    current: Option<E>,
    pending: std::vec::IntoIter<MarkerAttribute>,
    elements_visited: usize,
}

/// Starts a scan of the elements currently inside the document body.
pub fn scan<D: Document>(document: &D) -> Scan<D::Element> {
    Scan {
        elements: document.body_elements().into_iter(),
        current: None,
        pending: Vec::new().into_iter(),
        elements_visited: 0,
    }
}

impl<E: Copy> Scan<E> {
    /// Returns the next marker and the element carrying it.
    pub fn next_marker<D>(&mut self, document: &D) -> Option<(MarkerAttribute, E)>
    where
        D: Document<Element = E>,
    {
        loop {
            if let Some(marker) = self.pending.next() {
                return self.current.map(|element| (marker, element));
            }

            let element = self.elements.next()?;
            self.current = Some(element);
            self.elements_visited += 1;
            self.pending = document
                .attributes(element)
                .into_iter()
                .filter_map(MarkerAttribute::from_attribute)
                .collect::<Vec<_>>()
                .into_iter();
        }
    }

    /// Number of elements the scan has reached so far.
    pub fn elements_visited(&self) -> usize {
        self.elements_visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{HtmlDocument, NodeId};

    fn drain(doc: &HtmlDocument) -> Vec<(String, NodeId)> {
        let mut cursor = scan(doc);
        let mut found = Vec::new();
        while let Some((marker, element)) = cursor.next_marker(doc) {
            found.push((marker.name().to_string(), element));
        }
        found
    }

    // =========================================================================
    // MarkerAttribute tests
    // =========================================================================

    #[test]
    fn test_marker_from_prefixed_attribute() {
        let marker = MarkerAttribute::from_attribute(Attribute::new("css:text-align", "center"))
            .expect("prefixed attribute is a marker");

        assert_eq!(marker.name(), "css:text-align");
        assert_eq!(marker.label(), "text-align");
        assert_eq!(marker.value(), "center");
        assert!(!marker.is_attach());
    }

    #[test]
    fn test_marker_prefix_is_case_sensitive() {
        assert!(MarkerAttribute::from_attribute(Attribute::new("CSS:center", "")).is_none());
        assert!(MarkerAttribute::from_attribute(Attribute::new("class", "x")).is_none());
    }

    #[test]
    fn test_marker_attach_any_case() {
        let lower = MarkerAttribute::from_attribute(Attribute::new("css:attach", "a")).unwrap();
        let mixed = MarkerAttribute::from_attribute(Attribute::new("css:Attach", "a")).unwrap();

        assert!(lower.is_attach());
        assert!(mixed.is_attach());
    }

    // =========================================================================
    // Scan tests
    // =========================================================================

    #[test]
    fn test_scan_document_and_attribute_order() {
        let mut doc = HtmlDocument::new();
        let body = doc.create_element("body");
        let first = doc.create_element("h1");
        let second = doc.create_element("p");
        doc.append_child(doc.root(), body);
        doc.append_child(body, first);
        doc.append_child(body, second);
        doc.set_attribute(first, "css:center", "");
        doc.set_attribute(first, "id", "title");
        doc.set_attribute(first, "css:color", "red");
        doc.set_attribute(second, "css:attach", "bold");

        assert_eq!(
            drain(&doc),
            vec![
                ("css:center".to_string(), first),
                ("css:color".to_string(), first),
                ("css:attach".to_string(), second),
            ]
        );
    }

    #[test]
    fn test_scan_skips_body_itself() {
        let mut doc = HtmlDocument::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body);
        doc.set_attribute(body, "css:center", "");

        assert!(drain(&doc).is_empty());
    }

    #[test]
    fn test_scan_counts_visited_elements() {
        let mut doc = HtmlDocument::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body);
        for _ in 0..3 {
            let p = doc.create_element("p");
            doc.append_child(body, p);
        }

        let mut cursor = scan(&doc);
        while cursor.next_marker(&doc).is_some() {}
        assert_eq!(cursor.elements_visited(), 3);
    }

    #[test]
    fn test_scan_element_list_is_snapshotted() {
        let mut doc = HtmlDocument::new();
        let body = doc.create_element("body");
        let p = doc.create_element("p");
        doc.append_child(doc.root(), body);
        doc.append_child(body, p);
        doc.set_attribute(p, "css:color", "red");

        let mut cursor = scan(&doc);
        let (_, element) = cursor.next_marker(&doc).unwrap();
        assert_eq!(element, p);

        let late = doc.create_element("span");
        doc.set_attribute(late, "css:color", "blue");
        doc.append_child(body, late);

        assert!(cursor.next_marker(&doc).is_none());
    }

    #[test]
    fn test_scan_attribute_list_is_snapshotted_per_element() {
        let mut doc = HtmlDocument::new();
        let body = doc.create_element("body");
        let p = doc.create_element("p");
        doc.append_child(doc.root(), body);
        doc.append_child(body, p);
        doc.set_attribute(p, "css:color", "red");
        doc.set_attribute(p, "css:center", "");

        let mut cursor = scan(&doc);
        let (first, _) = cursor.next_marker(&doc).unwrap();
        assert_eq!(first.name(), "css:color");

        doc.remove_attribute(p, "css:center");

        let (second, _) = cursor.next_marker(&doc).unwrap();
        assert_eq!(second.name(), "css:center");
        assert!(cursor.next_marker(&doc).is_none());
    }
}
