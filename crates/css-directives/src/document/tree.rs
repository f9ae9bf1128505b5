//! Arena-backed in-memory element tree.

use super::style::StyleDeclaration;
use super::{Attribute, Document};

/// Handle to a node of an [`HtmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// What a node of an [`HtmlDocument`] holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document node; parent of all top-level nodes.
    Root,
    /// An element with its attributes and inline style.
    ///
    /// The `style` attribute is not kept in `attributes`; it lives in `style`.
    Element {
        name: String,
        attributes: Vec<Attribute>,
        style: StyleDeclaration,
        /// Written as `<name/>` in the source.
        self_closing: bool,
    },
    /// Character data, kept exactly as written (entities are not decoded).
    Text(String),
    /// Comment body, without the `<!--` and `-->` delimiters.
    Comment(String),
    /// Doctype body, e.g. `html`.
    Doctype(String),
    /// Markup kept verbatim, delimiters included (declarations, processing
    /// instructions, CDATA sections).
    Raw(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An in-memory document tree.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Nodes are never
/// freed; detached nodes simply stop being reachable from the root.
///
/// # Example
///
/// ```rust
/// use css_directives::HtmlDocument;
///
/// let mut doc = HtmlDocument::new();
/// let body = doc.create_element("body");
/// doc.append_child(doc.root(), body);
///
/// let h1 = doc.create_element("h1");
/// doc.set_attribute(h1, "css:center", "");
/// doc.append_child(body, h1);
///
/// assert_eq!(doc.body(), Some(body));
/// assert!(doc.has_attribute(h1, "css:center"));
/// ```
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    nodes: Vec<Node>,
}

impl HtmlDocument {
    /// Creates a document holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Returns the document node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates a detached node.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Creates a detached element with no attributes.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Element {
            name: name.into(),
            attributes: Vec::new(),
            style: StyleDeclaration::new(),
            self_closing: false,
        })
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Text(text.into()))
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|&c| c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Returns what the node holds.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Returns the node's parent, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns the node's children in order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Returns the element's tag name, or `None` for other nodes.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns every node below `id` in document (pre-)order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Returns the first `body` element in document order.
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root()).into_iter().find(|&id| {
            self.tag_name(id)
                .is_some_and(|name| name.eq_ignore_ascii_case("body"))
        })
    }

    /// Returns an attribute's value.
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attribute_list(id)?
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns true if the element has the attribute.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Sets an attribute, replacing the value of an existing one.
    ///
    /// Does nothing if `id` is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind else {
            return;
        };
        match attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => attributes.push(Attribute::new(name, value)),
        }
    }

    /// Removes an attribute, returning its value if it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind else {
            return None;
        };
        let index = attributes.iter().position(|a| a.name == name)?;
        Some(attributes.remove(index).value)
    }

    /// Returns the element's attributes (the `style` attribute excluded).
    pub fn attribute_list(&self, id: NodeId) -> Option<&[Attribute]> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Returns the element's inline style.
    pub fn style(&self, id: NodeId) -> Option<&StyleDeclaration> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { style, .. } => Some(style),
            _ => None,
        }
    }

    /// Returns the element's inline style for modification.
    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut StyleDeclaration> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element { style, .. } => Some(style),
            _ => None,
        }
    }

    fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { .. })
    }
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for HtmlDocument {
    type Element = NodeId;

    /// Without a `body` element the whole tree counts as the body.
    fn body_elements(&self) -> Vec<NodeId> {
        let scope = self.body().unwrap_or_else(|| self.root());
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.is_element(id))
            .collect()
    }

    fn attributes(&self, element: NodeId) -> Vec<Attribute> {
        self.attribute_list(element)
            .map(<[Attribute]>::to_vec)
            .unwrap_or_default()
    }

    fn set_style_property(&mut self, element: NodeId, key: &str, value: &str) {
        if let Some(style) = self.style_mut(element) {
            style.set(key, value);
        }
    }

    fn remove_attribute(&mut self, element: NodeId, name: &str) {
        HtmlDocument::remove_attribute(self, element, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (HtmlDocument, NodeId, NodeId, NodeId) {
        let mut doc = HtmlDocument::new();
        let html = doc.create_element("html");
        let body = doc.create_element("body");
        let div = doc.create_element("div");
        let span = doc.create_element("span");
        doc.append_child(doc.root(), html);
        doc.append_child(html, body);
        doc.append_child(body, div);
        doc.append_child(div, span);
        (doc, body, div, span)
    }

    // =========================================================================
    // Tree structure tests
    // =========================================================================

    #[test]
    fn test_descendants_document_order() {
        let mut doc = HtmlDocument::new();
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let c = doc.create_element("c");
        let d = doc.create_element("d");
        doc.append_child(doc.root(), a);
        doc.append_child(a, b);
        doc.append_child(a, d);
        doc.append_child(b, c);

        assert_eq!(doc.descendants(doc.root()), vec![a, b, c, d]);
    }

    #[test]
    fn test_append_child_moves_node() {
        let mut doc = HtmlDocument::new();
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let c = doc.create_element("c");
        doc.append_child(a, c);
        doc.append_child(b, c);

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[c]);
        assert_eq!(doc.parent(c), Some(b));
    }

    #[test]
    fn test_body_lookup() {
        let (doc, body, _, _) = page();
        assert_eq!(doc.body(), Some(body));
    }

    // =========================================================================
    // Attribute tests
    // =========================================================================

    #[test]
    fn test_set_attribute_replaces_value() {
        let (mut doc, _, div, _) = page();
        doc.set_attribute(div, "id", "one");
        doc.set_attribute(div, "id", "two");

        assert_eq!(doc.get_attribute(div, "id"), Some("two"));
        assert_eq!(doc.attribute_list(div).map(<[Attribute]>::len), Some(1));
    }

    #[test]
    fn test_remove_attribute_twice_is_noop() {
        let (mut doc, _, div, _) = page();
        doc.set_attribute(div, "css:center", "");

        assert_eq!(doc.remove_attribute(div, "css:center"), Some(String::new()));
        assert_eq!(doc.remove_attribute(div, "css:center"), None);
        assert!(!doc.has_attribute(div, "css:center"));
    }

    #[test]
    fn test_text_nodes_have_no_attributes() {
        let mut doc = HtmlDocument::new();
        let text = doc.create_text("hi");
        doc.set_attribute(text, "id", "x");

        assert!(doc.attribute_list(text).is_none());
        assert!(doc.style(text).is_none());
    }

    // =========================================================================
    // Document trait tests
    // =========================================================================

    #[test]
    fn test_body_elements_excludes_body_and_outside() {
        let (mut doc, _, div, span) = page();
        let text = doc.create_text("hello");
        doc.append_child(div, text);

        assert_eq!(doc.body_elements(), vec![div, span]);
    }

    #[test]
    fn test_body_elements_without_body_uses_whole_tree() {
        let mut doc = HtmlDocument::new();
        let p = doc.create_element("p");
        let em = doc.create_element("em");
        doc.append_child(doc.root(), p);
        doc.append_child(p, em);

        assert_eq!(doc.body_elements(), vec![p, em]);
    }

    #[test]
    fn test_set_style_property() {
        let (mut doc, _, div, _) = page();
        doc.set_style_property(div, "color", "red");

        assert_eq!(doc.style(div).and_then(|s| s.get("color")), Some("red"));
    }

    #[test]
    fn test_trait_remove_attribute_absent_is_noop() {
        let (mut doc, _, div, _) = page();
        Document::remove_attribute(&mut doc, div, "css:missing");
        assert!(doc.attributes(div).is_empty());
    }
}
