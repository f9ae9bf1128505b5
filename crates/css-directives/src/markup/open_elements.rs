//! Stack of open elements, with the implied end tags of HTML.
//!
//! Hand-written HTML leaves `</p>`, `</li>`, `</dd>` and `</dt>` out. When
//! a start tag implies that one of those elements has ended, it is closed
//! before the new element is opened, so
//! `<p>a<p>b` gives two sibling paragraphs rather than nested ones.

use crate::document::NodeId;

/// Start tags that close an open `p`.
const CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div",
    "dl", "dd", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "li", "main", "menu", "nav", "ol", "p", "pre",
    "search", "section", "summary", "table", "ul",
];

/// Elements that bound the search for an open `p`.
const BUTTON_SCOPE: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];

/// Elements that bound the search for an open `li`, `dd` or `dt`.
const LIST_SCOPE: &[&str] = &[
    "applet", "caption", "dl", "html", "marquee", "object", "ol", "table", "td", "template",
    "th", "ul",
];

/// Elements that have been opened but not closed, innermost last.
pub(crate) struct OpenElements {
    root: NodeId,
    stack: Vec<(NodeId, String)>,
}

impl OpenElements {
    pub(crate) fn new(root: NodeId) -> Self {
        Self {
            root,
            stack: Vec::new(),
        }
    }

    /// The node new children are appended to.
    pub(crate) fn current(&self) -> NodeId {
        self.stack.last().map_or(self.root, |(id, _)| *id)
    }

    pub(crate) fn push(&mut self, id: NodeId, name: String) {
        self.stack.push((id, name));
    }

    /// Closes the elements a start tag named `name` implicitly ends.
    pub(crate) fn close_implied_by(&mut self, name: &str) {
        match name {
            "li" => self.close_in_scope(&["li"], LIST_SCOPE),
            "dd" | "dt" => self.close_in_scope(&["dd", "dt"], LIST_SCOPE),
            _ => {}
        }
        if CLOSES_P.contains(&name) {
            self.close_in_scope(&["p"], BUTTON_SCOPE);
        }
    }

    /// Closes the innermost open element named `name` and everything opened
    /// after it. Returns false if no such element is open.
    pub(crate) fn close(&mut self, name: &str) -> bool {
        match self.stack.iter().rposition(|(_, open)| open == name) {
            Some(index) => {
                self.stack.truncate(index);
                true
            }
            None => false,
        }
    }

    fn close_in_scope(&mut self, targets: &[&str], scope: &[&str]) {
        for index in (0..self.stack.len()).rev() {
            let open = self.stack[index].1.as_str();
            if targets.contains(&open) {
                self.stack.truncate(index);
                return;
            }
            if scope.contains(&open) {
                return;
            }
        }
    }
}
