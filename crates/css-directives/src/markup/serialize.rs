use std::fmt::Write;

use quick_xml::escape::escape;

use super::is_void;
use crate::document::{HtmlDocument, NodeId, NodeKind};

/// Writes a document tree back to markup.
///
/// Attribute values are always double-quoted and escaped; an attribute
/// without a value is written as `name=""`. A non-empty inline style is
/// written as the last attribute.
pub fn serialize_document(doc: &HtmlDocument) -> String {
    let mut out = String::new();
    for &child in doc.children(doc.root()) {
        write_node(doc, child, &mut out);
    }
    out
}

fn write_node(doc: &HtmlDocument, id: NodeId, out: &mut String) {
    match doc.kind(id) {
        NodeKind::Root => {
            for &child in doc.children(id) {
                write_node(doc, child, out);
            }
        }
        NodeKind::Element {
            name,
            attributes,
            style,
            self_closing,
        } => {
            out.push('<');
            out.push_str(name);
            for attr in attributes {
                let _ = write!(out, " {}=\"{}\"", attr.name, escape(attr.value.as_str()));
            }
            if !style.is_empty() {
                let _ = write!(out, " style=\"{}\"", escape(style.to_css_text().as_str()));
            }

            let children = doc.children(id);
            if is_void(name) || (*self_closing && children.is_empty()) {
                out.push_str(if *self_closing { "/>" } else { ">" });
                return;
            }

            out.push('>');
            for &child in children {
                write_node(doc, child, out);
            }
            let _ = write!(out, "</{name}>");
        }
        NodeKind::Text(text) => out.push_str(text),
        NodeKind::Comment(body) => {
            let _ = write!(out, "<!--{body}-->");
        }
        NodeKind::Doctype(body) => {
            let _ = write!(out, "<!DOCTYPE {body}>");
        }
        NodeKind::Raw(raw) => out.push_str(raw),
    }
}
