use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::inline_style::parse_inline_style;
use super::open_elements::OpenElements;
use super::{is_void, MarkupError};
use crate::document::{Attribute, HtmlDocument, NodeId, NodeKind, StyleDeclaration};

/// Elements whose content is text up to the matching end tag, never markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Parses markup into a document tree.
///
/// Attribute values are decoded (HTML named entities included); text is kept
/// exactly as written. The content of `script`, `style`, `textarea` and
/// `title` is read as text up to the matching end tag, so a `<` inside a
/// script does not open an element. See the [module docs](super) for how
/// malformed nesting is handled.
pub fn parse_document(source: &str) -> Result<HtmlDocument, MarkupError> {
    let mut doc = HtmlDocument::new();
    let mut open = OpenElements::new(doc.root());
    // Byte offset of `reader`'s input within `source`.
    let mut base = 0;
    let mut reader = reader_for(source);

    loop {
        let position = (base + reader.buffer_position() as usize) as u64;
        let event = reader
            .read_event()
            .map_err(|e| MarkupError::syntax(position, e))?;

        match event {
            Event::Start(start) => {
                let name = lowercase(start.name().as_ref());
                open.close_implied_by(&name);
                let (id, name) = element(&mut doc, &start, false)?;
                doc.append_child(open.current(), id);

                if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    let content_start = base + reader.buffer_position() as usize;
                    let (text, consumed) = raw_text(&source[content_start..], &name);
                    if !text.is_empty() {
                        let child = doc.create_text(text);
                        doc.append_child(id, child);
                    }
                    base = content_start + consumed;
                    reader = reader_for(&source[base..]);
                } else if !is_void(&name) {
                    open.push(id, name);
                }
            }
            Event::Empty(start) => {
                let name = lowercase(start.name().as_ref());
                open.close_implied_by(&name);
                let (id, _) = element(&mut doc, &start, true)?;
                doc.append_child(open.current(), id);
            }
            Event::End(end) => {
                let name = lowercase(end.name().as_ref());
                if !open.close(&name) && !is_void(&name) {
                    tracing::debug!(tag = %name, position, "ignoring unmatched end tag");
                }
            }
            Event::Text(text) => {
                append(&mut doc, &open, NodeKind::Text(lossy(&text).into_owned()));
            }
            Event::Comment(comment) => {
                append(&mut doc, &open, NodeKind::Comment(lossy(&comment).into_owned()));
            }
            Event::DocType(doctype) => {
                let body = lossy(&doctype).trim().to_string();
                append(&mut doc, &open, NodeKind::Doctype(body));
            }
            Event::CData(data) => {
                let raw = format!("<![CDATA[{}]]>", lossy(&data));
                append(&mut doc, &open, NodeKind::Raw(raw));
            }
            Event::Decl(decl) => {
                let raw = format!("<?{}?>", lossy(&decl));
                append(&mut doc, &open, NodeKind::Raw(raw));
            }
            Event::PI(pi) => {
                let raw = format!("<?{}?>", lossy(&pi));
                append(&mut doc, &open, NodeKind::Raw(raw));
            }
            Event::Eof => break,
        }
    }

    Ok(doc)
}

fn reader_for(input: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.check_comments = false;
    config.allow_unmatched_ends = true;
    reader
}

/// Splits the content of a raw text element off `rest`.
///
/// Returns the content and the number of bytes consumed, end tag included.
/// The end tag is matched case-insensitively; without one the content runs
/// to the end of input.
fn raw_text<'a>(rest: &'a str, name: &str) -> (&'a str, usize) {
    let haystack = rest.to_ascii_lowercase();
    let needle = format!("</{name}");
    let mut from = 0;

    while let Some(found) = haystack[from..].find(&needle) {
        let tag_start = from + found;
        let after_name = tag_start + needle.len();
        let terminated = haystack[after_name..]
            .chars()
            .next()
            .map_or(true, |c| c == '>' || c == '/' || c.is_ascii_whitespace());
        if terminated {
            let consumed = haystack[after_name..]
                .find('>')
                .map_or(rest.len(), |gt| after_name + gt + 1);
            return (&rest[..tag_start], consumed);
        }
        from = after_name;
    }

    (rest, rest.len())
}

fn element(
    doc: &mut HtmlDocument,
    start: &BytesStart<'_>,
    self_closing: bool,
) -> Result<(NodeId, String), MarkupError> {
    let name = lowercase(start.name().as_ref());
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut style: Option<StyleDeclaration> = None;

    for attr in start.html_attributes().with_checks(false) {
        let attr = attr.map_err(|e| MarkupError::attribute(name.as_str(), e))?;
        let key = lowercase(attr.key.as_ref());
        let value = attr
            .unescape_value_with(resolve_html5_entity)
            .map_err(|e| MarkupError::attribute(name.as_str(), e))?;

        if key == "style" {
            if style.is_none() {
                style = Some(parse_inline_style(&value));
            }
        } else if !attributes.iter().any(|a| a.name == key) {
            attributes.push(Attribute::new(key, value));
        }
    }

    let id = doc.create_node(NodeKind::Element {
        name: name.clone(),
        attributes,
        style: style.unwrap_or_default(),
        self_closing,
    });
    Ok((id, name))
}

fn append(doc: &mut HtmlDocument, open: &OpenElements, kind: NodeKind) {
    let id = doc.create_node(kind);
    doc.append_child(open.current(), id);
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn lowercase(bytes: &[u8]) -> String {
    lossy(bytes).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_names(doc: &HtmlDocument, parent: NodeId) -> Vec<String> {
        doc.children(parent)
            .iter()
            .filter_map(|&id| doc.tag_name(id).map(str::to_string))
            .collect()
    }

    fn first(doc: &HtmlDocument, tag: &str) -> NodeId {
        doc.descendants(doc.root())
            .into_iter()
            .find(|&id| doc.tag_name(id) == Some(tag))
            .unwrap_or_else(|| panic!("no <{tag}> in document"))
    }

    // =========================================================================
    // Structure tests
    // =========================================================================

    #[test]
    fn test_parse_nesting() {
        let doc = parse_document("<html><body><h1>Title</h1><p>Text</p></body></html>").unwrap();
        let body = doc.body().unwrap();

        assert_eq!(element_names(&doc, body), vec!["h1", "p"]);
    }

    #[test]
    fn test_parse_void_elements_take_no_children() {
        let doc = parse_document("<p>a<br>b<img src=\"x.png\">c</p>").unwrap();
        let p = first(&doc, "p");
        let br = first(&doc, "br");

        assert!(doc.children(br).is_empty());
        assert_eq!(element_names(&doc, p), vec!["br", "img"]);
        assert_eq!(doc.children(p).len(), 5);
    }

    #[test]
    fn test_parse_unmatched_end_tag_is_ignored() {
        let doc = parse_document("<div>a</span>b</div>").unwrap();
        let div = first(&doc, "div");

        assert_eq!(doc.children(div).len(), 2);
    }

    #[test]
    fn test_parse_end_tag_closes_inner_elements() {
        let doc = parse_document("<div><p><em>x</div><span></span>").unwrap();

        assert_eq!(element_names(&doc, doc.root()), vec!["div", "span"]);
    }

    #[test]
    fn test_parse_unclosed_elements_close_at_end() {
        let doc = parse_document("<body><p>open").unwrap();
        let p = first(&doc, "p");

        assert_eq!(doc.parent(p), doc.body());
        assert_eq!(doc.children(p).len(), 1);
    }

    #[test]
    fn test_parse_keeps_text_verbatim() {
        let doc = parse_document("<p>  a &amp; b  </p>").unwrap();
        let p = first(&doc, "p");

        assert_eq!(
            doc.kind(doc.children(p)[0]),
            &NodeKind::Text("  a &amp; b  ".to_string())
        );
    }

    #[test]
    fn test_parse_comment_and_doctype() {
        let doc = parse_document("<!DOCTYPE html><!-- note --><p></p>").unwrap();
        let kinds: Vec<&NodeKind> = doc
            .children(doc.root())
            .iter()
            .map(|&id| doc.kind(id))
            .collect();

        assert_eq!(kinds[0], &NodeKind::Doctype("html".to_string()));
        assert_eq!(kinds[1], &NodeKind::Comment(" note ".to_string()));
    }

    #[test]
    fn test_parse_unclosed_p_closed_by_next_p() {
        let doc = parse_document("<body><p css:center>a<p css:color=\"red\">b</body>").unwrap();
        let body = doc.body().unwrap();

        assert_eq!(element_names(&doc, body), vec!["p", "p"]);
    }

    #[test]
    fn test_parse_block_start_closes_p() {
        let doc = parse_document("<body><p>a<div>b</div></body>").unwrap();
        let body = doc.body().unwrap();

        assert_eq!(element_names(&doc, body), vec!["p", "div"]);
    }

    #[test]
    fn test_parse_unclosed_list_items_are_siblings() {
        let doc = parse_document("<ul><li>a<li>b<ul><li>c</ul><li>d</ul>").unwrap();
        let ul = first(&doc, "ul");

        assert_eq!(element_names(&doc, ul), vec!["li", "li", "li"]);
    }

    // =========================================================================
    // Raw text tests
    // =========================================================================

    #[test]
    fn test_parse_script_content_is_text() {
        let doc = parse_document("<body><script>if (a < b && c) { x(); }</script><p>x</p></body>")
            .unwrap();
        let script = first(&doc, "script");

        assert_eq!(doc.children(script).len(), 1);
        assert_eq!(
            doc.kind(doc.children(script)[0]),
            &NodeKind::Text("if (a < b && c) { x(); }".to_string())
        );
        assert_eq!(element_names(&doc, doc.body().unwrap()), vec!["script", "p"]);
    }

    #[test]
    fn test_parse_script_tag_like_content() {
        let doc = parse_document("<script>document.write('<p>a<b') </SCRIPTX </Script ></script>")
            .unwrap();
        let script = first(&doc, "script");

        assert_eq!(
            doc.kind(doc.children(script)[0]),
            &NodeKind::Text("document.write('<p>a<b') </SCRIPTX ".to_string())
        );
        assert_eq!(doc.children(doc.root()).len(), 1);
    }

    #[test]
    fn test_parse_style_element_content_is_text() {
        let doc = parse_document("<head><style>a > b { color: red }</style></head><body></body>")
            .unwrap();
        let style = first(&doc, "style");

        assert_eq!(
            doc.kind(doc.children(style)[0]),
            &NodeKind::Text("a > b { color: red }".to_string())
        );
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_parse_empty_and_unterminated_raw_text() {
        let doc = parse_document("<title></title><script>a < b").unwrap();

        assert!(doc.children(first(&doc, "title")).is_empty());
        assert_eq!(
            doc.kind(doc.children(first(&doc, "script"))[0]),
            &NodeKind::Text("a < b".to_string())
        );
    }

    // =========================================================================
    // Attribute tests
    // =========================================================================

    #[test]
    fn test_parse_valueless_attribute() {
        let doc = parse_document("<h1 css:center>Hi</h1>").unwrap();
        let h1 = first(&doc, "h1");

        assert_eq!(doc.get_attribute(h1, "css:center"), Some(""));
    }

    #[test]
    fn test_parse_lowercases_names() {
        let doc = parse_document("<DIV ID=\"main\" css:Text-Align=\"left\"></DIV>").unwrap();
        let div = first(&doc, "div");

        assert_eq!(doc.get_attribute(div, "id"), Some("main"));
        assert_eq!(doc.get_attribute(div, "css:text-align"), Some("left"));
    }

    #[test]
    fn test_parse_duplicate_attribute_keeps_first() {
        let doc = parse_document("<p css:color=\"red\" css:color=\"blue\"></p>").unwrap();
        let p = first(&doc, "p");

        assert_eq!(doc.get_attribute(p, "css:color"), Some("red"));
        assert_eq!(doc.attribute_list(p).map(<[Attribute]>::len), Some(1));
    }

    #[test]
    fn test_parse_decodes_attribute_entities() {
        let doc = parse_document("<p title=\"a &amp; b&nbsp;c\"></p>").unwrap();
        let p = first(&doc, "p");

        assert_eq!(doc.get_attribute(p, "title"), Some("a & b\u{a0}c"));
    }

    #[test]
    fn test_parse_style_attribute_into_declaration() {
        let doc = parse_document("<p style=\"color: red; font-size: 2em\" id=\"x\"></p>").unwrap();
        let p = first(&doc, "p");
        let style = doc.style(p).unwrap();

        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("fontSize"), Some("2em"));
        assert!(!doc.has_attribute(p, "style"));
    }
}
