//! Reading and writing markup.
//!
//! [`parse_document`] builds an [`HtmlDocument`](crate::HtmlDocument) from
//! XHTML-style markup and [`serialize_document`] writes one back. The parser
//! is lenient in the ways hand-written HTML needs:
//!
//! - attributes may have no value (`<h1 css:center>`)
//! - void elements such as `<br>` and `<img>` need no end tag
//! - an end tag with no matching open element is ignored
//! - elements still open at the end of input are closed there
//! - a start tag closes a `p`, `li`, `dd` or `dt` it implicitly ends, so
//!   `<p>a<p>b` gives two paragraphs
//! - the content of `script`, `style`, `textarea` and `title` is text, kept
//!   as written up to the matching end tag
//!
//! Element and attribute names are lower-cased. An existing `style` attribute
//! is parsed into the element's [`StyleDeclaration`](crate::StyleDeclaration),
//! so directive output and hand-written inline style end up in one place.
//!
//! # Example
//!
//! ```rust
//! use css_directives::{parse_document, serialize_document};
//!
//! let doc = parse_document("<body><p style=\"color: red\">hi<br></p></body>").unwrap();
//! assert_eq!(
//!     serialize_document(&doc),
//!     "<body><p style=\"color: red;\">hi<br></p></body>",
//! );
//! ```

mod inline_style;
mod open_elements;
mod parse;
mod serialize;

pub use inline_style::parse_inline_style;
pub use parse::parse_document;
pub use serialize::serialize_document;

/// Elements that never have content or an end tag.
pub(crate) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub(crate) fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Errors raised while reading markup.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// The tokenizer could not make sense of the input.
    #[error("malformed markup at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// An attribute of an element could not be read.
    #[error("malformed attribute on <{element}>: {source}")]
    Attribute {
        element: String,
        #[source]
        source: quick_xml::Error,
    },
}

impl MarkupError {
    pub fn syntax(position: u64, source: impl Into<quick_xml::Error>) -> Self {
        Self::Syntax {
            position,
            source: source.into(),
        }
    }

    pub fn attribute(element: impl Into<String>, source: impl Into<quick_xml::Error>) -> Self {
        Self::Attribute {
            element: element.into(),
            source: source.into(),
        }
    }
}
