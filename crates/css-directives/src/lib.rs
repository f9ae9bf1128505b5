//! # css-directives
//!
//! Declarative inline styling through `css:`-prefixed attributes.
//!
//! Markup authors attach attributes such as `css:center` or
//! `css:background-color="red"` to elements. When the document is ready, one
//! pass turns every such attribute into inline style on its element and
//! removes the attribute.
//!
//! ```html
//! <h1 css:center css:color="teal">Title</h1>
//! <p css:attach="muted small">Fine print</p>
//! ```
//!
//! A marker resolves one of three ways:
//!
//! - `css:attach="a b"` applies the named directives `a` then `b`
//! - `css:<label>` applies the registered directive `<label>` if there is one
//! - otherwise `css:<label>="value"` sets the style property `<label>` to `value`
//!
//! Labels are hyphenated the way CSS properties are written and are converted
//! to style identifiers (`background-color` becomes `backgroundColor`).
//!
//! ## Quick Start
//!
//! ```rust
//! use css_directives::{parse_document, serialize_document, styles, DirectiveRegistry, Orchestrator};
//!
//! let mut registry = DirectiveRegistry::new();
//! registry.register(("center", styles([("textAlign", "center")])));
//! registry.register(("muted", styles([("color", "gray")])));
//!
//! let mut doc = parse_document(
//!     "<body><h1 css:center css:font-size=\"2em\">Hi</h1><p css:attach=\"muted\">x</p></body>",
//! ).unwrap();
//!
//! let mut orchestrator = Orchestrator::new();
//! orchestrator.init();
//! orchestrator.document_ready(&mut doc, &registry);
//!
//! assert_eq!(
//!     serialize_document(&doc),
//!     "<body><h1 style=\"text-align: center; font-size: 2em;\">Hi</h1>\
//!      <p style=\"color: gray;\">x</p></body>",
//! );
//! ```
//!
//! ## Modules
//!
//! - [`directive`]: the registry of named directives
//! - [`document`]: the [`Document`] trait and the in-memory [`HtmlDocument`]
//! - [`scan`], [`resolve`](mod@resolve), [`apply`](mod@apply): the three steps of a pass
//! - [`orchestrator`]: passes bound to the document-ready signal
//! - [`config`]: directive sheets in YAML or JSON
//! - [`markup`]: parsing and writing markup
//! - [`global`]: a process-wide registry and lifecycle
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber. A pass
//! opens a `directive_pass` span at `debug`; each marker is a `trace` event;
//! unregistered directive names are reported at `debug`.

pub mod apply;
pub mod config;
pub mod directive;
pub mod document;
pub mod format;
pub mod global;
pub mod markup;
pub mod orchestrator;
pub mod resolve;
pub mod scan;

pub use apply::{apply, ApplyOutcome};
pub use config::{DirectiveSheet, MergeRule, SheetError};
pub use directive::{styles, DirectiveError, DirectiveRegistry, Registration, StyleMapping};
pub use document::{Attribute, Document, HtmlDocument, NodeId, NodeKind, StyleDeclaration};
pub use format::{format_key, property_name};
pub use markup::{parse_document, parse_inline_style, serialize_document, MarkupError};
pub use orchestrator::{run_pass, Lifecycle, Orchestrator, PassReport, Unresolved, UnresolvedHook};
pub use resolve::{resolve, ResolvedDirective};
pub use scan::{scan, MarkerAttribute, Scan, DIRECTIVE_PREFIX};
