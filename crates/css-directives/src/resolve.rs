//! Classification of directive attributes.
//!
//! Every marker resolves to exactly one of three forms:
//!
//! | Marker | Resolves to |
//! |--------|-------------|
//! | `css:attach="bold italic"` | [`ResolvedDirective::Attach`] with `["bold", "italic"]` |
//! | `css:center`, `center` registered | [`ResolvedDirective::Named`] `"center"` |
//! | `css:background-color="red"` | [`ResolvedDirective::Literal`] `backgroundColor = red` |
//!
//! A registered name always wins over the literal reading: `css:center="x"`
//! applies the `center` directive and ignores `"x"`.

use crate::directive::{canonical_name, DirectiveRegistry};
use crate::format::format_key;
use crate::scan::MarkerAttribute;

/// What a marker asks the applicator to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDirective {
    /// Set one style property from the attribute itself.
    Literal {
        /// Style-property identifier (already formatted).
        key: String,
        /// The attribute value, untouched.
        value: String,
    },
    /// Apply a registered directive.
    Named(String),
    /// Apply several directives in order. Names are lowercase and may not be
    /// registered; empty names come from repeated spaces.
    Attach(Vec<String>),
}

impl ResolvedDirective {
    /// Short name of the form, for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedDirective::Literal { .. } => "literal",
            ResolvedDirective::Named(_) => "named",
            ResolvedDirective::Attach(_) => "attach",
        }
    }
}

/// Resolves a marker against the registry.
///
/// # Example
///
/// ```rust
/// use css_directives::{resolve, styles, Attribute, DirectiveRegistry, MarkerAttribute, ResolvedDirective};
///
/// let mut registry = DirectiveRegistry::new();
/// registry.register(("center", styles([("textAlign", "center")])));
///
/// let marker = MarkerAttribute::from_attribute(Attribute::new("css:center", "")).unwrap();
/// assert_eq!(resolve(&marker, &registry), ResolvedDirective::Named("center".into()));
///
/// let marker = MarkerAttribute::from_attribute(Attribute::new("css:font-size", "2em")).unwrap();
/// assert_eq!(
///     resolve(&marker, &registry),
///     ResolvedDirective::Literal { key: "fontSize".into(), value: "2em".into() },
/// );
/// ```
pub fn resolve(marker: &MarkerAttribute, registry: &DirectiveRegistry) -> ResolvedDirective {
    if marker.is_attach() {
        return ResolvedDirective::Attach(attach_names(marker.value()));
    }

    let key = format_key(marker.label());
    if registry.is_registered(&key) {
        ResolvedDirective::Named(key)
    } else {
        ResolvedDirective::Literal {
            key,
            value: marker.value().to_string(),
        }
    }
}

/// Splits an attach value into directive names.
///
/// Splits on single spaces without dropping empty segments.
fn attach_names(value: &str) -> Vec<String> {
    canonical_name(value)
        .split(' ')
        .map(str::to_string)
        .collect()
}
