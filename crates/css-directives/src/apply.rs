//! Application of resolved directives to elements.

use crate::directive::DirectiveRegistry;
use crate::document::Document;
use crate::resolve::ResolvedDirective;

/// What applying one directive did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Number of style properties written to the element.
    pub properties_set: usize,
    /// Directive names that were not registered and were skipped.
    pub unresolved: Vec<String>,
}

/// Applies a resolved directive to an element's inline style.
///
/// Unknown directive names are skipped rather than reported as errors; they
/// are listed in the returned [`ApplyOutcome`]. For an attach list the named
/// directives are applied in list order, so a later entry overrides a
/// property set by an earlier one.
pub fn apply<D: Document>(
    resolved: &ResolvedDirective,
    element: D::Element,
    document: &mut D,
    registry: &DirectiveRegistry,
) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();

    match resolved {
        ResolvedDirective::Literal { key, value } => {
            document.set_style_property(element, key, value);
            outcome.properties_set += 1;
        }
        ResolvedDirective::Named(name) => {
            apply_named(name, element, document, registry, &mut outcome);
        }
        ResolvedDirective::Attach(names) => {
            for name in names {
                apply_named(name, element, document, registry, &mut outcome);
            }
        }
    }

    outcome
}

fn apply_named<D: Document>(
    name: &str,
    element: D::Element,
    document: &mut D,
    registry: &DirectiveRegistry,
    outcome: &mut ApplyOutcome,
) {
    let Some(styles) = registry.get(name) else {
        outcome.unresolved.push(name.to_string());
        return;
    };

    for (key, value) in styles {
        document.set_style_property(element, key, value);
        outcome.properties_set += 1;
    }
}
