//! Binding of the directive pass to the document-ready signal.
//!
//! # Lifecycle
//!
//! An [`Orchestrator`] starts [`Lifecycle::Uninitialized`]. Each call to
//! [`Orchestrator::init`] registers one continuation and moves it to
//! [`Lifecycle::Scheduled`]; calling `init` twice schedules two passes. When
//! the host reports that the document is ready, [`Orchestrator::document_ready`]
//! runs every scheduled pass, consumes the continuations, and returns to
//! `Uninitialized`.
//!
//! # A pass
//!
//! [`run_pass`] scans the body, and for every marker found resolves it,
//! applies it, and removes the marker attribute. Nothing in a pass fails:
//! unknown directive names are skipped, logged at `debug` level, passed to the
//! optional unresolved hook, and listed in the [`PassReport`].

use std::sync::Arc;

use serde::Serialize;

use crate::apply::apply;
use crate::directive::DirectiveRegistry;
use crate::document::Document;
use crate::resolve::{resolve, ResolvedDirective};
use crate::scan::scan;

/// A directive name that did not resolve during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    /// The marker attribute that referred to the name (`css:attach`).
    pub attribute: String,
    /// The directive name that is not registered.
    pub name: String,
}

/// Callback receiving every unresolved directive name.
pub type UnresolvedHook = Arc<dyn Fn(&Unresolved) + Send + Sync>;

/// Summary of one pass over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Elements inside the body that were visited.
    pub elements_scanned: usize,
    /// Marker attributes processed (and removed).
    pub markers: usize,
    /// Markers applied as a literal property.
    pub literal: usize,
    /// Markers applied as a named directive.
    pub named: usize,
    /// `css:attach` markers.
    pub attached: usize,
    /// Style properties written, counting overwrites.
    pub properties_set: usize,
    /// Directive names that were skipped.
    pub unresolved: Vec<Unresolved>,
}

impl PassReport {
    fn record(&mut self, resolved: &ResolvedDirective) {
        self.markers += 1;
        match resolved {
            ResolvedDirective::Literal { .. } => self.literal += 1,
            ResolvedDirective::Named(_) => self.named += 1,
            ResolvedDirective::Attach(_) => self.attached += 1,
        }
    }
}

/// Runs one scan, resolve, apply and strip pass over the document.
pub fn run_pass<D: Document>(
    document: &mut D,
    registry: &DirectiveRegistry,
    hook: Option<&UnresolvedHook>,
) -> PassReport {
    let span = tracing::debug_span!("directive_pass", directives = registry.len());
    let _guard = span.enter();

    let mut report = PassReport::default();
    let mut cursor = scan(&*document);

    while let Some((marker, element)) = cursor.next_marker(&*document) {
        let resolved = resolve(&marker, registry);
        tracing::trace!(
            attribute = marker.name(),
            kind = resolved.kind(),
            ?element,
            "applying directive"
        );
        report.record(&resolved);

        let outcome = apply(&resolved, element, document, registry);
        report.properties_set += outcome.properties_set;

        for name in outcome.unresolved {
            tracing::debug!(
                attribute = marker.name(),
                directive = %name,
                "skipping unregistered directive"
            );
            let unresolved = Unresolved {
                attribute: marker.name().to_string(),
                name,
            };
            if let Some(hook) = hook {
                hook(&unresolved);
            }
            report.unresolved.push(unresolved);
        }

        document.remove_attribute(element, marker.name());
    }

    report.elements_scanned = cursor.elements_visited();
    tracing::debug!(
        elements = report.elements_scanned,
        markers = report.markers,
        properties = report.properties_set,
        unresolved = report.unresolved.len(),
        "directive pass complete"
    );
    report
}

/// Where an [`Orchestrator`] stands relative to the ready signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// No pass is waiting for the ready signal.
    #[default]
    Uninitialized,
    /// `passes` continuations wait for the ready signal.
    Scheduled { passes: usize },
}

/// Schedules directive passes and runs them when the document is ready.
///
/// # Example
///
/// ```rust
/// use css_directives::{styles, DirectiveRegistry, HtmlDocument, Orchestrator};
///
/// let mut registry = DirectiveRegistry::new();
/// registry.register(("center", styles([("textAlign", "center")])));
///
/// let mut doc = HtmlDocument::new();
/// let body = doc.create_element("body");
/// let h1 = doc.create_element("h1");
/// doc.append_child(doc.root(), body);
/// doc.append_child(body, h1);
/// doc.set_attribute(h1, "css:center", "");
///
/// let mut orchestrator = Orchestrator::new();
/// orchestrator.init();
/// let reports = orchestrator.document_ready(&mut doc, &registry);
///
/// assert_eq!(reports.len(), 1);
/// assert_eq!(doc.style(h1).unwrap().get("textAlign"), Some("center"));
/// assert!(!doc.has_attribute(h1, "css:center"));
/// ```
#[derive(Clone, Default)]
pub struct Orchestrator {
    lifecycle: Lifecycle,
    hook: Option<UnresolvedHook>,
}

impl Orchestrator {
    /// Creates an orchestrator with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a callback for directive names that do not resolve.
    pub fn on_unresolved<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Unresolved) + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Schedules one pass for when the document is ready.
    ///
    /// Returns immediately. Every call schedules another pass.
    pub fn init(&mut self) {
        self.lifecycle = match self.lifecycle {
            Lifecycle::Uninitialized => Lifecycle::Scheduled { passes: 1 },
            Lifecycle::Scheduled { passes } => Lifecycle::Scheduled { passes: passes + 1 },
        };
        tracing::debug!(lifecycle = ?self.lifecycle, "directive pass scheduled");
    }

    /// Returns the current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub(crate) fn set_hook(&mut self, hook: Option<UnresolvedHook>) {
        self.hook = hook;
    }

    /// Moves the scheduled passes into a new orchestrator sharing this one's
    /// hook, leaving this one `Uninitialized`.
    pub(crate) fn take_scheduled(&mut self) -> Self {
        Self {
            lifecycle: std::mem::take(&mut self.lifecycle),
            hook: self.hook.clone(),
        }
    }

    /// Signals that the document is ready, running every scheduled pass.
    ///
    /// Returns one report per pass; nothing runs if `init` was never called.
    pub fn document_ready<D: Document>(
        &mut self,
        document: &mut D,
        registry: &DirectiveRegistry,
    ) -> Vec<PassReport> {
        let passes = match std::mem::take(&mut self.lifecycle) {
            Lifecycle::Uninitialized => 0,
            Lifecycle::Scheduled { passes } => passes,
        };

        (0..passes)
            .map(|_| run_pass(document, registry, self.hook.as_ref()))
            .collect()
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("lifecycle", &self.lifecycle)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
