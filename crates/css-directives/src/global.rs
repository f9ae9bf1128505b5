//! Process-wide registry and lifecycle.
//!
//! Most embedders want one set of directives for the whole program. These
//! free functions operate on a lazily created registry and orchestrator
//! shared by every caller, so directives can be registered from anywhere
//! before the document is ready.
//!
//! ```rust
//! use css_directives::{global, styles, HtmlDocument};
//!
//! global::register(("center", styles([("textAlign", "center")])));
//! global::init();
//!
//! let mut doc = HtmlDocument::new();
//! let h1 = doc.create_element("h1");
//! doc.append_child(doc.root(), h1);
//! doc.set_attribute(h1, "css:center", "");
//!
//! global::document_ready(&mut doc);
//! assert_eq!(doc.style(h1).unwrap().get("textAlign"), Some("center"));
//! # global::reset();
//! ```
//!
//! A pass runs against a snapshot of the registry taken when
//! [`document_ready`] is called, and no lock is held while it runs, so an
//! unresolved hook may call back into this module.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use crate::config::DirectiveSheet;
use crate::directive::{DirectiveError, DirectiveRegistry, Registration};
use crate::document::Document;
use crate::orchestrator::{Lifecycle, Orchestrator, PassReport, Unresolved};

static REGISTRY: Lazy<Mutex<DirectiveRegistry>> =
    Lazy::new(|| Mutex::new(DirectiveRegistry::new()));

static ORCHESTRATOR: Lazy<Mutex<Orchestrator>> = Lazy::new(|| Mutex::new(Orchestrator::new()));

// Lock poisoning is ignored.
fn registry() -> MutexGuard<'static, DirectiveRegistry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

fn orchestrator() -> MutexGuard<'static, Orchestrator> {
    ORCHESTRATOR.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registers one directive or a batch. See [`DirectiveRegistry::register`].
pub fn register(registration: impl Into<Registration>) {
    registry().register(registration);
}

/// Registers the union of existing directives under a new name.
/// See [`DirectiveRegistry::merge`].
pub fn merge<I, S>(names: I, new_name: &str) -> Result<(), DirectiveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    registry().merge(names, new_name)
}

/// Returns true if a directive is registered under `name`.
pub fn is_registered(name: &str) -> bool {
    registry().is_registered(name)
}

/// Installs a directive sheet into the shared registry.
pub fn install_sheet(sheet: &DirectiveSheet) -> Result<(), DirectiveError> {
    sheet.install(&mut registry())
}

/// Runs `f` with read access to the shared registry.
///
/// The registry stays locked while `f` runs; calling another function of this
/// module from inside `f` deadlocks.
pub fn with_registry<R>(f: impl FnOnce(&DirectiveRegistry) -> R) -> R {
    f(&registry())
}

/// Installs the callback used for unresolved directive names.
pub fn on_unresolved<F>(hook: F)
where
    F: Fn(&Unresolved) + Send + Sync + 'static,
{
    orchestrator().set_hook(Some(Arc::new(hook)));
}

/// Schedules one pass for when the document is ready.
pub fn init() {
    orchestrator().init();
}

/// Returns the shared lifecycle state.
pub fn lifecycle() -> Lifecycle {
    orchestrator().lifecycle()
}

/// Signals that the document is ready, running every scheduled pass.
pub fn document_ready<D: Document>(document: &mut D) -> Vec<PassReport> {
    let mut scheduled = orchestrator().take_scheduled();
    let snapshot = registry().clone();
    scheduled.document_ready(document, &snapshot)
}

/// Clears every registered directive, the schedule, and the hook.
pub fn reset() {
    registry().clear();
    *orchestrator() = Orchestrator::new();
}
