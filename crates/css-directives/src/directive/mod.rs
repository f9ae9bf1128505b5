//! Named directives and their registry.
//!
//! - [`DirectiveRegistry`]: name to style-properties table with register and merge
//! - [`Registration`]: a single or bulk registration request
//! - [`StyleMapping`]: the style properties of one directive
//! - [`DirectiveError`]: errors raised when a request is rejected

mod error;
mod registry;

pub use error::DirectiveError;
pub(crate) use registry::canonical_name;
pub use registry::{styles, DirectiveRegistry, Registration, StyleMapping};
