//! Registry of named directives.
//!
//! A directive is a named bundle of style properties. Markup refers to it by
//! name (`css:center`, or as an entry of `css:attach="center red"`), and the
//! applicator copies every property of the bundle onto the element.
//!
//! # Naming
//!
//! Directive names are case-insensitive. They are stored in lowercase and
//! every lookup lowercases the requested name first, so `"Center"`,
//! `"CENTER"` and `"center"` all refer to the same entry.
//!
//! # Example
//!
//! ```rust
//! use css_directives::{styles, DirectiveRegistry};
//!
//! let mut registry = DirectiveRegistry::new();
//! registry.register(("center", styles([("textAlign", "center")])));
//! registry.register(("red", styles([("color", "red")])));
//! registry.merge(["center", "red"], "title").unwrap();
//!
//! let title = registry.get("Title").unwrap();
//! assert_eq!(title.get("textAlign").map(String::as_str), Some("center"));
//! assert_eq!(title.get("color").map(String::as_str), Some("red"));
//! ```

use std::collections::{BTreeMap, HashMap};

use super::error::DirectiveError;

/// Style properties of one directive, keyed by style-property identifier.
pub type StyleMapping = BTreeMap<String, String>;

/// Builds a [`StyleMapping`] from property/value pairs.
///
/// # Example
///
/// ```rust
/// use css_directives::styles;
///
/// let bold = styles([("fontWeight", "bold")]);
/// assert_eq!(bold["fontWeight"], "bold");
/// ```
pub fn styles<I, K, V>(pairs: I) -> StyleMapping
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A request to add directives to a [`DirectiveRegistry`].
///
/// Registration comes in two shapes: a single named directive, or a batch of
/// named directives installed at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// One directive; replaces any previous directive with the same name.
    Single {
        /// Directive name, in any case.
        name: String,
        /// The directive's style properties.
        styles: StyleMapping,
    },
    /// Many directives, merged into the registry entry by entry.
    ///
    /// Entries are applied in order, so when two names differ only in case
    /// the later one wins. Only ordered sources convert into this variant.
    Bulk(Vec<(String, StyleMapping)>),
}

impl<N: Into<String>> From<(N, StyleMapping)> for Registration {
    fn from((name, styles): (N, StyleMapping)) -> Self {
        Registration::Single {
            name: name.into(),
            styles,
        }
    }
}

impl From<BTreeMap<String, StyleMapping>> for Registration {
    fn from(directives: BTreeMap<String, StyleMapping>) -> Self {
        Registration::Bulk(directives.into_iter().collect())
    }
}

impl From<Vec<(String, StyleMapping)>> for Registration {
    fn from(directives: Vec<(String, StyleMapping)>) -> Self {
        Registration::Bulk(directives)
    }
}

/// Mapping from canonical directive name to its style properties.
///
/// The registry is a plain owned value: build one per document (or per test),
/// or use the process-wide instance in [`crate::global`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveRegistry {
    directives: HashMap<String, StyleMapping>,
}

/// Returns the canonical (lowercase) form of a directive name.
pub(crate) fn canonical_name(name: &str) -> String {
    name.to_lowercase()
}

impl DirectiveRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one or many directives.
    ///
    /// Names are lowercased. An existing directive with the same canonical
    /// name is replaced as a whole; its properties are not merged.
    pub fn register(&mut self, registration: impl Into<Registration>) {
        match registration.into() {
            Registration::Single { name, styles } => {
                self.directives.insert(canonical_name(&name), styles);
            }
            Registration::Bulk(directives) => {
                for (name, styles) in directives {
                    self.directives.insert(canonical_name(&name), styles);
                }
            }
        }
    }

    /// Combines existing directives into a new one.
    ///
    /// The named directives are merged left to right, so a property defined by
    /// several of them takes the value from the last one. Names that are not
    /// registered contribute nothing. The result is registered under
    /// `new_name`, replacing any directive already there.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::InvalidValue`] if `new_name` is empty or only
    /// whitespace. The registry is left untouched in that case.
    pub fn merge<I, S>(&mut self, names: I, new_name: &str) -> Result<(), DirectiveError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if new_name.trim().is_empty() {
            return Err(DirectiveError::invalid_value(
                "new_name",
                "must not be an empty string",
            ));
        }

        let mut combined = StyleMapping::new();
        for name in names {
            if let Some(styles) = self.get(name.as_ref()) {
                combined.extend(styles.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        self.register((new_name, combined));
        Ok(())
    }

    /// Returns true if a directive with this name (in any case) is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.directives.contains_key(&canonical_name(name))
    }

    /// Looks up a directive's style properties by name (in any case).
    pub fn get(&self, name: &str) -> Option<&StyleMapping> {
        self.directives.get(&canonical_name(name))
    }

    /// Returns the number of registered directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns true if no directives are registered.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Returns an iterator over the canonical names of all directives.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(|s| s.as_str())
    }

    /// Removes every directive.
    pub fn clear(&mut self) {
        self.directives.clear();
    }
}
