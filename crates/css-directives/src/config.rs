//! Directive sheets: directive definitions loaded from YAML or JSON.
//!
//! A sheet declares named directives and, optionally, directives built by
//! merging others:
//!
//! ```yaml
//! directives:
//!   center: { text-align: center }
//!   red:    { color: red }
//!   big:    { fontSize: 2em, line-height: 1.2 }
//! merge:
//!   - into: title
//!     from: [center, red]
//! ```
//!
//! Property names may be written in CSS form (`text-align`) or as style
//! identifiers (`textAlign`); both end up as `textAlign`. Numbers and booleans
//! are accepted as values and stored as their text.
//!
//! JSON is read by the same YAML parser, so a `.json` sheet works unchanged.
//!
//! # Installation order
//!
//! [`DirectiveSheet::install`] registers all `directives` first, as one bulk
//! registration, then applies the `merge` rules in the order written. A rule
//! can therefore merge the result of an earlier rule.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::directive::{DirectiveError, DirectiveRegistry, StyleMapping};
use crate::format::declaration_key;

/// Errors raised while loading a directive sheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// The sheet file could not be read.
    #[error("failed to read directive sheet '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sheet is not valid YAML.
    #[error("directive sheet syntax error: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// The sheet is valid YAML but does not describe directives.
    #[error(transparent)]
    Directive(#[from] DirectiveError),
}

impl SheetError {
    /// Creates an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A directive built by merging other directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    /// Name of the directive to create.
    pub into: String,
    /// Directives to merge, in order; later ones win.
    pub from: Vec<String>,
}

/// Parsed contents of a directive sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSheet {
    directives: Vec<(String, StyleMapping)>,
    merges: Vec<MergeRule>,
}

impl DirectiveSheet {
    /// Parses a sheet from YAML (or JSON) text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use css_directives::{DirectiveRegistry, DirectiveSheet};
    ///
    /// let sheet = DirectiveSheet::from_yaml_str(
    ///     "directives:\n  center: { text-align: center }\n",
    /// ).unwrap();
    ///
    /// let mut registry = DirectiveRegistry::new();
    /// sheet.install(&mut registry).unwrap();
    /// assert_eq!(registry.get("center").unwrap()["textAlign"], "center");
    /// ```
    pub fn from_yaml_str(source: &str) -> Result<Self, SheetError> {
        let value: Value = serde_yaml::from_str(source)?;
        Ok(Self::from_value(&value)?)
    }

    /// Reads and parses a sheet file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| SheetError::io(path, e))?;
        Self::from_yaml_str(&source)
    }

    /// Builds a sheet from an already parsed YAML value.
    ///
    /// # Errors
    ///
    /// [`DirectiveError::InvalidArgument`] when an entry has the wrong shape,
    /// [`DirectiveError::InvalidValue`] for an unknown section or a blank
    /// merge target.
    pub fn from_value(value: &Value) -> Result<Self, DirectiveError> {
        let mut sheet = Self::default();
        let sections = match value {
            Value::Null => return Ok(sheet),
            Value::Mapping(sections) => sections,
            _ => return Err(DirectiveError::invalid_argument("sheet", "a mapping")),
        };

        for (key, section) in sections {
            let key = key
                .as_str()
                .ok_or_else(|| DirectiveError::invalid_argument("sheet", "keyed by section name"))?;
            match key {
                "directives" => sheet.directives = parse_directives(section)?,
                "merge" => sheet.merges = parse_merges(section)?,
                other => {
                    return Err(DirectiveError::invalid_value(
                        other,
                        "is not a sheet section (expected \"directives\" or \"merge\")",
                    ))
                }
            }
        }

        Ok(sheet)
    }

    /// The named directives, in the order written.
    pub fn directives(&self) -> &[(String, StyleMapping)] {
        &self.directives
    }

    /// The merge rules, in the order written.
    pub fn merges(&self) -> &[MergeRule] {
        &self.merges
    }

    /// Registers the sheet's directives, then applies its merge rules.
    pub fn install(&self, registry: &mut DirectiveRegistry) -> Result<(), DirectiveError> {
        registry.register(self.directives.clone());
        for rule in &self.merges {
            registry.merge(&rule.from, &rule.into)?;
        }
        tracing::debug!(
            directives = self.directives.len(),
            merges = self.merges.len(),
            "installed directive sheet"
        );
        Ok(())
    }
}

fn parse_directives(section: &Value) -> Result<Vec<(String, StyleMapping)>, DirectiveError> {
    let entries = match section {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(entries) => entries,
        _ => {
            return Err(DirectiveError::invalid_argument(
                "directives",
                "a mapping of directive names to styles",
            ))
        }
    };

    let mut directives = Vec::with_capacity(entries.len());
    for (name, styles) in entries {
        let name = scalar_text(name)
            .ok_or_else(|| DirectiveError::invalid_argument("directives", "keyed by directive name"))?;
        let parameter = format!("directives.{}", name);
        let styles = match styles {
            Value::Null => StyleMapping::new(),
            Value::Mapping(properties) => parse_styles(&parameter, properties)?,
            _ => {
                return Err(DirectiveError::invalid_argument(
                    parameter,
                    "a mapping of style properties",
                ))
            }
        };
        directives.push((name, styles));
    }
    Ok(directives)
}

fn parse_styles(parameter: &str, properties: &Mapping) -> Result<StyleMapping, DirectiveError> {
    let mut styles = StyleMapping::new();
    for (property, value) in properties {
        let property = property
            .as_str()
            .ok_or_else(|| DirectiveError::invalid_argument(parameter, "keyed by property name"))?;
        let value = scalar_text(value).ok_or_else(|| {
            DirectiveError::invalid_argument(
                format!("{}.{}", parameter, property),
                "a string, number or boolean",
            )
        })?;
        styles.insert(declaration_key(property), value);
    }
    Ok(styles)
}

fn parse_merges(section: &Value) -> Result<Vec<MergeRule>, DirectiveError> {
    let rules = match section {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(rules) => rules,
        _ => return Err(DirectiveError::invalid_argument("merge", "a list of merge rules")),
    };

    let mut merges = Vec::with_capacity(rules.len());
    for (index, rule) in rules.iter().enumerate() {
        let parameter = format!("merge[{}]", index);
        let rule = rule.as_mapping().ok_or_else(|| {
            DirectiveError::invalid_argument(&parameter, "a mapping with \"into\" and \"from\"")
        })?;

        let into = rule
            .get("into")
            .and_then(Value::as_str)
            .ok_or_else(|| DirectiveError::invalid_argument(format!("{}.into", parameter), "a string"))?;
        if into.trim().is_empty() {
            return Err(DirectiveError::invalid_value(
                format!("{}.into", parameter),
                "must not be an empty string",
            ));
        }

        let from = match rule.get("from") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(names)) => names
                .iter()
                .map(|name| {
                    scalar_text(name).ok_or_else(|| {
                        DirectiveError::invalid_argument(
                            format!("{}.from", parameter),
                            "a list of directive names",
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(DirectiveError::invalid_argument(
                    format!("{}.from", parameter),
                    "a list of directive names",
                ))
            }
        };

        merges.push(MergeRule {
            into: into.to_string(),
            from,
        });
    }
    Ok(merges)
}

/// Returns the text of a scalar value, or `None` for collections and null.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
