//! Conversion between directive labels and style-property identifiers.
//!
//! Directive labels are written the way CSS properties are written in
//! stylesheets (`background-color`), while an element's live style is keyed
//! by camelCase identifiers (`backgroundColor`). [`format_key`] goes from the
//! first form to the second; [`property_name`] goes back when a style
//! declaration is written out as CSS text.

/// Prefix shared by custom properties, which are never case-converted.
const CUSTOM_PROPERTY_PREFIX: &str = "--";

/// Turns a hyphenated label into a style-property identifier.
///
/// A label without hyphens is returned unchanged. Otherwise the first part is
/// kept verbatim and every following part is capitalized (first character
/// upper-cased, the rest lower-cased). Empty parts contribute nothing, so a
/// trailing hyphen leaves the first part on its own.
///
/// # Example
///
/// ```rust
/// use css_directives::format_key;
///
/// assert_eq!(format_key("color"), "color");
/// assert_eq!(format_key("background-color"), "backgroundColor");
/// assert_eq!(format_key("border-top-width"), "borderTopWidth");
/// assert_eq!(format_key("x-"), "x");
/// ```
pub fn format_key(label: &str) -> String {
    let mut parts = label.split('-');
    let mut key = parts.next().unwrap_or_default().to_string();

    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(&chars.as_str().to_lowercase());
        }
    }

    key
}

/// Turns a style-property identifier back into its CSS property name.
///
/// Every upper-case character starts a new hyphenated part. Custom properties
/// (`--accent`) are returned unchanged.
///
/// # Example
///
/// ```rust
/// use css_directives::property_name;
///
/// assert_eq!(property_name("textAlign"), "text-align");
/// assert_eq!(property_name("borderTopWidth"), "border-top-width");
/// assert_eq!(property_name("--accent"), "--accent");
/// ```
pub fn property_name(key: &str) -> String {
    if key.starts_with(CUSTOM_PROPERTY_PREFIX) {
        return key.to_string();
    }

    let mut name = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            name.push('-');
            name.extend(c.to_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// Turns a CSS property name from a stylesheet into a style-property identifier.
///
/// Same as [`format_key`] except that custom properties pass through untouched.
pub(crate) fn declaration_key(name: &str) -> String {
    if name.starts_with(CUSTOM_PROPERTY_PREFIX) {
        name.to_string()
    } else {
        format_key(name)
    }
}
