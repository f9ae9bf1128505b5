//! Parsing of `style` attribute values.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};

use crate::document::StyleDeclaration;

/// Collects `name: value` pairs from a declaration list, keeping each value's
/// source text.
struct InlineDeclarations;

impl<'i> DeclarationParser<'i> for InlineDeclarations {
    type Declaration = (String, String);
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let value = input.slice_from(start).trim().to_string();

        // Property names are ASCII case-insensitive; custom properties are not.
        let name = if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        };
        Ok((name, value))
    }
}

impl<'i> AtRuleParser<'i> for InlineDeclarations {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarations {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, (String, String), ()> for InlineDeclarations {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Parses the value of a `style` attribute.
///
/// Property names become style-property identifiers (`text-align` is stored
/// as `textAlign`). A later declaration of the same property replaces an
/// earlier one. Declarations that cannot be parsed are skipped with a
/// warning.
///
/// # Example
///
/// ```rust
/// use css_directives::parse_inline_style;
///
/// let style = parse_inline_style("text-align: center; COLOR: red; color: blue");
/// assert_eq!(style.get("textAlign"), Some("center"));
/// assert_eq!(style.get("color"), Some("blue"));
/// assert_eq!(style.len(), 2);
/// ```
pub fn parse_inline_style(text: &str) -> StyleDeclaration {
    let mut style = StyleDeclaration::new();
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut declarations = InlineDeclarations;

    for item in RuleBodyParser::new(&mut parser, &mut declarations) {
        match item {
            Ok((name, value)) => style.set(&name, &value),
            Err((error, source)) => {
                tracing::warn!(
                    declaration = source,
                    error = ?error.kind,
                    "skipping unparsable inline style declaration"
                );
            }
        }
    }

    style
}
