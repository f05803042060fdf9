use std::collections::HashSet;

use cssel_syntax::{BlockKind, ComponentValue, TokenType, MAX_NESTING_DEPTH};
use lazy_static::lazy_static;

use crate::errors::{describe, type_name, SelectorError, SelectorErrorKind, SelectorResult};
use crate::namespace::Namespace;
use crate::parser::SelectorParser;
use crate::selector::{CompoundSelector, SimpleSelector};

lazy_static! {
    /// Pseudo-elements that can be used when matching documents
    static ref SUPPORTED_PSEUDO_ELEMENTS: HashSet<&'static str> = HashSet::from([
        // CSS Pseudo-Elements Module Level 4
        "first-line",
        "first-letter",
        "prefix",
        "postfix",
        "selection",
        "target-text",
        "spelling-error",
        "grammar-error",
        "before",
        "after",
        "marker",
        "placeholder",
        "file-selector-button",
        // CSS Generated Content for Paged Media Module
        "footnote-call",
        "footnote-marker",
        // CSS Scoping Module Level 1
        "content",
        "shadow",
    ]);
}

/// Pseudo-elements that may also be written with a single colon
const LEGACY_PSEUDO_ELEMENTS: [&str; 4] = ["before", "after", "first-line", "first-letter"];

/// Result of parsing a single simple selector
enum Simple {
    Selector(SimpleSelector),
    /// Lowercased pseudo-element name, this ends the compound selector
    PseudoElement(String),
}

impl SelectorParser<'_> {
    /// Parses an optional type selector followed by simple selectors, up to and including
    /// an optional pseudo-element.
    pub(crate) fn parse_compound_selector(&mut self) -> SelectorResult<(CompoundSelector, Option<String>)> {
        log::trace!("parse_compound_selector");

        let type_selectors = self.parse_type_selector()?;
        let has_type_selector = type_selectors.is_some();
        let mut simple_selectors = type_selectors.unwrap_or_default();
        let mut pseudo_element = None;

        while let Some(simple) = self.parse_simple_selector()? {
            match simple {
                Simple::Selector(selector) => simple_selectors.push(selector),
                Simple::PseudoElement(name) => {
                    pseudo_element = Some(name);
                    break;
                }
            }
        }

        if simple_selectors.is_empty() && !has_type_selector && pseudo_element.is_none() {
            let peek = self.cursor.peek();
            return Err(SelectorError::new(
                SelectorErrorKind::ExpectedCompoundSelector,
                peek,
                format!("expected a compound selector, got {}", type_name(peek)),
            ));
        }

        Ok((CompoundSelector { simple_selectors }, pseudo_element))
    }

    /// Parses a type selector into its local name and namespace constraints. `*` yields an
    /// empty list, `None` means there was no type selector at all.
    fn parse_type_selector(&mut self) -> SelectorResult<Option<Vec<SimpleSelector>>> {
        log::trace!("parse_type_selector");

        self.cursor.skip_whitespace();

        let Some(qualified_name) = self.parse_qualified_name(false)? else {
            return Ok(None);
        };

        let mut simple_selectors = Vec::with_capacity(2);
        if let Some(local_name) = qualified_name.local_name {
            simple_selectors.push(SimpleSelector::LocalName(local_name));
        }
        if qualified_name.namespace != Namespace::Any {
            simple_selectors.push(SimpleSelector::Namespace(qualified_name.namespace));
        }

        Ok(Some(simple_selectors))
    }

    /// Parses the next simple selector or pseudo-element. Returns `None` without consuming
    /// anything when the next token does not start one.
    fn parse_simple_selector(&mut self) -> SelectorResult<Option<Simple>> {
        log::trace!("parse_simple_selector");

        let Some(peek) = self.cursor.peek() else {
            return Ok(None);
        };

        if peek.exceeds_nesting() {
            return Err(nesting_too_deep(peek));
        }

        match peek {
            ComponentValue::Token(token) => match &token.token_type {
                TokenType::IDHash(id) => {
                    self.cursor.advance();
                    Ok(Some(Simple::Selector(SimpleSelector::Id(id.clone()))))
                }
                TokenType::Delim('.') => {
                    self.cursor.advance();
                    self.parse_class_selector().map(Some)
                }
                TokenType::Colon => {
                    self.cursor.advance();
                    self.parse_pseudo().map(Some)
                }
                _ => Ok(None),
            },
            ComponentValue::Block {
                kind: BlockKind::Bracket,
                content,
                ..
            } => {
                self.cursor.advance();

                let config = self.config();
                let mut parser = self.nested(content, config, self.depth());
                parser.parse_attribute_selector().map(|attr| Some(Simple::Selector(attr)))
            }
            _ => Ok(None),
        }
    }

    fn parse_class_selector(&mut self) -> SelectorResult<Simple> {
        log::trace!("parse_class_selector");

        let next = self.cursor.peek();
        match next.and_then(ComponentValue::ident) {
            Some(name) => {
                self.cursor.advance();
                Ok(Simple::Selector(SimpleSelector::Class(name.to_string())))
            }
            None => Err(SelectorError::new(
                SelectorErrorKind::ExpectedClassName,
                next,
                format!("Expected a class name, got {}", describe(next)),
            )),
        }
    }

    /// Parses what follows a `:`: a pseudo-element, a pseudo-class or a functional
    /// pseudo-class
    fn parse_pseudo(&mut self) -> SelectorResult<Simple> {
        log::trace!("parse_pseudo");

        let next = self.cursor.peek();
        if next.is_some_and(|value| value.is_colon() || value.ident().is_some() || value.is_function()) {
            self.cursor.advance();
        }

        match next {
            Some(value) if value.is_colon() => self.parse_pseudo_element(),
            Some(value) if value.ident().is_some() => {
                let name = value.lower_value().unwrap_or_default();
                if LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str()) {
                    Ok(Simple::PseudoElement(name))
                } else {
                    Ok(Simple::Selector(SimpleSelector::PseudoClass(name)))
                }
            }
            Some(ComponentValue::Function { name, arguments, .. }) => {
                let name = name.to_ascii_lowercase();
                match name.as_str() {
                    "is" | "where" | "not" | "has" => {
                        self.parse_logical_combination(&name, arguments).map(Simple::Selector)
                    }
                    _ => Ok(Simple::Selector(SimpleSelector::FunctionalPseudoClass {
                        name,
                        arguments: arguments.clone(),
                    })),
                }
            }
            Some(value) if value.exceeds_nesting() => Err(nesting_too_deep(value)),
            _ => Err(SelectorError::new(
                SelectorErrorKind::UnexpectedToken,
                next,
                format!("unexpected {} token.", describe(next)),
            )),
        }
    }

    fn parse_pseudo_element(&mut self) -> SelectorResult<Simple> {
        log::trace!("parse_pseudo_element");

        let next = self.cursor.peek();
        let Some(name) = next.filter(|value| value.ident().is_some()).and_then(ComponentValue::lower_value) else {
            return Err(SelectorError::new(
                SelectorErrorKind::ExpectedPseudoElementName,
                next,
                format!("Expected a pseudo-element name, got {}", describe(next)),
            ));
        };

        self.cursor.advance();

        if !SUPPORTED_PSEUDO_ELEMENTS.contains(name.as_str()) {
            return Err(SelectorError::new(
                SelectorErrorKind::UnsupportedPseudoElement,
                next,
                format!("Expected a supported pseudo-element, got {name}"),
            ));
        }

        Ok(Simple::PseudoElement(name))
    }
}

/// Opening tokens the syntax layer left ungrouped
fn nesting_too_deep(value: &ComponentValue) -> SelectorError {
    SelectorError::new(
        SelectorErrorKind::NestingTooDeep,
        Some(value),
        format!("{} nested deeper than {MAX_NESTING_DEPTH} levels", value.type_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use crate::namespace::Namespaces;
    use crate::selector::LocalName;
    use cssel_syntax::parse_component_value_list;
    use test_case::test_case;

    fn parse_compound(input: &str) -> SelectorResult<(CompoundSelector, Option<String>)> {
        let namespaces = Namespaces::new().with_prefix("svg", "http://www.w3.org/2000/svg");
        let values = parse_component_value_list(input);
        let mut parser = SelectorParser::new(&values, &namespaces, SelectorConfig::default(), 0);
        parser.parse_compound_selector()
    }

    #[test]
    fn type_and_simple_selectors() {
        let (compound, pseudo_element) = parse_compound("DIV#main.nav:hover").unwrap();

        assert_eq!(pseudo_element, None);
        assert_eq!(
            compound.simple_selectors,
            vec![
                SimpleSelector::LocalName(LocalName::new("DIV")),
                SimpleSelector::Id("main".into()),
                SimpleSelector::Class("nav".into()),
                SimpleSelector::PseudoClass("hover".into()),
            ]
        );
        assert_eq!(
            compound.simple_selectors[0],
            SimpleSelector::LocalName(LocalName {
                name: "DIV".into(),
                lower_name: "div".into(),
            })
        );
    }

    #[test]
    fn namespaced_type_selector() {
        let (compound, _) = parse_compound("svg|rect").unwrap();
        assert_eq!(compound.to_string(), "{http://www.w3.org/2000/svg}|rect");

        let (compound, _) = parse_compound("svg|*.a").unwrap();
        assert_eq!(compound.to_string(), "{http://www.w3.org/2000/svg}|*.a");

        let (compound, _) = parse_compound("|rect").unwrap();
        assert_eq!(compound.simple_selectors[1], SimpleSelector::Namespace(Namespace::None));
    }

    #[test]
    fn universal_selector_is_empty_compound() {
        let (compound, pseudo_element) = parse_compound("*").unwrap();
        assert!(compound.simple_selectors.is_empty());
        assert_eq!(pseudo_element, None);
    }

    #[test]
    fn stops_at_combinator() {
        let (compound, _) = parse_compound("a.b > c").unwrap();
        assert_eq!(compound.simple_selectors.len(), 2);
    }

    #[test_case("::before", "before"; "double colon")]
    #[test_case(":before", "before"; "legacy before")]
    #[test_case(":First-Line", "first-line"; "legacy first line")]
    #[test_case("::MARKER", "marker"; "case folded")]
    #[test_case("::file-selector-button", "file-selector-button"; "file selector button")]
    fn pseudo_elements(input: &str, expected: &str) {
        let (compound, pseudo_element) = parse_compound(input).unwrap();
        assert!(compound.simple_selectors.is_empty());
        assert_eq!(pseudo_element.as_deref(), Some(expected));
    }

    #[test]
    fn pseudo_element_ends_compound() {
        let values = parse_component_value_list("p::after.x");
        let namespaces = Namespaces::new();
        let mut parser = SelectorParser::new(&values, &namespaces, SelectorConfig::default(), 0);

        let (compound, pseudo_element) = parser.parse_compound_selector().unwrap();
        assert_eq!(compound.simple_selectors.len(), 1);
        assert_eq!(pseudo_element.as_deref(), Some("after"));
        assert!(parser.cursor.peek().is_some_and(|value| value.is_delim('.')));
    }

    #[test]
    fn functional_pseudo_class_keeps_arguments() {
        let (compound, _) = parse_compound(":NTH-child(2n + 1)").unwrap();
        match &compound.simple_selectors[0] {
            SimpleSelector::FunctionalPseudoClass { name, arguments } => {
                assert_eq!(name, "nth-child");
                assert_eq!(arguments.len(), 5);
            }
            other => panic!("unexpected selector {other:?}"),
        }
        assert_eq!(compound.to_string(), ":nth-child(2n + 1)");
    }

    #[test_case("", SelectorErrorKind::ExpectedCompoundSelector; "empty")]
    #[test_case(">", SelectorErrorKind::ExpectedCompoundSelector; "combinator")]
    #[test_case(".", SelectorErrorKind::ExpectedClassName; "missing class")]
    #[test_case(".#a", SelectorErrorKind::ExpectedClassName; "hash after dot")]
    #[test_case("::", SelectorErrorKind::ExpectedPseudoElementName; "missing pseudo element")]
    #[test_case("::foo", SelectorErrorKind::UnsupportedPseudoElement; "unsupported pseudo element")]
    #[test_case(":'x'", SelectorErrorKind::UnexpectedToken; "string after colon")]
    #[test_case(":", SelectorErrorKind::UnexpectedToken; "colon at end")]
    #[test_case("foo|a", SelectorErrorKind::UndefinedNamespacePrefix; "undefined namespace")]
    fn compound_errors(input: &str, expected: SelectorErrorKind) {
        assert_eq!(parse_compound(input).unwrap_err().kind, expected);
    }

    #[test_case(".,a"; "class")]
    #[test_case(":,a"; "pseudo class")]
    #[test_case("::,a"; "pseudo element")]
    #[test_case("|,a"; "local name")]
    fn errors_leave_comma_unconsumed(input: &str) {
        let values = parse_component_value_list(input);
        let namespaces = Namespaces::new();
        let mut parser = SelectorParser::new(&values, &namespaces, SelectorConfig::default(), 0);

        assert!(parser.parse_compound_selector().is_err());
        assert!(parser.cursor.peek().is_some_and(ComponentValue::is_comma));
    }

    #[test]
    fn ungrouped_function_is_nesting_error() {
        let input = format!("{}a", ":is(".repeat(MAX_NESTING_DEPTH + 1));
        let values = parse_component_value_list(&input);
        let mut current = values.as_slice();
        while let [_, ComponentValue::Function { arguments, .. }] = current {
            current = arguments.as_slice();
        }

        let namespaces = Namespaces::new();
        let mut parser = SelectorParser::new(current, &namespaces, SelectorConfig::default(), 0);
        let err = parser.parse_compound_selector().unwrap_err();
        assert_eq!(err.kind, SelectorErrorKind::NestingTooDeep);
        assert!(err.escaping);
    }

    #[test]
    fn compound_error_messages() {
        assert_eq!(parse_compound("").unwrap_err().message, "expected a compound selector, got EOF");
        assert_eq!(parse_compound("::foo").unwrap_err().message, "Expected a supported pseudo-element, got foo");
        assert_eq!(parse_compound(".").unwrap_err().message, "Expected a class name, got EOF");
    }
}
