//! Comma separated selector lists.

use std::iter::FusedIterator;

use cssel_syntax::{parse_component_value_list, ComponentValue};

use crate::config::SelectorConfig;
use crate::errors::{SelectorError, SelectorErrorKind, SelectorResult};
use crate::namespace::Namespaces;
use crate::parser::SelectorParser;
use crate::selector::ParsedSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    /// A selector is expected next
    Branch,
    /// A selector was just parsed, a comma or the end of the input is expected
    AfterBranch,
    Done,
}

/// Lazy sequence of the selectors in a comma separated list.
///
/// In strict mode the first error is yielded and the iteration ends. In forgiving mode
/// invalid branches are skipped up to the next comma.
pub struct SelectorList<'a> {
    parser: SelectorParser<'a>,
    state: ListState,
}

impl<'a> SelectorList<'a> {
    pub(crate) fn from_parser(parser: SelectorParser<'a>) -> Self {
        Self {
            parser,
            state: ListState::Branch,
        }
    }

    fn finish(&mut self, err: SelectorError) -> Option<SelectorResult<ParsedSelector>> {
        self.state = ListState::Done;
        Some(Err(err))
    }

    /// Errors inside nested forgiving lists still invalidate the whole selector when they
    /// come from a `:not()` argument list
    fn drops(&self, err: &SelectorError) -> bool {
        self.parser.config().forgiving && !(err.escaping && self.parser.depth() > 0)
    }
}

impl Iterator for SelectorList<'_> {
    type Item = SelectorResult<ParsedSelector>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                ListState::Done => return None,
                ListState::AfterBranch => match self.parser.cursor.advance() {
                    None => self.state = ListState::Done,
                    Some(next) if next.is_comma() => self.state = ListState::Branch,
                    Some(next) => {
                        if self.parser.config().forgiving {
                            log::debug!("ignoring selectors after unexpected {} token", next.type_name());
                            self.state = ListState::Done;
                            continue;
                        }
                        return self.finish(SelectorError::new(
                            SelectorErrorKind::UnexpectedToken,
                            Some(next),
                            format!("unexpected {} token.", next.type_name()),
                        ));
                    }
                },
                ListState::Branch => match self.parser.parse_selector() {
                    Ok(selector) => {
                        self.state = ListState::AfterBranch;
                        return Some(Ok(selector));
                    }
                    Err(err) if self.drops(&err) => {
                        log::debug!("dropping invalid selector: {err}");
                        if !self.parser.cursor.skip_past_comma() {
                            self.state = ListState::Done;
                        }
                    }
                    Err(err) => return self.finish(err),
                },
            }
        }
    }
}

impl FusedIterator for SelectorList<'_> {}

/// Parses a comma separated selector list from component values.
///
/// Nothing is parsed until the returned iterator is advanced.
#[must_use]
pub fn parse<'a>(tokens: &'a [ComponentValue], namespaces: &'a Namespaces, config: SelectorConfig) -> SelectorList<'a> {
    SelectorList::from_parser(SelectorParser::new(tokens, namespaces, config, 0))
}

/// Tokenizes the given string and parses all selectors in it
pub fn parse_str(input: &str, namespaces: &Namespaces, config: SelectorConfig) -> SelectorResult<Vec<ParsedSelector>> {
    let tokens = parse_component_value_list(input);
    parse(&tokens, namespaces, config).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn strict(input: &str) -> SelectorResult<Vec<String>> {
        parse_str(input, &Namespaces::new(), SelectorConfig::default())
            .map(|selectors| selectors.iter().map(ToString::to_string).collect())
    }

    fn forgiving(input: &str) -> Vec<String> {
        parse_str(input, &Namespaces::new(), SelectorConfig::forgiving())
            .map(|selectors| selectors.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn parse_is_lazy() {
        let tokens = parse_component_value_list("a, b, ???");
        let namespaces = Namespaces::new();
        let mut list = parse(&tokens, &namespaces, SelectorConfig::default());

        assert_eq!(list.next().map(|r| r.map(|s| s.to_string())), Some(Ok("a".into())));
        assert_eq!(list.next().map(|r| r.map(|s| s.to_string())), Some(Ok("b".into())));
        assert!(matches!(list.next(), Some(Err(_))));
        assert!(list.next().is_none());
        assert!(list.next().is_none());
    }

    #[test_case("a, b ,c", &["a", "b", "c"]; "simple list")]
    #[test_case(" a > b , .c ", &["a>b", ".c"]; "whitespace around commas")]
    #[test_case("p::before, a", &["p::before", "a"]; "pseudo element branch")]
    fn strict_lists(input: &str, expected: &[&str]) {
        assert_eq!(strict(input), Ok(expected.iter().map(ToString::to_string).collect()));
    }

    #[test_case("", SelectorErrorKind::ExpectedCompoundSelector; "empty")]
    #[test_case("a,", SelectorErrorKind::ExpectedCompoundSelector; "trailing comma")]
    #[test_case("a, ???, b", SelectorErrorKind::ExpectedCompoundSelector; "invalid branch")]
    #[test_case("a::before > b", SelectorErrorKind::UnexpectedToken; "combinator after pseudo element")]
    #[test_case("a)", SelectorErrorKind::UnexpectedToken; "stray paren")]
    fn strict_errors(input: &str, expected: SelectorErrorKind) {
        assert_eq!(strict(input).unwrap_err().kind, expected);
    }

    #[test]
    fn combinator_after_pseudo_element_reports_token() {
        let err = strict("a::before > b").unwrap_err();
        assert!(err.token.as_ref().is_some_and(|token| token.is_delim('>')));
        assert_eq!(err.message, "unexpected delim token.");
    }

    #[test_case("a, ???, b", &["a", "b"]; "invalid middle branch")]
    #[test_case("???, b", &["b"]; "invalid first branch")]
    #[test_case("a, .", &["a"]; "invalid last branch")]
    #[test_case("a) b, c", &["a"]; "trailing token ends list")]
    #[test_case("", &[]; "empty")]
    #[test_case("x, :not(???), y", &["x", "y"]; "negation at top level")]
    fn forgiving_lists(input: &str, expected: &[&str]) {
        assert_eq!(forgiving(input), expected.iter().map(ToString::to_string).collect::<Vec<_>>());
    }

    #[test]
    fn negation_error_fails_strict_is() {
        let err = strict(":is(.a, :not(???))").unwrap_err();
        assert_eq!(err.kind, SelectorErrorKind::ExpectedCompoundSelector);
    }

    #[test]
    fn relative_mode() {
        let config = SelectorConfig {
            relative: true,
            ..SelectorConfig::default()
        };
        let selectors = parse_str("> a, b", &Namespaces::new(), config).unwrap();

        assert!(selectors.iter().all(|s| matches!(s, ParsedSelector::Relative(_))));
        assert_eq!(selectors[0].to_string(), "> a");
        assert_eq!(selectors[1].to_string(), "b");
    }
}
