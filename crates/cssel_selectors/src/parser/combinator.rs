use crate::errors::SelectorResult;
use crate::parser::SelectorParser;
use crate::selector::{CombinedSelector, Combinator, ComplexSelector, ParsedSelector, RelativeSelector, Selector};

impl SelectorParser<'_> {
    /// Parses a single selector: compound selectors joined by combinators. In relative mode
    /// the selector may start with a combinator and a [`RelativeSelector`] is returned.
    pub(crate) fn parse_selector(&mut self) -> SelectorResult<ParsedSelector> {
        log::trace!("parse_selector");

        self.cursor.skip_whitespace_and_comment();

        let leading_combinator = if self.config().relative {
            let combinator = self.parse_explicit_combinator().unwrap_or(Combinator::Descendant);
            self.cursor.skip_whitespace_and_comment();
            Some(combinator)
        } else {
            None
        };

        let (compound, mut pseudo_element) = self.parse_compound_selector()?;
        let mut tree = ComplexSelector::Compound(compound);

        loop {
            let mut has_whitespace = self.cursor.skip_whitespace();
            while self.cursor.skip_comment() {
                has_whitespace = self.cursor.skip_whitespace() || has_whitespace;
            }

            // nothing can follow a pseudo-element
            if pseudo_element.is_some() {
                break;
            }

            let Some(peek) = self.cursor.peek() else {
                break;
            };
            if peek.is_comma() {
                break;
            }

            let combinator = match self.parse_explicit_combinator() {
                Some(combinator) => combinator,
                None if has_whitespace => Combinator::Descendant,
                None => break,
            };

            let (right, next_pseudo_element) = self.parse_compound_selector()?;
            pseudo_element = next_pseudo_element;
            tree = ComplexSelector::Combined(Box::new(CombinedSelector {
                left: tree,
                combinator,
                right,
            }));
        }

        let selector = Selector { tree, pseudo_element };
        Ok(match leading_combinator {
            Some(combinator) => ParsedSelector::Relative(RelativeSelector { combinator, selector }),
            None => ParsedSelector::Absolute(selector),
        })
    }

    /// Consumes a `>`, `+` or `~` combinator
    fn parse_explicit_combinator(&mut self) -> Option<Combinator> {
        let combinator = self.cursor.peek().and_then(Combinator::from_value)?;
        self.cursor.advance();
        Some(combinator)
    }
}
