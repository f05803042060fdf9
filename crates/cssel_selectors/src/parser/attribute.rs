use cssel_syntax::TokenType;

use crate::errors::{describe, type_name, SelectorError, SelectorErrorKind, SelectorResult};
use crate::parser::SelectorParser;
use crate::selector::{AttributeOperator, SimpleSelector};

impl SelectorParser<'_> {
    /// Parses the content of a `[]` block: a qualified name, optionally followed by an
    /// operator and an ident or string value.
    pub(crate) fn parse_attribute_selector(&mut self) -> SelectorResult<SimpleSelector> {
        log::trace!("parse_attribute_selector");

        self.cursor.skip_whitespace();

        let Some(qualified_name) = self.parse_qualified_name(true)? else {
            let next = self.cursor.advance();
            return Err(SelectorError::new(
                SelectorErrorKind::ExpectedAttributeName,
                next,
                format!("expected attribute name, got {}", describe(next)),
            ));
        };

        // attribute names always have a local name
        let Some(name) = qualified_name.local_name else {
            return Err(SelectorError::new(
                SelectorErrorKind::ExpectedLocalName,
                None,
                "expected local name, got delim",
            ));
        };

        self.cursor.skip_whitespace();

        let (operator, value) = match self.cursor.peek() {
            None => (None, None),
            Some(peek) => {
                let Some(operator) = AttributeOperator::from_value(peek) else {
                    return Err(SelectorError::new(
                        SelectorErrorKind::ExpectedAttributeOperator,
                        Some(peek),
                        format!("expected attribute selector operator, got {peek}"),
                    ));
                };
                self.cursor.advance();
                self.cursor.skip_whitespace();

                (Some(operator), Some(self.parse_attribute_value()?))
            }
        };

        self.cursor.skip_whitespace();

        if let Some(next) = self.cursor.advance() {
            return Err(SelectorError::new(
                SelectorErrorKind::ExpectedClosingBracket,
                Some(next),
                format!("expected ], got {}", next.type_name()),
            ));
        }

        Ok(SimpleSelector::Attribute {
            namespace: qualified_name.namespace,
            name,
            operator,
            value,
        })
    }

    fn parse_attribute_value(&mut self) -> SelectorResult<String> {
        log::trace!("parse_attribute_value");

        let next = self.cursor.advance();
        match next.and_then(|value| value.token_type()) {
            Some(TokenType::Ident(value) | TokenType::QuotedString(value)) => Ok(value.clone()),
            _ => Err(SelectorError::new(
                SelectorErrorKind::ExpectedAttributeValue,
                next,
                format!("expected attribute value, got {}", type_name(next)),
            )),
        }
    }
}
