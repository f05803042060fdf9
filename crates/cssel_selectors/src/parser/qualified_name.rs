use cssel_syntax::ComponentValue;

use crate::errors::{type_name, SelectorError, SelectorErrorKind, SelectorResult};
use crate::namespace::Namespace;
use crate::parser::SelectorParser;
use crate::selector::LocalName;

/// A possibly namespace-prefixed name. A missing local name is the `*` wildcard.
#[derive(Debug, PartialEq)]
pub(crate) struct QualifiedName {
    pub namespace: Namespace,
    pub local_name: Option<LocalName>,
}

impl SelectorParser<'_> {
    /// Parses `name`, `ns|name`, `*|name`, `|name` or one of these with a `*` local name.
    ///
    /// Returns `None` without consuming anything when the next token cannot start a
    /// qualified name. Attribute names default to "no namespace" and cannot be a wildcard.
    pub(crate) fn parse_qualified_name(&mut self, is_attribute: bool) -> SelectorResult<Option<QualifiedName>> {
        log::trace!("parse_qualified_name");

        let Some(first) = self.cursor.peek() else {
            return Ok(None);
        };

        let namespace = if let Some(ident) = first.ident() {
            self.cursor.advance();

            if !self.next_is_namespace_separator() {
                let namespace = if is_attribute {
                    Namespace::None
                } else {
                    self.namespaces.default_namespace()
                };

                return Ok(Some(QualifiedName {
                    namespace,
                    local_name: Some(LocalName::new(ident)),
                }));
            }

            // consume '|'
            self.cursor.advance();

            self.namespaces.resolve(ident).ok_or_else(|| {
                SelectorError::new(
                    SelectorErrorKind::UndefinedNamespacePrefix,
                    Some(first),
                    format!("undefined namespace prefix: {ident}"),
                )
            })?
        } else if first.is_delim('*') {
            self.cursor.advance();

            if !self.next_is_namespace_separator() {
                if is_attribute {
                    return Err(SelectorError::new(
                        SelectorErrorKind::ExpectedLocalName,
                        Some(first),
                        format!("expected local name, got {}", first.type_name()),
                    ));
                }

                return Ok(Some(QualifiedName {
                    namespace: self.namespaces.default_namespace(),
                    local_name: None,
                }));
            }

            // consume '|'
            self.cursor.advance();
            Namespace::Any
        } else if first.is_delim('|') {
            self.cursor.advance();
            Namespace::None
        } else {
            return Ok(None);
        };

        // the local name is only consumed once accepted
        let next = self.cursor.peek();
        if let Some(ident) = next.and_then(ComponentValue::ident) {
            self.cursor.advance();
            return Ok(Some(QualifiedName {
                namespace,
                local_name: Some(LocalName::new(ident)),
            }));
        }
        if !is_attribute && next.is_some_and(|value| value.is_delim('*')) {
            self.cursor.advance();
            return Ok(Some(QualifiedName {
                namespace,
                local_name: None,
            }));
        }

        Err(SelectorError::new(
            SelectorErrorKind::ExpectedLocalName,
            next,
            format!("expected local name, got {}", type_name(next)),
        ))
    }

    fn next_is_namespace_separator(&self) -> bool {
        self.cursor.peek().is_some_and(|value| value.is_delim('|'))
    }
}
