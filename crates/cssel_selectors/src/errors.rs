//! Error results that can be returned from the selector parser

use cssel_syntax::{ComponentValue, Location};
use thiserror::Error;

/// The reason a selector could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorErrorKind {
    /// Token that cannot appear at this position of a selector list
    UnexpectedToken,
    /// Nothing that can start a compound selector was found
    ExpectedCompoundSelector,
    /// `.` not followed by an identifier
    ExpectedClassName,
    /// `::` not followed by an identifier
    ExpectedPseudoElementName,
    /// Pseudo-element that is not in the supported set
    UnsupportedPseudoElement,
    ExpectedAttributeName,
    ExpectedAttributeOperator,
    ExpectedAttributeValue,
    /// Trailing tokens inside an attribute selector
    ExpectedClosingBracket,
    /// Namespace prefix that is not present in the namespace mapping
    UndefinedNamespacePrefix,
    /// `ns|` not followed by an identifier (or `*` for elements)
    ExpectedLocalName,
    /// Logical combinators nested deeper than the configured maximum
    NestingTooDeep,
}

/// Parser error that defines an error (message) on the given token
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SelectorError {
    pub kind: SelectorErrorKind,
    /// Offending component value, `None` when the end of the input was reached
    pub token: Option<ComponentValue>,
    pub message: String,
    /// Set when the error must invalidate enclosing forgiving lists as well
    pub(crate) escaping: bool,
}

pub type SelectorResult<T> = Result<T, SelectorError>;

impl SelectorError {
    pub fn new(kind: SelectorErrorKind, token: Option<&ComponentValue>, message: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.cloned(),
            message: message.into(),
            escaping: kind == SelectorErrorKind::NestingTooDeep,
        }
    }

    /// Location of the offending token, if any
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.token.as_ref().map(ComponentValue::location)
    }

    /// Marks the error as raised from the argument list of `:not()`.
    #[must_use]
    pub(crate) fn within_negation(mut self) -> Self {
        self.escaping = true;
        self
    }
}

/// Short description of an optional token for use in error messages
pub(crate) fn describe(token: Option<&ComponentValue>) -> String {
    token.map_or_else(|| "EOF".to_string(), ToString::to_string)
}

/// Type name of an optional token for use in error messages
pub(crate) fn type_name(token: Option<&ComponentValue>) -> &'static str {
    token.map_or("EOF", ComponentValue::type_name)
}
