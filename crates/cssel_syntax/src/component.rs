//! Component values as described in
//! [§ 5.3.5 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value).
//!
//! A component value is either a preserved token, a function with its arguments or a
//! simple block with its content. Selector parsing only ever works on these values.

use std::fmt;

use crate::location::Location;
use crate::stream::CharStream;
use crate::tokenizer::{Token, TokenType, Tokenizer};

/// Deepest level of nested blocks and functions that is grouped. Opening tokens below it are
/// kept as plain tokens so hostile input cannot exhaust the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The opening token of a simple block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `( ... )`
    Paren,
    /// `[ ... ]`
    Bracket,
    /// `{ ... }`
    Curly,
}

impl BlockKind {
    fn open(self) -> char {
        match self {
            BlockKind::Paren => '(',
            BlockKind::Bracket => '[',
            BlockKind::Curly => '{',
        }
    }

    fn close(self) -> char {
        match self {
            BlockKind::Paren => ')',
            BlockKind::Bracket => ']',
            BlockKind::Curly => '}',
        }
    }

    fn closing_token(self) -> TokenType {
        match self {
            BlockKind::Paren => TokenType::RParen,
            BlockKind::Bracket => TokenType::RBracket,
            BlockKind::Curly => TokenType::RCurly,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// A preserved token
    Token(Token),
    /// A function token together with everything up to its matching `)`
    Function {
        name: String,
        arguments: Vec<ComponentValue>,
        location: Location,
    },
    /// A simple block together with everything up to its matching close token
    Block {
        kind: BlockKind,
        content: Vec<ComponentValue>,
        location: Location,
    },
}

impl ComponentValue {
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            ComponentValue::Token(token) => &token.location,
            ComponentValue::Function { location, .. } | ComponentValue::Block { location, .. } => location,
        }
    }

    /// Returns the token type when this value is a preserved token
    #[must_use]
    pub fn token_type(&self) -> Option<&TokenType> {
        match self {
            ComponentValue::Token(token) => Some(&token.token_type),
            _ => None,
        }
    }

    /// Short name of the kind of value, used in error messages
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentValue::Function { .. } => "function",
            ComponentValue::Block { kind: BlockKind::Paren, .. } => "() block",
            ComponentValue::Block { kind: BlockKind::Bracket, .. } => "[] block",
            ComponentValue::Block { kind: BlockKind::Curly, .. } => "{} block",
            ComponentValue::Token(token) => match token.token_type {
                TokenType::AtKeyword(_) => "at-keyword",
                TokenType::Ident(_) => "ident",
                TokenType::Function(_) => "function",
                TokenType::Dimension { .. } => "dimension",
                TokenType::Percentage(_) => "percentage",
                TokenType::Number(_) => "number",
                TokenType::QuotedString(_) => "string",
                TokenType::BadString(_) => "bad-string",
                TokenType::Whitespace => "whitespace",
                TokenType::Hash(_) | TokenType::IDHash(_) => "hash",
                TokenType::Delim(_) => "delim",
                TokenType::IncludeMatch
                | TokenType::DashMatch
                | TokenType::PrefixMatch
                | TokenType::SuffixMatch
                | TokenType::SubstringMatch => "match",
                TokenType::Column => "column",
                TokenType::LCurly | TokenType::LParen | TokenType::LBracket => "opening bracket",
                TokenType::RCurly | TokenType::RParen | TokenType::RBracket => "closing bracket",
                TokenType::Comma => "comma",
                TokenType::Colon => "colon",
                TokenType::Semicolon => "semicolon",
                TokenType::Eof => "EOF",
                TokenType::Comment(_) => "comment",
            },
        }
    }

    /// Returns the value of an ident token
    #[must_use]
    pub fn ident(&self) -> Option<&str> {
        match self.token_type() {
            Some(TokenType::Ident(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the ASCII-lowercased value of an ident, function or at-keyword
    #[must_use]
    pub fn lower_value(&self) -> Option<String> {
        match self {
            ComponentValue::Function { name, .. } => Some(name.to_ascii_lowercase()),
            ComponentValue::Token(token) => match &token.token_type {
                TokenType::Ident(value) | TokenType::AtKeyword(value) | TokenType::Function(value) => {
                    Some(value.to_ascii_lowercase())
                }
                _ => None,
            },
            ComponentValue::Block { .. } => None,
        }
    }

    #[must_use]
    pub fn is_delim(&self, delim: char) -> bool {
        matches!(self, ComponentValue::Token(token) if token.is_delim(delim))
    }

    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, ComponentValue::Token(token) if token.is_whitespace())
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self, ComponentValue::Token(token) if token.is_comment())
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self, ComponentValue::Function { .. })
    }

    /// Returns true for an opening token that was not grouped because it is nested deeper
    /// than [`MAX_NESTING_DEPTH`]
    #[must_use]
    pub fn exceeds_nesting(&self) -> bool {
        matches!(
            self.token_type(),
            Some(TokenType::Function(_) | TokenType::LParen | TokenType::LBracket | TokenType::LCurly)
        )
    }

    #[must_use]
    pub fn is_comma(&self) -> bool {
        matches!(self.token_type(), Some(TokenType::Comma))
    }

    #[must_use]
    pub fn is_colon(&self) -> bool {
        matches!(self.token_type(), Some(TokenType::Colon))
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::Token(token) => write!(f, "{token}"),
            ComponentValue::Function { name, arguments, .. } => {
                write!(f, "{name}(")?;
                for value in arguments {
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
            ComponentValue::Block { kind, content, .. } => {
                write!(f, "{}", kind.open())?;
                for value in content {
                    write!(f, "{value}")?;
                }
                write!(f, "{}", kind.close())
            }
        }
    }
}

/// Tokenizes the input and groups the tokens into component values.
///
/// Blocks and functions that are not closed before the end of the input are closed
/// implicitly. Closing tokens without a matching opening token are kept as tokens.
#[must_use]
pub fn parse_component_value_list(input: &str) -> Vec<ComponentValue> {
    let mut stream = CharStream::new();
    stream.read_from_str(input);

    let mut tokenizer = Tokenizer::new(&mut stream, Location::default());
    consume_list(&mut tokenizer, None, 0)
}

/// Consumes component values until the given closing token (consumed) or the end of input
fn consume_list(tokenizer: &mut Tokenizer, until: Option<&TokenType>, depth: usize) -> Vec<ComponentValue> {
    log::trace!("consume_list: {depth}");

    let mut values = Vec::new();

    loop {
        let token = tokenizer.consume();

        if token.is_eof() {
            return values;
        }
        if until == Some(&token.token_type) {
            return values;
        }

        values.push(consume_component_value(tokenizer, token, depth));
    }
}

/// 5.4.7. [Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
fn consume_component_value(tokenizer: &mut Tokenizer, token: Token, depth: usize) -> ComponentValue {
    if depth >= MAX_NESTING_DEPTH {
        return ComponentValue::Token(token);
    }

    let kind = match token.token_type {
        TokenType::LParen => BlockKind::Paren,
        TokenType::LBracket => BlockKind::Bracket,
        TokenType::LCurly => BlockKind::Curly,
        TokenType::Function(name) => {
            let arguments = consume_list(tokenizer, Some(&TokenType::RParen), depth + 1);
            return ComponentValue::Function {
                name,
                arguments,
                location: token.location,
            };
        }
        _ => return ComponentValue::Token(token),
    };

    let content = consume_list(tokenizer, Some(&kind.closing_token()), depth + 1);
    ComponentValue::Block {
        kind,
        content,
        location: token.location,
    }
}
