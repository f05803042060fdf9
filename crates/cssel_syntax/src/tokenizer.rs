use crate::location::Location;
use crate::stream::Character::Ch;
use crate::stream::{CharStream, Character};
use crate::unicode::UnicodeChar;
use std::fmt;

pub type Number = f32;

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// A [`<at-keyword-token>`](https://drafts.csswg.org/css-syntax/#at-keyword-token-diagram)
    ///
    /// The value does not include the `@` marker.
    AtKeyword(String),
    Ident(String),
    Function(String),
    Dimension {
        value: Number,
        unit: String,
    },
    Percentage(Number),
    Number(Number),
    /// A [`<string-token>`](https://drafts.csswg.org/css-syntax/#string-token-diagram)
    ///
    /// The value does not include the quotes.
    QuotedString(String),
    /// A `<bad-string-token>`
    ///
    /// This token always indicates a parse error.
    BadString(String),
    /// A [`<whitespace-token>`](https://drafts.csswg.org/css-syntax/#whitespace-token-diagram)
    Whitespace,
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "unrestricted"
    ///
    /// The value does not include the `#` marker.
    Hash(String),
    /// A [`<hash-token>`](https://drafts.csswg.org/css-syntax/#hash-token-diagram) with the type flag set to "id"
    ///
    /// The value does not include the `#` marker.
    ///
    /// Hash that is a valid ID selector.
    IDHash(String),
    /// A `<delim-token>`
    Delim(char),
    /// A `~=` `<include-match-token>`
    IncludeMatch,
    /// A `|=` `<dash-match-token>`
    DashMatch,
    /// A `^=` `<prefix-match-token>`
    PrefixMatch,
    /// A `$=` `<suffix-match-token>`
    SuffixMatch,
    /// A `*=` `<substring-match-token>`
    SubstringMatch,
    /// A `||` `<column-token>`
    Column,
    /// A `<{-token>`
    LCurly,
    /// A `<}-token>`
    RCurly,
    /// A `<(-token>`
    LParen,
    /// A `<)-token>`
    RParen,
    /// A `<[-token>`
    LBracket,
    /// A `<]-token>`
    RBracket,
    /// A `<comma-token>`
    Comma,
    /// A `:` `<colon-token>`
    Colon,
    /// A `;` `<semicolon-token>`
    Semicolon,
    // A `<EOF-token>`
    Eof,
    /// A comment, without the `/*` and `*/` markers
    Comment(String),
}

#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    /// Type of the token
    pub token_type: TokenType,
    /// Location of the token in the stream
    pub location: Location,
}

impl Token {
    /// Returns a new token for the given type on the given location
    #[must_use]
    pub fn new(token_type: TokenType, location: Location) -> Token {
        Token {
            token_type,
            location,
        }
    }

    fn new_delim(c: char, location: Location) -> Token {
        Token::new(TokenType::Delim(c), location)
    }

    fn new_id_hash(value: &str, location: Location) -> Token {
        Token::new(TokenType::IDHash(value.to_string()), location)
    }

    fn new_hash(value: &str, location: Location) -> Token {
        Token::new(TokenType::Hash(value.to_string()), location)
    }

    fn new_atkeyword(keyword: &str, location: Location) -> Token {
        Token::new(TokenType::AtKeyword(keyword.to_string()), location)
    }

    fn new_number(value: Number, location: Location) -> Token {
        Token::new(TokenType::Number(value), location)
    }

    fn new_percentage(value: Number, location: Location) -> Token {
        Token::new(TokenType::Percentage(value), location)
    }

    fn new_dimension(value: Number, unit: &str, location: Location) -> Token {
        Token::new(
            TokenType::Dimension {
                value,
                unit: unit.to_string(),
            },
            location,
        )
    }

    fn new_ident(value: &str, location: Location) -> Token {
        Token::new(TokenType::Ident(value.to_string()), location)
    }

    fn new_function(value: &str, location: Location) -> Token {
        Token::new(TokenType::Function(value.to_string()), location)
    }

    fn new_quoted_string(value: &str, location: Location) -> Token {
        Token::new(TokenType::QuotedString(value.to_string()), location)
    }

    fn new_bad_string(value: &str, location: Location) -> Token {
        Token::new(TokenType::BadString(value.to_string()), location)
    }
}

impl Token {
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self.token_type, TokenType::Eof)
    }

    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(self.token_type, TokenType::Whitespace)
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self.token_type, TokenType::Comment(_))
    }

    #[must_use]
    pub fn is_delim(&self, delim: char) -> bool {
        matches!(self.token_type, TokenType::Delim(c) if c == delim)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token_type {
            TokenType::AtKeyword(val) => write!(f, "@{val}"),
            TokenType::Ident(val) => write!(f, "{val}"),
            TokenType::Function(val) => write!(f, "{val}("),
            TokenType::Hash(val) | TokenType::IDHash(val) => write!(f, "#{val}"),
            TokenType::QuotedString(val) | TokenType::BadString(val) => {
                write!(f, "\"{}\"", val.replace('\\', "\\\\").replace('"', "\\\""))
            }
            TokenType::Comment(val) => write!(f, "/*{val}*/"),
            TokenType::Delim(val) => write!(f, "{val}"),
            TokenType::Number(val) => write!(f, "{val}"),
            TokenType::Percentage(val) => write!(f, "{val}%"),
            TokenType::Dimension { unit, value } => write!(f, "{value}{unit}"),
            TokenType::IncludeMatch => write!(f, "~="),
            TokenType::DashMatch => write!(f, "|="),
            TokenType::PrefixMatch => write!(f, "^="),
            TokenType::SuffixMatch => write!(f, "$="),
            TokenType::SubstringMatch => write!(f, "*="),
            TokenType::Column => write!(f, "||"),
            TokenType::Colon => write!(f, ":"),
            TokenType::Semicolon => write!(f, ";"),
            TokenType::Comma => write!(f, ","),
            TokenType::LBracket => write!(f, "["),
            TokenType::RBracket => write!(f, "]"),
            TokenType::LCurly => write!(f, "{{"),
            TokenType::RCurly => write!(f, "}}"),
            TokenType::LParen => write!(f, "("),
            TokenType::RParen => write!(f, ")"),
            TokenType::Whitespace => write!(f, " "),
            TokenType::Eof => Ok(()),
        }
    }
}

/// CSS Tokenizer according to the [w3 specification](https://www.w3.org/TR/css-syntax-3/#tokenization)
///
/// Comments are not dropped: they are returned as [`TokenType::Comment`] so that consumers
/// can decide whether they are significant.
pub struct Tokenizer<'stream> {
    stream: &'stream mut CharStream,
    /// Position on the NEXT read to consume. If it's outside the vec list, a new token is produced
    position: usize,
    /// Full list of all tokens produced by the tokenizer
    tokens: Vec<Token>,
    /// Start position of the stream (this does not have to be 1/1)
    start_location: Location,
    /// Current position of the stream, to get the absolute position, we must add start_location to it
    cur_location: Location,
}

impl<'stream> Tokenizer<'stream> {
    /// Creates a new tokenizer with the given stream that starts on the given location. This does not have
    /// to be 1/1, but can be any location.
    pub fn new(stream: &'stream mut CharStream, location: Location) -> Self {
        Self {
            stream,
            position: 0,
            tokens: Vec::new(),
            start_location: location,
            cur_location: Location::default(),
        }
    }

    /// Returns the current location and takes the start location into account
    #[must_use]
    pub fn current_location(&self) -> Location {
        let column = if self.cur_location.line == 1 {
            self.start_location.column + self.cur_location.column - 1
        } else {
            self.cur_location.column
        };

        Location::new(
            self.start_location.line + self.cur_location.line - 1,
            column,
            self.start_location.offset + self.cur_location.offset,
        )
    }

    /// Returns true when there is no next element, and the stream is exhausted
    #[must_use]
    pub fn eof(&self) -> bool {
        self.stream.eof() && self.position >= self.tokens.len()
    }

    /// Looks ahead at the token with offset. So lookahead(0) will look at the token that
    /// will be returned by the next consume()
    pub fn lookahead(&mut self, offset: usize) -> Token {
        while self.tokens.len() <= self.position + offset {
            let token = self.consume_token();
            self.tokens.push(token);
        }

        self.tokens[self.position + offset].clone()
    }

    /// Consumes the next token and returns it
    pub fn consume(&mut self) -> Token {
        let token = self.lookahead(0);
        self.position += 1;

        log::trace!("{:?}", token);

        token
    }

    /// Reconsumes will push the current position back so the next read will be the same token
    pub fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// 4.3.1. [Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Token {
        let loc = self.current_location();

        if self.look_ahead_slice(2) == "/*" {
            let comment = self.consume_comment();
            return Token::new(TokenType::Comment(comment), loc);
        }

        match self.current_char() {
            Character::StreamEnd => Token::new(TokenType::Eof, loc),
            c if c.is_whitespace() => {
                self.consume_whitespace();
                Token::new(TokenType::Whitespace, loc)
            }
            Ch('"' | '\'') => self.consume_string_token(),
            Ch(c @ '#') => {
                // consume '#'
                self.next_char();

                if self.is_ident_char(self.current_char().into()) || self.is_start_of_escape(0) {
                    return if self.is_next_3_points_starts_ident_seq(0) {
                        Token::new_id_hash(self.consume_ident().as_str(), loc)
                    } else {
                        Token::new_hash(self.consume_ident().as_str(), loc)
                    };
                }

                Token::new_delim(c, loc)
            }
            Ch(')') => self.consume_single(TokenType::RParen, loc),
            Ch('(') => self.consume_single(TokenType::LParen, loc),
            Ch('[') => self.consume_single(TokenType::LBracket, loc),
            Ch(']') => self.consume_single(TokenType::RBracket, loc),
            Ch('{') => self.consume_single(TokenType::LCurly, loc),
            Ch('}') => self.consume_single(TokenType::RCurly, loc),
            Ch(',') => self.consume_single(TokenType::Comma, loc),
            Ch(':') => self.consume_single(TokenType::Colon, loc),
            Ch(';') => self.consume_single(TokenType::Semicolon, loc),
            Ch(c @ '+') => {
                if self.is_signed_decimal(0) {
                    return self.consume_numeric_token();
                }

                self.consume_single(TokenType::Delim(c), loc)
            }
            Ch(c @ '.') => {
                if self.stream.look_ahead(1).is_numeric() {
                    return self.consume_numeric_token();
                }

                self.consume_single(TokenType::Delim(c), loc)
            }
            Ch(c @ '-') => {
                if self.is_signed_decimal(0) {
                    return self.consume_numeric_token();
                }

                if self.is_next_3_points_starts_ident_seq(0) {
                    return self.consume_ident_like_seq();
                }

                self.consume_single(TokenType::Delim(c), loc)
            }
            Ch(c @ '@') => {
                // consume '@'
                self.next_char();

                if self.is_next_3_points_starts_ident_seq(0) {
                    return Token::new_atkeyword(self.consume_ident().as_str(), loc);
                }

                Token::new_delim(c, loc)
            }
            Ch(c @ '\\') => {
                if self.is_start_of_escape(0) {
                    return self.consume_ident_like_seq();
                }

                // parse error: a lone backslash
                self.consume_single(TokenType::Delim(c), loc)
            }
            Ch(c @ ('~' | '|' | '^' | '$' | '*')) => {
                let next = self.stream.look_ahead(1);
                let token_type = match (c, next) {
                    ('~', Ch('=')) => TokenType::IncludeMatch,
                    ('|', Ch('=')) => TokenType::DashMatch,
                    ('^', Ch('=')) => TokenType::PrefixMatch,
                    ('$', Ch('=')) => TokenType::SuffixMatch,
                    ('*', Ch('=')) => TokenType::SubstringMatch,
                    ('|', Ch('|')) => TokenType::Column,
                    _ => return self.consume_single(TokenType::Delim(c), loc),
                };

                self.consume_chars(2);
                Token::new(token_type, loc)
            }
            Ch(c) if c.is_ascii_digit() => self.consume_numeric_token(),
            Ch(c) if self.is_ident_start(c) => self.consume_ident_like_seq(),
            Ch(c) => self.consume_single(TokenType::Delim(c), loc),
        }
    }

    fn consume_single(&mut self, token_type: TokenType, loc: Location) -> Token {
        self.next_char();
        Token::new(token_type, loc)
    }

    /// 4.3.2. [Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_comment(&mut self) -> String {
        let mut comment = String::new();

        // consume '/*'
        self.consume_chars(2);

        while self.look_ahead_slice(2) != "*/" && !self.stream.eof() {
            comment.push(self.next_char().into());
        }

        // consume '*/', an unterminated comment simply ends the stream
        self.consume_chars(2);

        comment
    }

    /// 4.3.3. [Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// Returns either a `<number-token>`, `<percentage-token>`, or `<dimension-token>`.
    fn consume_numeric_token(&mut self) -> Token {
        let loc = self.current_location();
        let number = self.consume_number();

        if self.is_next_3_points_starts_ident_seq(0) {
            let unit = self.consume_ident();

            return Token::new_dimension(number, unit.as_str(), loc);
        } else if self.current_char() == Ch('%') {
            // consume '%'
            self.next_char();
            return Token::new_percentage(number, loc);
        }

        Token::new_number(number, loc)
    }

    /// 4.3.5. [Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Returns either a `<string-token>` or `<bad-string-token>`.
    fn consume_string_token(&mut self) -> Token {
        let loc = self.current_location();

        // consume string starting: (') or (") ...
        let ending = self.next_char();
        let mut value = String::new();

        loop {
            // eof is a parse error, but we return the current string
            if self.current_char() == ending || self.stream.eof() {
                // consume string ending
                self.next_char();
                return Token::new_quoted_string(value.as_str(), loc);
            }

            // newline: parse error, the newline itself is not consumed
            if self.current_char() == Ch('\n') {
                return Token::new_bad_string(value.as_str(), loc);
            }

            if self.current_char() == Ch('\\') {
                match self.stream.look_ahead(1) {
                    Character::StreamEnd => {
                        self.next_char();
                        continue;
                    }
                    Ch('\n') => {
                        self.consume_chars(2);
                        continue;
                    }
                    Ch(_) => {
                        value.push(self.consume_escaped_token());
                        continue;
                    }
                }
            }

            value.push(self.next_char().into());
        }
    }

    /// 4.3.12. [Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// Note: for the sake of simplicity, we exclude the number type mentioned in the algorithm.
    fn consume_number(&mut self) -> Number {
        let mut value = String::new();

        if matches!(self.current_char(), Ch('+' | '-')) {
            value.push(self.next_char().into());
        }

        value.push_str(&self.consume_digits());

        if self.current_char() == Ch('.') && self.stream.look_ahead(1).is_numeric() {
            value.push_str(&self.consume_chars(2));
            value.push_str(&self.consume_digits());
        }

        let c1 = self.stream.look_ahead(0);
        let c2 = self.stream.look_ahead(1);
        let c3 = self.stream.look_ahead(2);
        if matches!(c1, Ch('E' | 'e'))
            && ((matches!(c2, Ch('-' | '+')) && c3.is_numeric()) || c2.is_numeric())
        {
            value.push(self.next_char().into());
            value.push(self.next_char().into());
            value.push_str(&self.consume_digits());
        }

        value.parse().unwrap_or(0.0)
    }

    /// 4.3.4. [Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Returns either an `<ident-token>` or a `<function-token>`. Selectors never contain
    /// `<url-token>`s, so `url(` is a plain function.
    fn consume_ident_like_seq(&mut self) -> Token {
        let loc = self.current_location();

        let value = self.consume_ident();

        if self.current_char() == Ch('(') {
            // consume '('
            self.next_char();
            return Token::new_function(value.as_str(), loc);
        }

        Token::new_ident(value.as_str(), loc)
    }

    /// 4.3.7. [Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-an-escaped-code-point)
    fn consume_escaped_token(&mut self) -> char {
        // consume '\'
        self.next_char();

        // eof: parse error
        if self.stream.eof() {
            return UnicodeChar::REPLACEMENT_CHARACTER;
        }

        if !matches!(self.current_char(), Ch(c) if c.is_ascii_hexdigit()) {
            return self.next_char().into();
        }

        let mut value = String::new();
        while matches!(self.current_char(), Ch(c) if c.is_ascii_hexdigit()) && value.len() < 6 {
            value.push(self.next_char().into());
        }

        if self.current_char().is_whitespace() {
            self.next_char();
        }

        match u32::from_str_radix(&value, 16).ok().and_then(char::from_u32) {
            Some(c) if c != UnicodeChar::NULL && c < UnicodeChar::MAX_ALLOWED => c,
            _ => UnicodeChar::REPLACEMENT_CHARACTER,
        }
    }

    /// 4.3.11. [Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// Note: that algorithm does not do the verification that are necessary to
    /// ensure the returned code points would constitute an <ident-token>.
    /// Caller should ensure that the stream starts with an ident sequence before calling this
    /// algorithm.
    fn consume_ident(&mut self) -> String {
        let mut value = String::new();

        loop {
            if self.is_start_of_escape(0) {
                value.push(self.consume_escaped_token());
                continue;
            }

            if !self.is_ident_char(self.current_char().into()) {
                break;
            }

            value.push(self.next_char().into());
        }

        value
    }

    fn consume_digits(&mut self) -> String {
        let mut value = String::new();

        while self.current_char().is_numeric() {
            value.push(self.next_char().into());
        }

        value
    }

    fn consume_chars(&mut self, len: usize) -> String {
        let mut value = String::new();

        for _ in 0..len {
            if self.stream.eof() {
                break;
            }
            value.push(self.next_char().into());
        }

        value
    }

    fn consume_whitespace(&mut self) {
        while self.current_char().is_whitespace() {
            self.next_char();
        }
    }

    /// [ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
    fn is_ident_start(&self, char: char) -> bool {
        char.is_ascii_alphabetic() || !char.is_ascii() || char == '_'
    }

    /// [ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
    fn is_ident_char(&self, char: char) -> bool {
        self.is_ident_start(char) || char.is_ascii_digit() || char == '-'
    }

    /// 4.3.8. [Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_start_of_escape(&self, start: usize) -> bool {
        let current_char = self.stream.look_ahead(start);
        let next_char = self.stream.look_ahead(start + 1);

        current_char == Ch('\\') && next_char != Ch('\n')
    }

    /// [4.3.9. Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#check-if-three-code-points-would-start-an-ident-sequence)
    fn is_next_3_points_starts_ident_seq(&self, start: usize) -> bool {
        let first = self.stream.look_ahead(start);
        let second = self.stream.look_ahead(start + 1);

        if first == Ch('-') {
            return matches!(second, Ch(c) if self.is_ident_start(c))
                || second == Ch('-')
                || self.is_start_of_escape(start + 1);
        }

        if first == Ch('\\') {
            return self.is_start_of_escape(start);
        }

        matches!(first, Ch(c) if self.is_ident_start(c))
    }

    fn is_signed_decimal(&self, start: usize) -> bool {
        let current = self.stream.look_ahead(start);
        let next = self.stream.look_ahead(start + 1);
        let last = self.stream.look_ahead(start + 2);

        // e.g. +1, -1, +.1, -0.01
        matches!(current, Ch('+' | '-'))
            && ((next == Ch('.') && last.is_numeric()) || next.is_numeric())
    }

    fn current_char(&self) -> Character {
        self.stream.read()
    }

    fn next_char(&mut self) -> Character {
        if self.stream.eof() {
            return Character::StreamEnd;
        }

        let c = self.stream.read();
        self.cur_location.inc(c.into());
        self.stream.next();

        c
    }

    fn look_ahead_slice(&self, len: usize) -> String {
        let mut s = String::new();

        for i in 0..len {
            match self.stream.look_ahead(i) {
                Ch(c) => s.push(c),
                Character::StreamEnd => break,
            }
        }

        s
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    macro_rules! assert_token_eq {
        ($t1:expr, $t2:expr) => {
            assert_eq!($t1.token_type, $t2.token_type)
        };
    }

    fn tokenize(input: &str) -> Vec<TokenType> {
        let mut chars = CharStream::new();
        chars.read_from_str(input);

        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());
        let mut tokens = vec![];
        loop {
            let t = tokenizer.consume();
            if t.is_eof() {
                break;
            }
            tokens.push(t.token_type);
        }

        tokens
    }

    #[test]
    fn parse_comment() {
        let mut chars = CharStream::new();
        chars.read_from_str("/* css comment */");

        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());
        let t = tokenizer.consume();

        assert_eq!(t.token_type, TokenType::Comment(" css comment ".into()));
        assert!(tokenizer.eof());
    }

    #[test]
    fn parse_unterminated_comment() {
        assert_eq!(tokenize("/* open"), vec![TokenType::Comment(" open".into())]);
    }

    #[test]
    fn parse_numbers() {
        let mut chars = CharStream::new();

        let num_tokens = vec![
            ("12", 12.0),
            ("+34", 34.0),
            ("-56", -56.0),
            ("7.8", 7.8),
            ("1e+1", 1e+1),
            ("1e1", 1e1),
            ("1e-1", 1e-1),
        ];

        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());

        for (raw_num, num_token) in num_tokens {
            tokenizer.stream.read_from_str(raw_num);
            assert_eq!(tokenizer.consume_number(), num_token);
        }
    }

    #[test]
    fn parse_ident_tokens() {
        let mut chars = CharStream::new();

        let ident_tokens = vec![
            ("-ident", "-ident"),
            ("ide  nt", "ide"),
            ("_123-ident", "_123-ident"),
            ("_123\\ident", "_123ident"),
        ];

        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());

        for (raw_ident, ident_tokens) in ident_tokens {
            tokenizer.stream.read_from_str(raw_ident);

            assert_eq!(tokenizer.consume_ident(), ident_tokens);
        }
    }

    #[test]
    fn parse_escaped_tokens() {
        let mut chars = CharStream::new();

        let escaped_chars = vec![
            ("\\005F ", '_'),
            ("\\2A", '*'),
            ("\\000000 ", UnicodeChar::REPLACEMENT_CHARACTER),
            ("\\FFFFFF ", UnicodeChar::REPLACEMENT_CHARACTER),
            ("\\10FFFF ", UnicodeChar::REPLACEMENT_CHARACTER),
        ];

        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());

        for (raw_escaped, escaped_char) in escaped_chars {
            tokenizer.stream.read_from_str(raw_escaped);
            assert_eq!(tokenizer.consume_escaped_token(), escaped_char);
        }
    }

    #[test]
    fn parse_function_tokens() {
        let mut chars = CharStream::new();

        let functions = vec![
            ("attr('", Token::new_function("attr", Location::default())),
            ("-rgba(", Token::new_function("-rgba", Location::default())),
            ("--rgba(", Token::new_function("--rgba", Location::default())),
            ("-\\26 -rgba(", Token::new_function("-&-rgba", Location::default())),
            ("_rgba()", Token::new_function("_rgba", Location::default())),
            ("rgbâ()", Token::new_function("rgbâ", Location::default())),
            ("rgba ()", Token::new_ident("rgba", Location::default())),
            ("-\\-rgba(", Token::new_function("--rgba", Location::default())),
        ];

        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());

        for (raw_function, function_token) in functions {
            tokenizer.stream.read_from_str(raw_function);
            assert_token_eq!(tokenizer.consume_ident_like_seq(), function_token);
        }
    }

    #[test]
    fn parser_numeric_token() {
        let mut chars = CharStream::new();

        let numeric_tokens = vec![
            ("1.1rem", Token::new_dimension(1.1, "rem", Location::default())),
            ("1px", Token::new_dimension(1.0, "px", Location::default())),
            ("1 em", Token::new_number(1.0, Location::default())),
            ("100%", Token::new_percentage(100.0, Location::default())),
            ("42", Token::new_number(42.0, Location::default())),
        ];

        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());

        for (raw_token, token) in numeric_tokens {
            tokenizer.stream.read_from_str(raw_token);
            assert_token_eq!(tokenizer.consume_numeric_token(), token);
        }
    }

    #[test]
    fn parse_string_tokens() {
        let string_tokens = vec![
            ("'line\nnewline'", Token::new_bad_string("line", Location::default())),
            (
                "\"double quotes\"",
                Token::new_quoted_string("double quotes", Location::default()),
            ),
            (
                "'single quotes'",
                Token::new_quoted_string("single quotes", Location::default()),
            ),
            ("\"a\\\nb\"", Token::new_quoted_string("ab", Location::default())),
            ("\"eof", Token::new_quoted_string("eof", Location::default())),
            ("\"\"", Token::new_quoted_string("", Location::default())),
        ];

        for (raw_string, string_token) in string_tokens {
            let mut stream = CharStream::new();
            stream.read_from_str(raw_string);
            let mut tokenizer = Tokenizer::new(&mut stream, Location::default());

            let t = tokenizer.consume_string_token();
            assert_token_eq!(t, string_token);
        }
    }

    #[test_case("#header", TokenType::IDHash("header".into()); "id hash")]
    #[test_case("#-nav", TokenType::IDHash("-nav".into()); "dashed id hash")]
    #[test_case("#1a", TokenType::Hash("1a".into()); "unrestricted hash")]
    #[test_case("#", TokenType::Delim('#'); "lone hash")]
    fn parse_hash_tokens(input: &str, expected: TokenType) {
        assert_eq!(tokenize(input), vec![expected]);
    }

    #[test_case("~=", TokenType::IncludeMatch)]
    #[test_case("|=", TokenType::DashMatch)]
    #[test_case("^=", TokenType::PrefixMatch)]
    #[test_case("$=", TokenType::SuffixMatch)]
    #[test_case("*=", TokenType::SubstringMatch)]
    #[test_case("||", TokenType::Column)]
    fn parse_match_tokens(input: &str, expected: TokenType) {
        assert_eq!(tokenize(input), vec![expected]);
    }

    #[test]
    fn parse_namespaced_attribute() {
        assert_eq!(
            tokenize("[ns|a|=b]"),
            vec![
                TokenType::LBracket,
                TokenType::Ident("ns".into()),
                TokenType::Delim('|'),
                TokenType::Ident("a".into()),
                TokenType::DashMatch,
                TokenType::Ident("b".into()),
                TokenType::RBracket,
            ]
        );
    }

    #[test]
    fn parse_selector_seq() {
        assert_eq!(
            tokenize("div.nav > a:not(#x)::before"),
            vec![
                TokenType::Ident("div".into()),
                TokenType::Delim('.'),
                TokenType::Ident("nav".into()),
                TokenType::Whitespace,
                TokenType::Delim('>'),
                TokenType::Whitespace,
                TokenType::Ident("a".into()),
                TokenType::Colon,
                TokenType::Function("not".into()),
                TokenType::IDHash("x".into()),
                TokenType::RParen,
                TokenType::Colon,
                TokenType::Colon,
                TokenType::Ident("before".into()),
            ]
        );
    }

    #[test]
    fn url_is_a_function() {
        assert_eq!(
            tokenize("url(a)"),
            vec![
                TokenType::Function("url".into()),
                TokenType::Ident("a".into()),
                TokenType::RParen,
            ]
        );
    }

    #[test]
    fn markup_comment_delimiters_are_not_special() {
        assert_eq!(
            tokenize("<!-- -->"),
            vec![
                TokenType::Delim('<'),
                TokenType::Delim('!'),
                TokenType::Ident("--".into()),
                TokenType::Whitespace,
                TokenType::Ident("--".into()),
                TokenType::Delim('>'),
            ]
        );
    }

    #[test]
    fn lookahead_and_reconsume() {
        let mut chars = CharStream::new();
        chars.read_from_str("a b");
        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());

        assert_eq!(tokenizer.lookahead(2).token_type, TokenType::Ident("b".into()));
        assert_eq!(tokenizer.consume().token_type, TokenType::Ident("a".into()));
        tokenizer.reconsume();
        assert_eq!(tokenizer.consume().token_type, TokenType::Ident("a".into()));
        assert!(tokenizer.consume().is_whitespace());
        assert_eq!(tokenizer.consume().token_type, TokenType::Ident("b".into()));
        assert!(tokenizer.consume().is_eof());
        assert!(tokenizer.consume().is_eof());
    }

    #[test]
    fn location() {
        let mut chars = CharStream::new();
        chars.read_from_str("a\n  .b");
        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());

        assert_eq!(tokenizer.consume().location, Location::new(1, 1, 0));
        assert_eq!(tokenizer.consume().location, Location::new(1, 2, 1));
        assert_eq!(tokenizer.consume().location, Location::new(2, 3, 4));
        assert_eq!(tokenizer.consume().location, Location::new(2, 4, 5));
    }

    #[test]
    fn display_reserializes() {
        let mut chars = CharStream::new();
        chars.read_from_str("'a\"b' #x ~= 2px");
        let mut tokenizer = Tokenizer::new(&mut chars, Location::default());

        let mut out = String::new();
        loop {
            let t = tokenizer.consume();
            if t.is_eof() {
                break;
            }
            out.push_str(&t.to_string());
        }

        assert_eq!(out, "\"a\\\"b\" #x ~= 2px");
    }
}
