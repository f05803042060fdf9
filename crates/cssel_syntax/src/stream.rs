//! Character stream the tokenizer reads from.
//!
//! The input is preprocessed on load as described in
//! [§ 3.3 Preprocessing the input stream](https://www.w3.org/TR/css-syntax-3/#input-preprocessing):
//! CR, CRLF and FF become a single LF and NUL becomes U+FFFD.

use std::fmt::{self, Formatter};

use crate::unicode::UnicodeChar;

/// Defines a single character in the stream. End of the stream is denoted as a separate element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Character {
    /// Standard UTF character
    Ch(char),
    /// Stream buffer exhausted
    StreamEnd,
}

use Character::{Ch, StreamEnd};

/// Converts the given character to a char. The end of the stream is converted to 0x0000
impl From<Character> for char {
    fn from(c: Character) -> Self {
        match c {
            Ch(c) => c,
            StreamEnd => UnicodeChar::NULL,
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Ch(ch) => write!(f, "{ch}"),
            StreamEnd => write!(f, "StreamEnd"),
        }
    }
}

impl Character {
    /// Returns true when the character is CSS whitespace
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Ch(' ' | '\t' | '\n'))
    }

    /// Returns true when the character is an ASCII digit
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Ch(c) if c.is_ascii_digit())
    }
}

/// A fully buffered stream of characters with arbitrary look-ahead
#[derive(Default)]
pub struct CharStream {
    buffer: Vec<char>,
    position: usize,
}

impl CharStream {
    /// Create a new, empty stream
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents of the stream with the given string and rewinds it
    pub fn read_from_str(&mut self, s: &str) {
        self.buffer.clear();
        self.position = 0;
        self.append_str(s);
    }

    /// Appends the given string to the stream
    pub fn append_str(&mut self, s: &str) {
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        let _ = chars.next();
                    }
                    self.buffer.push('\n');
                }
                '\u{000C}' => self.buffer.push('\n'),
                UnicodeChar::NULL => self.buffer.push(UnicodeChar::REPLACEMENT_CHARACTER),
                c => self.buffer.push(c),
            }
        }
    }

    /// Read current character
    #[must_use]
    pub fn read(&self) -> Character {
        self.look_ahead(0)
    }

    /// Look ahead in the stream
    #[must_use]
    pub fn look_ahead(&self, offset: usize) -> Character {
        self.buffer
            .get(self.position + offset)
            .map_or(StreamEnd, |c| Ch(*c))
    }

    /// Advance with 1 character
    pub fn next(&mut self) {
        if self.position < self.buffer.len() {
            self.position += 1;
        }
    }

    /// Returns true when all characters have been read
    #[must_use]
    pub fn eof(&self) -> bool {
        self.position >= self.buffer.len()
    }
}
