use cssel_syntax::ComponentValue;

/// Single look-ahead cursor over a borrowed list of component values
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [ComponentValue],
    /// Index of the next value to be returned by `advance()`
    position: usize,
}

impl<'a> TokenCursor<'a> {
    #[must_use]
    pub fn new(tokens: &'a [ComponentValue]) -> Self {
        Self { tokens, position: 0 }
    }

    /// Returns the next value without consuming it, `None` at the end of the input
    #[must_use]
    pub fn peek(&self) -> Option<&'a ComponentValue> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the next value
    pub fn advance(&mut self) -> Option<&'a ComponentValue> {
        let value = self.peek();
        if value.is_some() {
            self.position += 1;
        }
        value
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn skip_whitespace(&mut self) -> bool {
        self.skip_while(ComponentValue::is_whitespace)
    }

    pub fn skip_comment(&mut self) -> bool {
        self.skip_while(ComponentValue::is_comment)
    }

    pub fn skip_whitespace_and_comment(&mut self) -> bool {
        self.skip_while(|value| value.is_whitespace() || value.is_comment())
    }

    /// Consumes values up to and including the next comma. Returns false when the input
    /// ended before a comma was found.
    pub fn skip_past_comma(&mut self) -> bool {
        while let Some(value) = self.advance() {
            if value.is_comma() {
                return true;
            }
        }
        false
    }

    /// Consumes values as long as they match, returns true when at least one was consumed
    fn skip_while(&mut self, matches: impl Fn(&ComponentValue) -> bool) -> bool {
        let start = self.position;
        while self.peek().is_some_and(&matches) {
            self.position += 1;
        }
        self.position != start
    }
}
