//! Recursive descent selector parser.
//!
//! The grammar is split over the submodules, each adding an `impl SelectorParser` block.
//! Logical combinators (`:is()` and friends) re-enter the list parser on their arguments
//! with a nested parser one level deeper.

use cssel_syntax::ComponentValue;

use crate::config::SelectorConfig;
use crate::cursor::TokenCursor;
use crate::namespace::Namespaces;

mod attribute;
mod combinator;
mod compound;
mod logical;
mod qualified_name;

pub(crate) struct SelectorParser<'a> {
    pub(crate) cursor: TokenCursor<'a>,
    namespaces: &'a Namespaces,
    config: SelectorConfig,
    /// Number of logical combinators this parser is nested in, 0 for the top level
    depth: usize,
}

impl<'a> SelectorParser<'a> {
    pub(crate) fn new(
        tokens: &'a [ComponentValue],
        namespaces: &'a Namespaces,
        config: SelectorConfig,
        depth: usize,
    ) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            namespaces,
            config,
            depth,
        }
    }

    pub(crate) fn config(&self) -> SelectorConfig {
        self.config
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Parser for a nested token list (block contents, function arguments) sharing this
    /// parser's namespaces
    fn nested(&self, tokens: &'a [ComponentValue], config: SelectorConfig, depth: usize) -> SelectorParser<'a> {
        SelectorParser::new(tokens, self.namespaces, config, depth)
    }
}
