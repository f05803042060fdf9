//! CSS syntax layer for cssel.
//!
//! The tokenizer follows [CSS Syntax Module Level 3](https://www.w3.org/TR/css-syntax-3/) and
//! the resulting tokens are grouped into component values, which is the input the selector
//! parser works on.

pub mod component;
pub mod location;
pub mod stream;
pub mod tokenizer;
mod unicode;

pub use component::{parse_component_value_list, BlockKind, ComponentValue, MAX_NESTING_DEPTH};
pub use location::Location;
pub use tokenizer::{Token, TokenType};
