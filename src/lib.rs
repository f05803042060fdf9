//! cssel parses CSS selector lists into a syntax tree annotated with specificity.
//!
//! The work is split over two crates which are re-exported here:
//!
//! * [`syntax`]: the CSS tokenizer and component values.
//! * [`selectors`]: the selector parser, syntax tree and specificity model.

pub use cssel_selectors as selectors;
pub use cssel_syntax as syntax;

pub use cssel_selectors::{parse, parse_str, Namespaces, ParsedSelector, SelectorConfig, SelectorError, Specificity};
