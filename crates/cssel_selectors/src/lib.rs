//! CSS selector parser.
//!
//! Parses [Selectors Level 4](https://www.w3.org/TR/selectors-4/) selector lists from
//! component values into a syntax tree where every node knows its specificity. Namespace
//! prefixes are resolved against a caller supplied [`Namespaces`] mapping.
//!
//! ```
//! use cssel_selectors::{parse_str, Namespaces, SelectorConfig, Specificity};
//!
//! let selectors = parse_str("a:is(.b, #c)::before", &Namespaces::new(), SelectorConfig::default()).unwrap();
//! assert_eq!(selectors[0].specificity(), Specificity::new(1, 0, 2));
//! assert_eq!(selectors[0].pseudo_element(), Some("before"));
//! ```

pub mod config;
pub mod cursor;
pub mod errors;
mod list;
pub mod namespace;
mod parser;
pub mod selector;

pub use config::SelectorConfig;
pub use errors::{SelectorError, SelectorErrorKind, SelectorResult};
pub use list::{parse, parse_str, SelectorList};
pub use namespace::{Namespace, Namespaces};
pub use selector::{
    AttributeOperator, CombinedSelector, Combinator, ComplexSelector, CompoundSelector, LocalName, ParsedSelector,
    RelativeSelector, Selector, SimpleSelector, Specificity,
};
