use cssel_syntax::ComponentValue;

use crate::config::SelectorConfig;
use crate::errors::{SelectorError, SelectorErrorKind, SelectorResult};
use crate::list::SelectorList;
use crate::parser::SelectorParser;
use crate::selector::{ParsedSelector, Selector, SimpleSelector};

impl<'a> SelectorParser<'a> {
    /// Parses the argument list of `:is()`, `:where()`, `:not()` or `:has()`.
    ///
    /// `:not()` is strict, the others are forgiving. `:has()` takes relative selectors.
    /// Branches with a pseudo-element are dropped.
    pub(crate) fn parse_logical_combination(
        &mut self,
        name: &str,
        arguments: &'a [ComponentValue],
    ) -> SelectorResult<SimpleSelector> {
        log::trace!("parse_logical_combination: {name}");

        let depth = self.depth() + 1;
        if depth > self.config().max_nesting_depth {
            return Err(SelectorError::new(
                SelectorErrorKind::NestingTooDeep,
                None,
                format!(
                    "logical combinators nested deeper than {} levels",
                    self.config().max_nesting_depth
                ),
            ));
        }

        let negation = name == "not";
        let config = SelectorConfig {
            forgiving: !negation,
            relative: name == "has",
            ..self.config()
        };

        let list = SelectorList::from_parser(self.nested(arguments, config, depth));
        let mut selectors = Vec::new();
        for result in list {
            let selector = result.map_err(|err| if negation { err.within_negation() } else { err })?;
            if selector.pseudo_element().is_some() {
                log::debug!("dropping {selector} from :{name}(), pseudo-elements are not allowed");
                continue;
            }
            selectors.push(selector);
        }

        Ok(match name {
            "not" => SimpleSelector::Negation(into_selectors(selectors)),
            "has" => SimpleSelector::Relational(selectors.into_iter().map(ParsedSelector::into_relative).collect()),
            "where" => SimpleSelector::SpecificityAdjustment(into_selectors(selectors)),
            _ => SimpleSelector::MatchesAny(into_selectors(selectors)),
        })
    }
}

fn into_selectors(selectors: Vec<ParsedSelector>) -> Vec<Selector> {
    selectors.into_iter().map(ParsedSelector::into_selector).collect()
}
