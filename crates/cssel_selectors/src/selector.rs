//! Selector syntax tree with specificity.
//!
//! The tree is built once by the parser and never mutated afterwards. Every node can
//! compute its [specificity](https://www.w3.org/TR/selectors-4/#specificity-rules).

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::ops::Add;

use cssel_syntax::ComponentValue;

use crate::namespace::Namespace;

/// Defines the specificity for a selector: (ids, classes/attributes/pseudo-classes, types/pseudo-elements)
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    pub const ZERO: Specificity = Specificity(0, 0, 0);

    #[must_use]
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .cmp(&other.0)
            .then(self.1.cmp(&other.1))
            .then(self.2.cmp(&other.2))
    }
}

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Self) -> Self::Output {
        Specificity(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

impl Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Highest specificity of the list, zero for an empty list
fn max_specificity<I>(selectors: I) -> Specificity
where
    I: IntoIterator<Item = Specificity>,
{
    selectors.into_iter().max().unwrap_or(Specificity::ZERO)
}

/// A complete selector: a (combined) tree with an optional trailing pseudo-element
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub tree: ComplexSelector,
    /// Lowercased pseudo-element name, without the colons
    pub pseudo_element: Option<String>,
}

impl Selector {
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        let specificity = self.tree.specificity();
        match self.pseudo_element {
            Some(_) => specificity + Specificity(0, 0, 1),
            None => specificity,
        }
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)?;
        if let Some(pseudo_element) = &self.pseudo_element {
            write!(f, "::{pseudo_element}")?;
        }
        Ok(())
    }
}

/// A selector anchored by a leading combinator, as used in `:has()`
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeSelector {
    pub combinator: Combinator,
    pub selector: Selector,
}

impl RelativeSelector {
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.selector.specificity()
    }

    #[must_use]
    pub fn pseudo_element(&self) -> Option<&str> {
        self.selector.pseudo_element.as_deref()
    }
}

impl Display for RelativeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.combinator {
            Combinator::Descendant => write!(f, "{}", self.selector),
            combinator => write!(f, "{combinator} {}", self.selector),
        }
    }
}

/// One result of a selector list parse
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedSelector {
    Absolute(Selector),
    /// Only produced when parsing in relative mode
    Relative(RelativeSelector),
}

impl ParsedSelector {
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            ParsedSelector::Absolute(selector) => selector.specificity(),
            ParsedSelector::Relative(selector) => selector.specificity(),
        }
    }

    #[must_use]
    pub fn pseudo_element(&self) -> Option<&str> {
        match self {
            ParsedSelector::Absolute(selector) => selector.pseudo_element.as_deref(),
            ParsedSelector::Relative(selector) => selector.pseudo_element(),
        }
    }

    /// Returns the selector, dropping the leading combinator of a relative selector
    #[must_use]
    pub fn into_selector(self) -> Selector {
        match self {
            ParsedSelector::Absolute(selector) => selector,
            ParsedSelector::Relative(relative) => relative.selector,
        }
    }

    /// Returns the relative selector, absolute selectors are anchored as descendants
    #[must_use]
    pub fn into_relative(self) -> RelativeSelector {
        match self {
            ParsedSelector::Absolute(selector) => RelativeSelector {
                combinator: Combinator::Descendant,
                selector,
            },
            ParsedSelector::Relative(relative) => relative,
        }
    }
}

impl Display for ParsedSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedSelector::Absolute(selector) => write!(f, "{selector}"),
            ParsedSelector::Relative(selector) => write!(f, "{selector}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace
    Descendant,
    /// `>`
    Child,
    /// `+`
    NextSibling,
    /// `~`
    SubsequentSibling,
}

impl Combinator {
    /// Returns the combinator for an explicit combinator delimiter
    #[must_use]
    pub fn from_delim(delim: char) -> Option<Self> {
        match delim {
            '>' => Some(Combinator::Child),
            '+' => Some(Combinator::NextSibling),
            '~' => Some(Combinator::SubsequentSibling),
            _ => None,
        }
    }

    pub(crate) fn from_value(value: &ComponentValue) -> Option<Self> {
        match value.token_type() {
            Some(cssel_syntax::TokenType::Delim(c)) => Self::from_delim(*c),
            _ => None,
        }
    }
}

impl Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Descendant => write!(f, " "),
            Combinator::Child => write!(f, ">"),
            Combinator::NextSibling => write!(f, "+"),
            Combinator::SubsequentSibling => write!(f, "~"),
        }
    }
}

/// Either a single compound selector or a left-deep chain of combined compounds
#[derive(Debug, Clone, PartialEq)]
pub enum ComplexSelector {
    Compound(CompoundSelector),
    Combined(Box<CombinedSelector>),
}

impl ComplexSelector {
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            ComplexSelector::Compound(compound) => compound.specificity(),
            ComplexSelector::Combined(combined) => combined.specificity(),
        }
    }

    /// Rightmost compound, the one describing the subject element
    #[must_use]
    pub fn subject(&self) -> &CompoundSelector {
        match self {
            ComplexSelector::Compound(compound) => compound,
            ComplexSelector::Combined(combined) => &combined.right,
        }
    }
}

impl Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplexSelector::Compound(compound) => write!(f, "{compound}"),
            ComplexSelector::Combined(combined) => write!(f, "{combined}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedSelector {
    pub left: ComplexSelector,
    pub combinator: Combinator,
    pub right: CompoundSelector,
}

impl CombinedSelector {
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.left.specificity() + self.right.specificity()
    }
}

impl Display for CombinedSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, self.combinator, self.right)
    }
}

/// Simple selectors applying to a single element. An empty list is the universal selector.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub simple_selectors: Vec<SimpleSelector>,
}

impl CompoundSelector {
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.simple_selectors
            .iter()
            .map(SimpleSelector::specificity)
            .fold(Specificity::ZERO, Add::add)
    }
}

impl Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let namespace = self
            .simple_selectors
            .iter()
            .find(|simple| matches!(simple, SimpleSelector::Namespace(_)));
        let has_local_name = self
            .simple_selectors
            .iter()
            .any(|simple| matches!(simple, SimpleSelector::LocalName(_)));

        // the namespace constraint is printed as a prefix of the type selector
        if let Some(namespace) = namespace {
            write!(f, "{namespace}")?;
        }
        if !has_local_name && (namespace.is_some() || self.simple_selectors.is_empty()) {
            write!(f, "*")?;
        }
        for simple in &self.simple_selectors {
            if !matches!(simple, SimpleSelector::Namespace(_)) {
                write!(f, "{simple}")?;
            }
        }
        Ok(())
    }
}

/// Element or attribute name as written, together with its ASCII-lowercased form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalName {
    pub name: String,
    pub lower_name: String,
}

impl LocalName {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lower_name: name.to_ascii_lowercase(),
        }
    }
}

impl Display for LocalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Represents which type of matcher is used in an attribute selector
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum AttributeOperator {
    Equals,         // =
    Includes,       // ~=
    DashMatch,      // |=
    PrefixMatch,    // ^=
    SuffixMatch,    // $=
    SubstringMatch, // *=
}

impl AttributeOperator {
    pub(crate) fn from_value(value: &ComponentValue) -> Option<Self> {
        use cssel_syntax::TokenType;

        match value.token_type()? {
            TokenType::Delim('=') => Some(AttributeOperator::Equals),
            TokenType::IncludeMatch => Some(AttributeOperator::Includes),
            TokenType::DashMatch => Some(AttributeOperator::DashMatch),
            TokenType::PrefixMatch => Some(AttributeOperator::PrefixMatch),
            TokenType::SuffixMatch => Some(AttributeOperator::SuffixMatch),
            TokenType::SubstringMatch => Some(AttributeOperator::SubstringMatch),
            _ => None,
        }
    }
}

impl Display for AttributeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeOperator::Equals => write!(f, "="),
            AttributeOperator::Includes => write!(f, "~="),
            AttributeOperator::DashMatch => write!(f, "|="),
            AttributeOperator::PrefixMatch => write!(f, "^="),
            AttributeOperator::SuffixMatch => write!(f, "$="),
            AttributeOperator::SubstringMatch => write!(f, "*="),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// Element local name, e.g. `div`
    LocalName(LocalName),
    /// Element namespace constraint. Never [`Namespace::Any`].
    Namespace(Namespace),
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[ns|name op value]`
    Attribute {
        namespace: Namespace,
        name: LocalName,
        /// `None` for `[name]`
        operator: Option<AttributeOperator>,
        /// `None` for `[name]`
        value: Option<String>,
    },
    /// `:name`
    PseudoClass(String),
    /// `:name(...)` with its arguments kept as component values
    FunctionalPseudoClass {
        name: String,
        arguments: Vec<ComponentValue>,
    },
    /// `:not(...)`
    Negation(Vec<Selector>),
    /// `:has(...)`
    Relational(Vec<RelativeSelector>),
    /// `:is(...)`
    MatchesAny(Vec<Selector>),
    /// `:where(...)`
    SpecificityAdjustment(Vec<Selector>),
}

impl SimpleSelector {
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            SimpleSelector::LocalName(_) => Specificity(0, 0, 1),
            SimpleSelector::Namespace(_) | SimpleSelector::SpecificityAdjustment(_) => Specificity::ZERO,
            SimpleSelector::Id(_) => Specificity(1, 0, 0),
            SimpleSelector::Class(_)
            | SimpleSelector::Attribute { .. }
            | SimpleSelector::PseudoClass(_)
            | SimpleSelector::FunctionalPseudoClass { .. } => Specificity(0, 1, 0),
            SimpleSelector::Negation(selectors) | SimpleSelector::MatchesAny(selectors) => {
                max_specificity(selectors.iter().map(Selector::specificity))
            }
            SimpleSelector::Relational(selectors) => max_specificity(selectors.iter().map(RelativeSelector::specificity)),
        }
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, name: &str, selectors: &[T]) -> fmt::Result {
    write!(f, ":{name}(")?;
    for (i, selector) in selectors.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{selector}")?;
    }
    write!(f, ")")
}

impl Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::LocalName(name) => write!(f, "{name}"),
            SimpleSelector::Namespace(namespace) => write!(f, "{namespace}"),
            SimpleSelector::Id(id) => write!(f, "#{id}"),
            SimpleSelector::Class(class) => write!(f, ".{class}"),
            SimpleSelector::Attribute {
                namespace,
                name,
                operator,
                value,
            } => {
                write!(f, "[")?;
                if *namespace != Namespace::None {
                    write!(f, "{namespace}")?;
                }
                write!(f, "{name}")?;
                if let (Some(operator), Some(value)) = (operator, value) {
                    write!(f, "{operator}\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))?;
                }
                write!(f, "]")
            }
            SimpleSelector::PseudoClass(name) => write!(f, ":{name}"),
            SimpleSelector::FunctionalPseudoClass { name, arguments } => {
                write!(f, ":{name}(")?;
                for argument in arguments {
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            }
            SimpleSelector::Negation(selectors) => write_list(f, "not", selectors),
            SimpleSelector::Relational(selectors) => write_list(f, "has", selectors),
            SimpleSelector::MatchesAny(selectors) => write_list(f, "is", selectors),
            SimpleSelector::SpecificityAdjustment(selectors) => write_list(f, "where", selectors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(simple_selectors: Vec<SimpleSelector>) -> ComplexSelector {
        ComplexSelector::Compound(CompoundSelector { simple_selectors })
    }

    fn selector(simple_selectors: Vec<SimpleSelector>) -> Selector {
        Selector {
            tree: compound(simple_selectors),
            pseudo_element: None,
        }
    }

    #[test]
    fn test_specificity() {
        let s = selector(vec![
            SimpleSelector::LocalName(LocalName::new("h1")),
            SimpleSelector::Class("myclass".into()),
            SimpleSelector::Id("myid".into()),
        ]);
        assert_eq!(s.specificity(), Specificity::new(1, 1, 1));

        let s = selector(vec![
            SimpleSelector::Namespace(Namespace::None),
            SimpleSelector::PseudoClass("hover".into()),
            SimpleSelector::Attribute {
                namespace: Namespace::None,
                name: LocalName::new("href"),
                operator: None,
                value: None,
            },
        ]);
        assert_eq!(s.specificity(), Specificity::new(0, 2, 0));

        let s = Selector {
            tree: compound(vec![]),
            pseudo_element: Some("before".into()),
        };
        assert_eq!(s.specificity(), Specificity::new(0, 0, 1));
    }

    #[test]
    fn logical_specificity() {
        let branches = vec![
            selector(vec![SimpleSelector::Class("a".into())]),
            selector(vec![SimpleSelector::Id("b".into())]),
        ];

        assert_eq!(
            SimpleSelector::MatchesAny(branches.clone()).specificity(),
            Specificity::new(1, 0, 0)
        );
        assert_eq!(
            SimpleSelector::Negation(branches.clone()).specificity(),
            Specificity::new(1, 0, 0)
        );
        assert_eq!(
            SimpleSelector::SpecificityAdjustment(branches).specificity(),
            Specificity::ZERO
        );
        assert_eq!(SimpleSelector::MatchesAny(vec![]).specificity(), Specificity::ZERO);
        assert_eq!(SimpleSelector::Relational(vec![]).specificity(), Specificity::ZERO);
    }

    #[test]
    fn combined_specificity_sums() {
        let combined = CombinedSelector {
            left: compound(vec![SimpleSelector::Id("a".into())]),
            combinator: Combinator::Child,
            right: CompoundSelector {
                simple_selectors: vec![
                    SimpleSelector::LocalName(LocalName::new("p")),
                    SimpleSelector::Class("b".into()),
                ],
            },
        };

        assert_eq!(combined.specificity(), Specificity::new(1, 1, 1));
        assert_eq!(combined.to_string(), "#a>p.b");
    }

    #[test]
    fn test_specificity_ordering() {
        let specificity1 = Specificity::new(1, 1, 1);
        let specificity2 = Specificity::new(0, 1, 1);
        let specificity3 = Specificity::new(0, 0, 1);
        let specificity4 = Specificity::new(0, 2, 0);
        let specificity5 = Specificity::new(1, 0, 0);
        let specificity6 = Specificity::new(1, 2, 1);
        let specificity7 = Specificity::new(1, 1, 2);
        let specificity8 = Specificity::new(2, 1, 1);

        assert!(specificity1 > specificity2);
        assert!(specificity2 > specificity3);
        assert!(specificity3 < specificity4);
        assert!(specificity4 < specificity5);
        assert!(specificity5 < specificity6);
        assert!(specificity6 > specificity7);
        assert!(specificity7 < specificity8);
    }

    #[test]
    fn display() {
        let s = selector(vec![
            SimpleSelector::Namespace(Namespace::Url("x".into())),
            SimpleSelector::Attribute {
                namespace: Namespace::Any,
                name: LocalName::new("Lang"),
                operator: Some(AttributeOperator::DashMatch),
                value: Some("en".into()),
            },
            SimpleSelector::Negation(vec![selector(vec![])]),
        ]);

        assert_eq!(s.to_string(), "{x}|*[*|Lang|=\"en\"]:not(*)");
        assert_eq!(Specificity::new(1, 2, 3).to_string(), "(1, 2, 3)");

        let relative = RelativeSelector {
            combinator: Combinator::NextSibling,
            selector: selector(vec![SimpleSelector::Class("a".into())]),
        };
        assert_eq!(relative.to_string(), "+ .a");
    }
}
