/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Drop invalid comma separated branches instead of failing the whole list
    pub forgiving: bool,
    /// Parse relative selectors, as found in the argument list of `:has()`
    pub relative: bool,
    /// Maximum number of nested logical combinators (`:is()`, `:where()`, `:not()`, `:has()`)
    pub max_nesting_depth: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            forgiving: false,
            relative: false,
            max_nesting_depth: 32,
        }
    }
}

impl SelectorConfig {
    #[must_use]
    pub fn forgiving() -> Self {
        Self {
            forgiving: true,
            ..Self::default()
        }
    }
}
