//! Namespace prefix mapping and resolved namespace values.

use std::collections::HashMap;
use std::fmt;

/// Caller supplied mapping from namespace prefixes to namespace URLs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    /// Namespace for unprefixed type selectors
    default: Option<String>,
    prefixes: HashMap<String, String>,
}

impl Namespaces {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default namespace
    #[must_use]
    pub fn with_default(mut self, url: &str) -> Self {
        self.default = Some(url.to_string());
        self
    }

    /// Adds (or replaces) a prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str, url: &str) -> Self {
        self.prefixes.insert(prefix.to_string(), url.to_string());
        self
    }

    /// Resolves a prefix, `None` when the prefix is not defined
    #[must_use]
    pub fn resolve(&self, prefix: &str) -> Option<Namespace> {
        self.prefixes.get(prefix).map(|url| Namespace::from_url(url))
    }

    /// Namespace of unprefixed type selectors. Without a default namespace this matches
    /// elements in any namespace.
    #[must_use]
    pub fn default_namespace(&self) -> Namespace {
        self.default.as_deref().map_or(Namespace::Any, Namespace::from_url)
    }
}

/// Resolved namespace of a qualified name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// No constraint (`*|name`, or no default namespace)
    Any,
    /// Not in any namespace (`|name` and unprefixed attributes)
    None,
    Url(String),
}

impl Namespace {
    /// An empty url means "no namespace"
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        if url.is_empty() {
            Namespace::None
        } else {
            Namespace::Url(url.to_string())
        }
    }

    /// Returns the namespace url. "No namespace" is the empty string, `None` means any
    /// namespace matches.
    #[must_use]
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Namespace::Any => None,
            Namespace::None => Some(""),
            Namespace::Url(url) => Some(url),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Any => write!(f, "*|"),
            Namespace::None => write!(f, "|"),
            Namespace::Url(url) => write!(f, "{{{url}}}|"),
        }
    }
}
