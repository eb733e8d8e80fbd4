//! Name selection.
//!
//! A query can be limited to a subset of target names. The caller hands over
//! an optional [`NameSelector`]; [`resolve`] evaluates it against the names
//! currently present in the store and yields a [`Restriction`].

use crate::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Outcome of name resolution.
///
/// `Explicit(vec![])` means "nothing is eligible". It is never the same thing
/// as `Unrestricted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restriction {
    Unrestricted,
    Explicit(Vec<String>),
}

impl Restriction {
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Restriction::Unrestricted)
    }

    /// Explicitly selected names, in selector order.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Restriction::Unrestricted => None,
            Restriction::Explicit(names) => Some(names),
        }
    }

    /// Membership test. Builds nothing; use [`Restriction::eligible`] when
    /// testing many names.
    pub fn permits(&self, name: &str) -> bool {
        match self {
            Restriction::Unrestricted => true,
            Restriction::Explicit(names) => names.iter().any(|n| n == name),
        }
    }

    /// Set form of the restriction for bulk membership tests. `None` means
    /// every name is eligible.
    pub fn eligible(&self) -> Option<HashSet<&str>> {
        self.names()
            .map(|names| names.iter().map(String::as_str).collect())
    }
}

/// A name-selection expression evaluated against the full set of names known
/// to a store.
pub trait NameSelector: Send + Sync + fmt::Debug {
    /// Names chosen from `universe`, in the order the selector defines.
    fn select(&self, universe: &[String]) -> Vec<String>;
}

/// Resolve an optional selector against the store's current name universe.
pub fn resolve(selector: Option<&dyn NameSelector>, universe: &[String]) -> Restriction {
    let Some(selector) = selector else {
        return Restriction::Unrestricted;
    };

    let mut seen = HashSet::new();
    let names: Vec<String> = selector
        .select(universe)
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect();

    tracing::debug!(
        "Resolved {:?} to {} of {} names",
        selector,
        names.len(),
        universe.len()
    );

    Restriction::Explicit(names)
}

/// Every known name, as an explicit restriction.
#[derive(Debug, Clone, Default)]
pub struct Everything;

impl NameSelector for Everything {
    fn select(&self, universe: &[String]) -> Vec<String> {
        universe.to_vec()
    }
}

/// Literal names. Names unknown to the store are dropped; the given order is
/// kept.
#[derive(Debug, Clone)]
pub struct Literal(pub Vec<String>);

impl Literal {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }
}

impl NameSelector for Literal {
    fn select(&self, universe: &[String]) -> Vec<String> {
        let known: HashSet<&str> = universe.iter().map(String::as_str).collect();
        self.0
            .iter()
            .filter(|name| known.contains(name.as_str()))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct StartsWith(pub String);

impl NameSelector for StartsWith {
    fn select(&self, universe: &[String]) -> Vec<String> {
        universe
            .iter()
            .filter(|name| name.starts_with(self.0.as_str()))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct EndsWith(pub String);

impl NameSelector for EndsWith {
    fn select(&self, universe: &[String]) -> Vec<String> {
        universe
            .iter()
            .filter(|name| name.ends_with(self.0.as_str()))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Contains(pub String);

impl NameSelector for Contains {
    fn select(&self, universe: &[String]) -> Vec<String> {
        universe
            .iter()
            .filter(|name| name.contains(self.0.as_str()))
            .cloned()
            .collect()
    }
}

/// Regular-expression matcher. The pattern may match anywhere in the name.
#[derive(Debug, Clone)]
pub struct Matches(Regex);

impl Matches {
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| Error::InvalidSelector(format!("bad pattern {:?}: {}", pattern, e)))
    }
}

impl NameSelector for Matches {
    fn select(&self, universe: &[String]) -> Vec<String> {
        universe
            .iter()
            .filter(|name| self.0.is_match(name))
            .cloned()
            .collect()
    }
}

/// Union of several selectors, in first-seen order.
#[derive(Debug, Default)]
pub struct AnyOf(pub Vec<Box<dyn NameSelector>>);

impl NameSelector for AnyOf {
    fn select(&self, universe: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for selector in &self.0 {
            for name in selector.select(universe) {
                if seen.insert(name.clone()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// A selector parsed from command-line text.
///
/// Grammar: `everything`, `starts_with:<prefix>`, `ends_with:<suffix>`,
/// `contains:<text>`, `matches:<regex>`, or a comma-separated list of
/// literal names.
#[derive(Debug, Clone)]
pub struct Selection(Arc<dyn NameSelector>);

impl Selection {
    pub fn new(selector: impl NameSelector + 'static) -> Self {
        Self(Arc::new(selector))
    }

    pub fn as_selector(&self) -> &dyn NameSelector {
        self.0.as_ref()
    }
}

impl NameSelector for Selection {
    fn select(&self, universe: &[String]) -> Vec<String> {
        self.0.select(universe)
    }
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "everything" {
            return Ok(Self::new(Everything));
        }

        if let Some((kind, arg)) = s.split_once(':') {
            let selection = match kind {
                "starts_with" => Some(Self::new(StartsWith(arg.to_string()))),
                "ends_with" => Some(Self::new(EndsWith(arg.to_string()))),
                "contains" => Some(Self::new(Contains(arg.to_string()))),
                "matches" => Some(Self::new(Matches::new(arg)?)),
                _ => None,
            };
            if let Some(selection) = selection {
                return Ok(selection);
            }
            return Err(Error::InvalidSelector(format!("unknown matcher {:?}", kind)));
        }

        let names: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();
        Ok(Self::new(Literal::new(names)))
    }
}
