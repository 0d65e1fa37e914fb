//! Rule expressions.
//!
//! An expression is a `,`-separated list of terms, all of which must pass.
//! A term is one predicate name or several `|`-separated alternatives, of
//! which at least one must pass:
//!
//! ```text
//! required,alpha|numeric,is-even
//! ```
//!
//! Whitespace around names is ignored, as are empty names. An expression with
//! no names never fails.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separates terms that must all pass.
pub const TERM_SEPARATOR: char = ',';

/// Separates alternatives within a term.
pub const ALTERNATIVE_SEPARATOR: char = '|';

/// A parsed rule expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Expression {
    terms: Vec<Term>,
}

/// One conjunct of an [`Expression`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    alternatives: Vec<String>,
}

impl Term {
    /// Predicate names of this term; at least one.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }
}

impl Expression {
    /// Parses an expression. Parsing never fails; unknown names are only
    /// detected against a registry.
    pub fn parse(source: &str) -> Self {
        let terms = source
            .split(TERM_SEPARATOR)
            .filter_map(|raw| {
                let alternatives: Vec<String> = raw
                    .split(ALTERNATIVE_SEPARATOR)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect();
                (!alternatives.is_empty()).then_some(Term { alternatives })
            })
            .collect();
        Self { terms }
    }

    /// The terms, in evaluation order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns `true` if the expression names no predicate.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every predicate name, in order of appearance.
    pub fn predicate_names(&self) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .flat_map(|term| term.alternatives.iter().map(String::as_str))
    }
}

impl FromStr for Expression {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Expression {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for Expression {
    fn from(source: String) -> Self {
        Self::parse(&source)
    }
}

impl From<&String> for Expression {
    fn from(source: &String) -> Self {
        Self::parse(source)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, "{TERM_SEPARATOR}")?;
            }
            for (j, name) in term.alternatives.iter().enumerate() {
                if j > 0 {
                    write!(f, "{ALTERNATIVE_SEPARATOR}")?;
                }
                f.write_str(name)?;
            }
        }
        Ok(())
    }
}
