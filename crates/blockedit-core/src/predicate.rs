//! Line predicates
//!
//! A predicate looks at exactly one [`Line`] and answers yes or no. It never
//! sees neighbouring lines, which keeps block location deterministic and
//! lets each predicate be tested on its own.
//!
//! Closures work anywhere a predicate is expected. [`Predicate`] is the
//! serializable form used by recipes:
//!
//! ```toml
//! start = { starts_with = "- name: Build Android APK" }
//! end = { until = { predicate = { equals = "EOF" } } }
//! ```

use crate::error::{Error, Result};
use crate::line::Line;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A pure test on a single line.
pub trait LinePredicate {
    fn matches(&self, line: &Line) -> bool;

    /// Human-readable form used in error messages.
    fn describe(&self) -> String {
        "<custom predicate>".to_string()
    }
}

impl<F> LinePredicate for F
where
    F: Fn(&Line) -> bool,
{
    fn matches(&self, line: &Line) -> bool {
        self(line)
    }
}

/// A compiled regular expression that serializes as its source string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    /// Replace every match, expanding capture references in `replacement`.
    pub fn replace_all<'t>(&self, text: &'t str, replacement: &str) -> Cow<'t, str> {
        self.0.replace_all(text, replacement)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for Pattern {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Pattern> for String {
    fn from(value: Pattern) -> Self {
        value.as_str().to_string()
    }
}

/// Declarative line predicate.
///
/// Text comparisons ignore leading whitespace, so `starts_with = "- name: A"`
/// matches a step at any nesting depth. `equals` and `ends_with` also ignore
/// trailing whitespace. `matches` runs against the raw line text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    StartsWith(String),
    Equals(String),
    Contains(String),
    EndsWith(String),
    Matches(Pattern),
    Blank,
    Not(Box<Predicate>),
    Any(Vec<Predicate>),
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Self::StartsWith(prefix.into())
    }

    pub fn equals(text: impl Into<String>) -> Self {
        Self::Equals(text.into())
    }

    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    pub fn ends_with(suffix: impl Into<String>) -> Self {
        Self::EndsWith(suffix.into())
    }

    /// Build a regex predicate, failing on an invalid pattern.
    pub fn regex(pattern: &str) -> Result<Self> {
        Pattern::new(pattern).map(Self::Matches)
    }

    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    pub fn or(self, other: Predicate) -> Self {
        match self {
            Self::Any(mut all) => {
                all.push(other);
                Self::Any(all)
            }
            first => Self::Any(vec![first, other]),
        }
    }

    pub fn and(self, other: Predicate) -> Self {
        match self {
            Self::All(mut all) => {
                all.push(other);
                Self::All(all)
            }
            first => Self::All(vec![first, other]),
        }
    }
}

impl LinePredicate for Predicate {
    fn matches(&self, line: &Line) -> bool {
        match self {
            Self::StartsWith(prefix) => line.content().starts_with(prefix.as_str()),
            Self::Equals(text) => line.content().trim_end() == text.as_str(),
            Self::Contains(needle) => line.text().contains(needle.as_str()),
            Self::EndsWith(suffix) => line.text().trim_end().ends_with(suffix.as_str()),
            Self::Matches(pattern) => pattern.is_match(line.text()),
            Self::Blank => line.is_blank(),
            Self::Not(inner) => !inner.matches(line),
            Self::Any(all) => all.iter().any(|p| p.matches(line)),
            Self::All(all) => all.iter().all(|p| p.matches(line)),
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartsWith(s) => write!(f, "starts_with {s:?}"),
            Self::Equals(s) => write!(f, "equals {s:?}"),
            Self::Contains(s) => write!(f, "contains {s:?}"),
            Self::EndsWith(s) => write!(f, "ends_with {s:?}"),
            Self::Matches(p) => write!(f, "matches /{}/", p.as_str()),
            Self::Blank => write!(f, "blank"),
            Self::Not(inner) => write!(f, "not ({inner})"),
            Self::Any(all) => write_joined(f, all, " or "),
            Self::All(all) => write_joined(f, all, " and "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, all: &[Predicate], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, p) in all.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{p}")?;
    }
    write!(f, ")")
}
