//! Query steps: one heading pattern per tree depth.

use crate::parser::Section;
use regex::Regex;
use thiserror::Error;

/// Spellings that always mean "match any heading".
const WILDCARDS: [&str; 2] = [".*", "*"];

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// How step strings are turned into patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternOptions {
    /// Extra spelling accepted as a wildcard.
    pub wildcard: String,
    /// Match step strings literally instead of as regular expressions.
    pub fixed_strings: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            wildcard: ".*".to_string(),
            fixed_strings: false,
        }
    }
}

/// A heading-title pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    Any,
    Regex(Regex),
}

impl Pattern {
    /// Parse a step string, recognizing wildcard spellings first.
    pub fn parse(text: &str, options: &PatternOptions) -> Result<Self, QueryError> {
        if WILDCARDS.contains(&text) || text == options.wildcard {
            return Ok(Pattern::Any);
        }
        let source = if options.fixed_strings {
            regex::escape(text)
        } else {
            text.to_string()
        };
        Regex::new(&source)
            .map(Pattern::Regex)
            .map_err(|source| QueryError::InvalidPattern {
                pattern: text.to_string(),
                source,
            })
    }

    /// Whether `text` contains a match.
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Regex(re) => re.is_match(text),
        }
    }
}

/// One level of a path query.
#[derive(Debug, Clone)]
pub struct QueryStep {
    pattern: Pattern,
}

impl QueryStep {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    pub fn any() -> Self {
        Self::new(Pattern::Any)
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The root always matches; headings match on their title token.
    pub fn matches(&self, section: &Section) -> bool {
        section.is_root() || self.pattern.is_match(section.title())
    }
}

/// An ordered list of steps, step `i` applying to nodes at depth `i`.
#[derive(Debug, Clone, Default)]
pub struct Query {
    steps: Vec<QueryStep>,
}

impl Query {
    pub fn new(steps: Vec<QueryStep>) -> Self {
        Self { steps }
    }

    /// Build a query for heading levels 1.. under an implicit root step.
    pub fn under_root<I, S>(patterns: I, options: &PatternOptions) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut steps = vec![QueryStep::any()];
        for pattern in patterns {
            steps.push(QueryStep::new(Pattern::parse(pattern.as_ref(), options)?));
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[QueryStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
