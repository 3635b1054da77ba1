//! Lexical units produced by the scanner and the heading normalizer.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Highest heading level that opens a section in the tree.
pub const MAX_STRUCTURAL_LEVEL: u32 = 5;

/// The kind of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Underscore,
    Star,
    Newline,
    /// A single space.
    Empty,
    /// A heading marker of the given level.
    ///
    /// The scanner only ever produces level 1 (one `#`); the normalizer
    /// synthesizes higher levels from runs of markers at line start.
    Heading(u32),
    Text,
    EndOfFile,
}

impl TokenKind {
    /// Heading level, if this is a heading marker.
    pub fn heading_level(self) -> Option<u32> {
        match self {
            TokenKind::Heading(level) => Some(level),
            _ => None,
        }
    }

    /// Whether this marker opens a section (levels 1 through 5).
    ///
    /// Deeper markers are valid tokens but are kept as content.
    pub fn is_structural_heading(self) -> bool {
        matches!(self, TokenKind::Heading(level) if (1..=MAX_STRUCTURAL_LEVEL).contains(&level))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Underscore => write!(f, "UNDERSCORE"),
            TokenKind::Star => write!(f, "STAR"),
            TokenKind::Newline => write!(f, "NEWLINE"),
            TokenKind::Empty => write!(f, "EMPTY"),
            TokenKind::Heading(level) => write!(f, "H{}", level),
            TokenKind::Text => write!(f, "TEXT"),
            TokenKind::EndOfFile => write!(f, "EOF"),
        }
    }
}

/// Raised when a token would break the non-empty text invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} token with text {text:?}")]
pub struct InvalidTokenError {
    pub kind: TokenKind,
    pub text: String,
}

/// An immutable lexical unit: a kind and the literal text it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    /// Create a token.
    ///
    /// Text must be non-empty, except for [`TokenKind::EndOfFile`] which must
    /// be empty.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Result<Self, InvalidTokenError> {
        let text = text.into();
        let valid = match kind {
            TokenKind::EndOfFile => text.is_empty(),
            _ => !text.is_empty(),
        };
        if !valid {
            return Err(InvalidTokenError { kind, text });
        }
        Ok(Self { kind, text })
    }

    /// The zero-length sentinel closing every token stream.
    pub fn end_of_file() -> Self {
        Self {
            kind: TokenKind::EndOfFile,
            text: String::new(),
        }
    }

    /// A heading marker of `level` hashes.
    pub(crate) fn heading(level: u32) -> Self {
        Self {
            kind: TokenKind::Heading(level),
            text: "#".repeat(level as usize),
        }
    }

    /// A literal text token. Callers guarantee `text` is non-empty.
    pub(crate) fn literal(text: &str) -> Self {
        debug_assert!(!text.is_empty());
        Self {
            kind: TokenKind::Text,
            text: text.to_string(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of input bytes this token consumed.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<type: {}, value: {:?}>", self.kind, self.text)
    }
}
