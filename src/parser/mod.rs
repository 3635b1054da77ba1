//! Lightweight markdown lexing and heading-hierarchy extraction.
//!
//! Parsing runs in three passes:
//!
//! 1. [`scanner`] splits the text into single-character markers and text runs,
//! 2. [`normalize`] folds `#` runs at line start into leveled heading tokens,
//! 3. [`tree`] arranges the stream into a [`HTree`] keyed by heading level.

pub mod normalize;
pub mod output;
pub mod scanner;
pub mod token;
pub mod tree;

pub use output::{DocumentOutput, SectionOutput, build_json_output};
pub use scanner::ScanError;
pub use token::{InvalidTokenError, Token, TokenKind};
pub use tree::{HTree, Section};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while turning a document into a tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Lex `content` into the normalized token stream.
///
/// # Errors
///
/// Returns [`ScanError`] when a position cannot be tokenized.
pub fn tokenize(content: &str) -> Result<Vec<Token>, ScanError> {
    scanner::tokenize_raw(content).map(normalize::normalize)
}

/// Parse markdown content into its heading tree.
///
/// # Arguments
///
/// * `content` - Markdown content as a string
///
/// # Errors
///
/// Returns an error if the content cannot be tokenized.
pub fn parse_markdown(content: &str) -> Result<HTree, ParseError> {
    let tokens = tokenize(content)?;
    Ok(HTree::build(tokens))
}

/// Parse a markdown file into its heading tree.
///
/// # Errors
///
/// Returns an error if the file cannot be read or tokenized.
pub fn parse_file(path: &Path) -> Result<HTree, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_markdown(&content)
}
