//! # mdsection
//!
//! Heading-section extraction for lightweight markdown.
//!
//! This library lexes markdown-like text, rebuilds its heading hierarchy as a
//! tree, and answers path queries such as "the subsection under `# Guide`,
//! then `## Install`, then any `###` matching `mac`" by serializing the
//! matched subtrees.
//!
//! ## Features
//!
//! - Two-pass lexer: single-character markers, then heading-run folding
//! - Heading tree keyed by level (1-5), tolerant of skipped levels
//! - Regex or literal path queries with wildcard steps
//! - Multi-document reports, outline dumps and JSON output
//!
//! ## Example
//!
//! ```rust
//! use mdsection::{parse_markdown, query};
//! use mdsection::query::{PatternOptions, Query};
//!
//! let markdown = "# Guide\nintro\n## Install\nrun it\n## Usage\ncall it\n";
//!
//! let tree = parse_markdown(markdown).unwrap();
//! println!("Found {} headings", tree.len());
//!
//! let path = Query::under_root(["Guide", "Install"], &PatternOptions::default()).unwrap();
//! assert_eq!(query::execute(&tree, &path), "## Install\n\nrun it\n\n");
//! ```

/// Configuration module for user preferences.
///
/// Provides defaults for directory filtering, wildcard spelling and output format.
pub mod config;

/// Input handling module for files, directories and stdin.
pub mod input;

/// Parser module for markdown documents.
///
/// Provides the lexer, the heading normalizer and the heading tree.
pub mod parser;

/// Path query module.
///
/// Matches heading titles level by level and serializes matched sections.
pub mod query;

// Re-export commonly used types for convenience
pub use config::Config;
pub use parser::{HTree, ParseError, Section, Token, TokenKind, parse_file, parse_markdown};
