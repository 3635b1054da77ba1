//! Multi-document report framing.

use super::eval::execute;
use super::step::Query;
use crate::parser::HTree;
use std::io::{self, Write};

/// Line framing the start of each document block.
pub const DOCUMENT_RULE: &str = "======================";
/// Line separating a document title from its matched content.
pub const TITLE_RULE: &str = "----------------------";
/// Report line terminator.
pub const LINE_BREAK: &str = "\r\n";

/// Matched content for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    /// Title of the document's first top-level heading, or empty.
    pub title: String,
    pub content: String,
}

impl DocumentResult {
    pub fn from_tree(tree: &HTree, query: &Query) -> Self {
        Self {
            title: tree.first_title(),
            content: execute(tree, query),
        }
    }

    /// Whether the matched content is only whitespace.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Render all non-blank results as framed blocks joined with `\r\n`.
pub fn render_report<I>(results: I) -> String
where
    I: IntoIterator<Item = DocumentResult>,
{
    results
        .into_iter()
        .filter(|result| !result.is_blank())
        .map(|result| {
            [
                DOCUMENT_RULE,
                result.title.as_str(),
                TITLE_RULE,
                result.content.as_str(),
            ]
            .join(LINE_BREAK)
        })
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Write a rendered report terminated by [`LINE_BREAK`]. An empty report
/// writes nothing.
pub fn write_report<W: Write>(out: &mut W, report: &str) -> io::Result<()> {
    if report.is_empty() {
        return Ok(());
    }
    write!(out, "{report}{LINE_BREAK}")
}
