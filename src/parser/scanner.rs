//! First lexical pass: split raw text into single-character markers and text runs.
//!
//! The scanner looks at one character at a time, so a `##` line start comes out
//! as two separate level-1 heading markers. Reconstructing the real heading
//! level is left to [`super::normalize`].

use super::token::{Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Characters that always form a token of their own.
static SPECIAL_CHARS: [(char, TokenKind); 5] = [
    ('_', TokenKind::Underscore),
    ('*', TokenKind::Star),
    ('\n', TokenKind::Newline),
    (' ', TokenKind::Empty),
    ('#', TokenKind::Heading(1)),
];

/// Errors that abort scanning of a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Neither scanner produced a token at this byte offset.
    #[error("the scanners could not match the input at byte {offset}: {snippet:?}")]
    Unscannable { offset: usize, snippet: String },
}

fn special_kind(ch: char) -> Option<TokenKind> {
    SPECIAL_CHARS
        .iter()
        .find(|(special, _)| *special == ch)
        .map(|(_, kind)| *kind)
}

/// Classify the first character of `input`.
///
/// Returns `None` for empty input and for any character without a fixed kind.
pub fn scan_char(input: &str) -> Option<Token> {
    let ch = input.chars().next()?;
    let kind = special_kind(ch)?;
    Token::new(kind, &input[..ch.len_utf8()]).ok()
}

/// Consume the longest prefix of `input` made of non-special characters.
///
/// Returns `None` when that prefix is empty, i.e. when the first character is
/// special or the input is exhausted.
pub fn scan_text_run(input: &str) -> Option<Token> {
    let end = input
        .char_indices()
        .find(|(_, ch)| special_kind(*ch).is_some())
        .map(|(idx, _)| idx)
        .unwrap_or(input.len());
    Token::new(TokenKind::Text, &input[..end]).ok()
}

fn scan_one(input: &str) -> Option<Token> {
    scan_char(input).or_else(|| scan_text_run(input))
}

/// Tokenize `input` into a flat stream terminated by a single end-of-file token.
///
/// # Errors
///
/// Returns [`ScanError::Unscannable`] if some position is claimed by neither
/// scanner.
pub fn tokenize_raw(input: &str) -> Result<Vec<Token>, ScanError> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let rest = &input[offset..];
        let token = scan_one(rest).ok_or_else(|| ScanError::Unscannable {
            offset,
            snippet: rest.chars().take(16).collect(),
        })?;
        offset += token.len();
        tokens.push(token);
    }
    tokens.push(Token::end_of_file());

    debug!(bytes = input.len(), tokens = tokens.len(), "scanned raw tokens");
    Ok(tokens)
}
