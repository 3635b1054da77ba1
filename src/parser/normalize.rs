//! Second lexical pass: turn runs of `#` markers into leveled headings.
//!
//! A run of level-1 markers that starts a line and is followed by a space is a
//! heading whose level is the run length. Any other run is plain text. A
//! marker found in the middle of a line passes through as a level-1 heading.

use super::token::{Token, TokenKind};
use tracing::debug;

/// Marker run being accumulated at the start of a line.
#[derive(Debug, Default)]
struct Run {
    kind: Option<TokenKind>,
    count: u32,
}

impl Run {
    fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    fn extend(&mut self, kind: TokenKind) {
        self.kind = Some(kind);
        self.count += 1;
    }

    /// Emit the run as literal `#` text and reset.
    fn revert_into(&mut self, out: &mut Vec<Token>) {
        for _ in 0..self.count {
            out.push(Token::literal("#"));
        }
        *self = Run::default();
    }

    /// Emit the run as a single heading of its length and reset.
    fn confirm_into(&mut self, out: &mut Vec<Token>) {
        out.push(Token::heading(self.count));
        *self = Run::default();
    }
}

/// Rewrite a raw token stream so every heading is one token of the right level.
pub fn normalize(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut run = Run::default();
    let mut prev_kind: Option<TokenKind> = None;

    for token in tokens {
        let kind = token.kind();
        let line_start = matches!(prev_kind, None | Some(TokenKind::Newline));
        prev_kind = Some(kind);

        if line_start && kind.heading_level().is_some() {
            run.extend(kind);
            continue;
        }
        if run.kind == Some(kind) {
            run.extend(kind);
            continue;
        }
        if run.is_active() && kind == TokenKind::Empty {
            run.confirm_into(&mut out);
            out.push(token);
            continue;
        }
        if run.is_active() {
            run.revert_into(&mut out);
        }
        out.push(token);
    }

    // streams without a trailing sentinel can still end inside a run
    if run.is_active() {
        run.revert_into(&mut out);
    }

    debug!(tokens = out.len(), "normalized heading runs");
    out
}
