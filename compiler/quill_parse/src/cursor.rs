//! Position in the token stream.
//!
//! Lookahead is by index (`peek_nth`). Backtracking saves and restores
//! `position` through a parser snapshot.

use quill_diagnostic::ErrorCode;
use quill_ir::{Token, TokenKind, TokenList};

use crate::ParseError;

/// Cursor over a [`TokenList`].
///
/// The list always ends with `Eof`, and the cursor never moves past it, so
/// every read is in bounds.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Index of the current token.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to `pos`; used when restoring a snapshot.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos < self.tokens.len(), "cursor position {pos} out of bounds");
        self.pos = pos.min(self.tokens.len() - 1);
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Token `n` positions ahead; clamps to `Eof`.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> &'a Token {
        self.tokens
            .get(self.pos + n)
            .unwrap_or_else(|| self.tokens.eof())
    }

    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek_nth(1).kind
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token and return it. `Eof` is never consumed.
    #[inline]
    pub fn advance(&mut self) -> &'a Token {
        let current = self.current();
        if current.kind != TokenKind::Eof {
            self.pos += 1;
        }
        current
    }

    /// Consume the current token if it is `kind`.
    #[inline]
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind`, or fail with `expected <kind>, found ...`.
    #[inline]
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: TokenKind) -> ParseError {
        let code = if self.is_at_end() && is_closer(kind) {
            ErrorCode::E1003
        } else {
            ErrorCode::E1001
        };
        ParseError::expected(code, &kind.to_string(), self.current())
    }

    /// Expect and consume an identifier, returning its name.
    #[inline]
    pub fn expect_ident(&mut self) -> Result<String, ParseError> {
        if self.check(TokenKind::Ident) {
            Ok(self.advance().literal.clone())
        } else {
            Err(ParseError::expected(
                ErrorCode::E1004,
                "identifier",
                self.current(),
            ))
        }
    }

    /// Index of the token closing the bracket at the current position, if
    /// the current token is `open` and a balanced `close` exists.
    pub fn matching_close(&self, open: TokenKind, close: TokenKind) -> Option<usize> {
        if !self.check(open) {
            return None;
        }
        let mut depth = 0usize;
        for index in self.pos..self.tokens.len() {
            let kind = self.tokens[index].kind;
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
        }
        None
    }

    /// Kind of the token at absolute `index`, `Eof` past the end.
    #[inline]
    pub fn kind_at(&self, index: usize) -> TokenKind {
        self.tokens.get(index).map_or(TokenKind::Eof, |t| t.kind)
    }
}

fn is_closer(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket | TokenKind::TagEnd
    )
}
