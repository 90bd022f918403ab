//! Lexer for Quill.
//!
//! A hand-written, mode-aware scanner. Code, markup and raw text (the body
//! of `<style>`/`<script>`) are scanned by different rules; the active mode
//! lives on an explicit stack so `{expr}` inside markup and tags inside
//! `{expr}` nest to any depth.
//!
//! The lexer never fails. Unrecognized input becomes a
//! [`TokenKind::Illegal`](quill_ir::TokenKind::Illegal) token and scanning
//! continues; the parser reports it. The stream always ends with exactly one
//! `Eof` token.
//!
//! Each call to [`lex`] builds a fresh [`Lexer`], so the evaluator can
//! re-enter it for template interpolations without sharing state.

mod cursor;
mod literals;
mod markup;
mod mode;
mod scanner;

pub use scanner::Lexer;

use quill_ir::{TokenKind, TokenList};

/// Lex `source` into a token list terminated by `Eof`.
pub fn lex(source: &str) -> TokenList {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    TokenList::new(tokens)
}

#[cfg(test)]
mod tests;
