use quill_diagnostic::{Diagnostic, ErrorCode};
use quill_ir::{Position, Token};

/// A parse error with a 1-based source location.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable expectation message.
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, pos: Position) -> Self {
        ParseError {
            code,
            message: message.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    /// `expected {what}, found {token}` at `token`.
    pub(crate) fn expected(code: ErrorCode, what: &str, found: &Token) -> Self {
        ParseError::new(code, format!("expected {what}, found {}", found_text(found)), found.pos())
    }

    #[inline]
    pub fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Convert to a full Diagnostic for rich error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.pos(), self.code.title())
    }
}

/// How a token reads in "found ..." messages.
pub(crate) fn found_text(token: &Token) -> String {
    use quill_ir::TokenKind;
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Ident => format!("identifier `{}`", token.literal),
        TokenKind::Illegal => format!("`{}`", token.literal),
        kind if kind.symbol().is_some() => kind.to_string(),
        kind => kind.describe().to_string(),
    }
}
