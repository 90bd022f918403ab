//! Token types produced by the Quill lexer.

mod kind;
mod list;

pub use kind::TokenKind;
pub use list::TokenList;

use std::fmt;

use crate::Position;

/// A classified lexical unit with its source position.
///
/// `literal` holds the token's text as the parser needs it: identifier
/// names, decoded string contents, the body of `@` literals without the
/// `@`, the inside of a tag without its angle brackets.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, literal: impl Into<String>, pos: Position) -> Self {
        Token {
            kind,
            literal: literal.into(),
            line: pos.line,
            column: pos.column,
        }
    }

    #[inline]
    pub fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.literal, self.pos())
    }
}
