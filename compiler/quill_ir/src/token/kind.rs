//! Token kinds for Quill.

use std::fmt;

/// The closed set of token kinds.
///
/// Literal-carrying kinds keep their text in [`Token::literal`](super::Token);
/// the kind itself is a plain discriminant so it stays `Copy`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Unrecognized input; the parser reports it.
    Illegal,
    Eof,

    Ident,
    Int,
    Float,
    Str,
    /// Backtick template body, interpolations left unexpanded.
    Template,
    /// `/pattern/flags`, literal is `pattern/flags`.
    Regex,
    /// `@2024-12-25T10:00:00Z`
    DateTime,
    /// `@2h30m`
    Duration,
    /// `@./dir/file`
    Path,
    /// `@https://host/path`
    Url,

    /// `<name attrs>`, literal is `name attrs`.
    TagStart,
    /// `<name attrs />`, literal is `name attrs`.
    TagSingleton,
    /// `</name>`, literal is `name`.
    TagEnd,
    /// Text between tags.
    TagText,

    Assign,
    Plus,
    Concat,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Percent,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
    Match,
    NotMatch,

    Comma,
    Semicolon,
    Colon,
    Dot,
    Ellipsis,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
    For,
    In,
    Null,
    Delete,
    As,
}

impl TokenKind {
    /// Resolve an identifier to its keyword kind, if it is one.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "fn" | "function" => TokenKind::Function,
            "let" => TokenKind::Let,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "return" => TokenKind::Return,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "null" => TokenKind::Null,
            "delete" => TokenKind::Delete,
            "as" => TokenKind::As,
            _ => return None,
        };
        Some(kind)
    }

    /// After one of these tokens an operand is expected, so a `/` starts a
    /// regex literal rather than a division.
    pub fn expects_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
                | TokenKind::Match
                | TokenKind::NotMatch
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Bang
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Comma
                | TokenKind::Return
                | TokenKind::Let
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::In
        )
    }

    /// Fixed spelling of punctuation and keywords.
    pub fn symbol(self) -> Option<&'static str> {
        let s = match self {
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Concat => "++",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Match => "~",
            TokenKind::NotMatch => "!~",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Function => "fn",
            TokenKind::Let => "let",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Null => "null",
            TokenKind::Delete => "delete",
            TokenKind::As => "as",
            _ => return None,
        };
        Some(s)
    }

    /// Human-readable description used in "expected ..." diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Illegal => "illegal token",
            TokenKind::Eof => "end of input",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Str => "string",
            TokenKind::Template => "template",
            TokenKind::Regex => "regex",
            TokenKind::DateTime => "datetime literal",
            TokenKind::Duration => "duration literal",
            TokenKind::Path => "path literal",
            TokenKind::Url => "url literal",
            TokenKind::TagStart => "opening tag",
            TokenKind::TagSingleton => "self-closing tag",
            TokenKind::TagEnd => "closing tag",
            TokenKind::TagText => "tag text",
            other => other.symbol().unwrap_or("token"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => write!(f, "`{symbol}`"),
            None => f.write_str(self.describe()),
        }
    }
}
