//! Token dispatch for code mode, plus the mode loop.

use quill_ir::{Position, Token, TokenKind};

use crate::cursor::Cursor;
use crate::mode::{Mode, ModeStack};

/// Streaming scanner. Prefer [`crate::lex`] unless tokens are consumed
/// incrementally.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) modes: ModeStack,
    /// Kind of the last emitted token; drives regex and tag disambiguation.
    last: Option<TokenKind>,
    /// One entry per open `(`: whether it opened an `if`/`for` header.
    parens: Vec<bool>,
    /// The last token was the `)` closing an `if`/`for` header, so a
    /// branch body comes next.
    after_header: bool,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            modes: ModeStack::new(),
            last: None,
            parens: Vec::new(),
            after_header: false,
            finished: false,
        }
    }

    /// Produce the next token. After `Eof`, keeps returning `Eof`.
    pub fn next_token(&mut self) -> Token {
        let token = loop {
            let scanned = match self.modes.current() {
                Mode::Code { .. } => self.scan_code(),
                Mode::Markup => self.scan_markup(),
                Mode::RawText { tag } => {
                    let tag = tag.clone();
                    self.scan_raw_text(&tag)
                }
            };
            if let Some(token) = scanned {
                break token;
            }
        };
        self.after_header = match token.kind {
            TokenKind::LParen => {
                let header = matches!(self.last, Some(TokenKind::If | TokenKind::For));
                self.parens.push(header);
                false
            }
            TokenKind::RParen => self.parens.pop().unwrap_or(false),
            _ => false,
        };
        self.last = Some(token.kind);
        token
    }

    /// Open tag frames at the current point of the scan.
    pub fn tag_depth(&self) -> usize {
        self.modes.tag_depth()
    }

    #[inline]
    pub(crate) fn eof(&self) -> Token {
        Token::new(TokenKind::Eof, "", self.cursor.position())
    }

    /// `/` is a regex after operators, openers, commas, statement
    /// keywords and `if`/`for` headers, or at the very start of input.
    #[inline]
    fn regex_allowed(&self) -> bool {
        self.after_header || self.last.map_or(true, TokenKind::expects_operand)
    }

    /// `<letter` is a tag unless it directly follows an operand, where it
    /// reads as a comparison (`a <b`). The `)` of an `if`/`for` header is
    /// not an operand: `if (ok) <p>yes</p>`.
    #[inline]
    pub(crate) fn tag_allowed(&self) -> bool {
        self.after_header || !self.last.is_some_and(ends_operand)
    }

    // ─── Code mode ─────────────────────────────────────────────────────

    fn skip_trivia(&mut self) {
        loop {
            if self.cursor.current().is_whitespace() {
                self.cursor.eat_while(char::is_whitespace);
            } else if self.cursor.starts_with("//") {
                self.cursor.eat_while(|c| c != '\n');
            } else {
                return;
            }
        }
    }

    fn scan_code(&mut self) -> Option<Token> {
        self.skip_trivia();
        let start = self.cursor.position();
        if self.cursor.is_eof() {
            return Some(self.eof());
        }

        let token = match self.cursor.current() {
            c if is_ident_start(c) => self.identifier(start),
            '0'..='9' => self.number(start),
            '"' => self.string(start),
            '`' => self.template(start),
            '/' if self.regex_allowed() => self.regex(start),
            '/' => self.single(start, TokenKind::Slash),
            '@' => self.at_literal(start),
            '<' => return self.less(start),
            '{' => {
                self.modes.open_brace();
                self.single(start, TokenKind::LBrace)
            }
            '}' => {
                self.modes.close_brace();
                self.single(start, TokenKind::RBrace)
            }
            '=' => self.one_or_two(start, '=', TokenKind::Assign, TokenKind::Eq),
            '!' => match self.cursor.peek() {
                '=' => self.op(start, 2, TokenKind::NotEq),
                '~' => self.op(start, 2, TokenKind::NotMatch),
                _ => self.single(start, TokenKind::Bang),
            },
            '>' => self.one_or_two(start, '=', TokenKind::Gt, TokenKind::GtEq),
            '+' => self.one_or_two(start, '+', TokenKind::Plus, TokenKind::Concat),
            '&' if self.cursor.peek() == '&' => self.op(start, 2, TokenKind::And),
            '|' if self.cursor.peek() == '|' => self.op(start, 2, TokenKind::Or),
            '.' if self.cursor.starts_with("...") => self.op(start, 3, TokenKind::Ellipsis),
            '-' => self.single(start, TokenKind::Minus),
            '*' => self.single(start, TokenKind::Asterisk),
            '%' => self.single(start, TokenKind::Percent),
            '~' => self.single(start, TokenKind::Match),
            '.' => self.single(start, TokenKind::Dot),
            ',' => self.single(start, TokenKind::Comma),
            ';' => self.single(start, TokenKind::Semicolon),
            ':' => self.single(start, TokenKind::Colon),
            '(' => self.single(start, TokenKind::LParen),
            ')' => self.single(start, TokenKind::RParen),
            '[' => self.single(start, TokenKind::LBracket),
            ']' => self.single(start, TokenKind::RBracket),
            _ => self.illegal_char(start),
        };
        Some(token)
    }

    /// `<` in code: comment, verbatim markup, tag, `<=` or `<`.
    fn less(&mut self, start: Position) -> Option<Token> {
        if self.tag_allowed() {
            if self.cursor.starts_with("<!--") {
                self.cursor.eat_through("-->");
                return None;
            }
            if let Some(text) = self.verbatim_markup() {
                return Some(Token::new(TokenKind::Str, text, start));
            }
            let next = self.cursor.peek();
            if next.is_alphabetic() || next == '>' {
                return Some(self.tag_start(start));
            }
        }
        Some(self.one_or_two(start, '=', TokenKind::Lt, TokenKind::LtEq))
    }

    fn identifier(&mut self, start: Position) -> Token {
        let offset = self.cursor.offset();
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(offset);
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Ident);
        Token::new(kind, text, start)
    }

    fn number(&mut self, start: Position) -> Token {
        let offset = self.cursor.offset();
        self.cursor.eat_while(|c| c.is_ascii_digit());
        let kind = if self.cursor.current() == '.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Token::new(kind, self.cursor.slice_from(offset), start)
    }

    // ─── Helpers ───────────────────────────────────────────────────────

    /// Consume one character and emit `kind` with its fixed spelling.
    pub(crate) fn single(&mut self, start: Position, kind: TokenKind) -> Token {
        self.op(start, 1, kind)
    }

    fn op(&mut self, start: Position, len: usize, kind: TokenKind) -> Token {
        let offset = self.cursor.offset();
        self.cursor.advance_n(len);
        Token::new(kind, self.cursor.slice_from(offset), start)
    }

    /// `c` or `c` followed by `second`.
    fn one_or_two(
        &mut self,
        start: Position,
        second: char,
        one: TokenKind,
        two: TokenKind,
    ) -> Token {
        if self.cursor.peek() == second {
            self.op(start, 2, two)
        } else {
            self.op(start, 1, one)
        }
    }

    pub(crate) fn illegal_char(&mut self, start: Position) -> Token {
        self.op(start, 1, TokenKind::Illegal)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token including the final `Eof`, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind == TokenKind::Eof;
        Some(token)
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Kinds after which the next token continues an expression as an
/// operator rather than starting a new operand.
fn ends_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Str
            | TokenKind::Template
            | TokenKind::Regex
            | TokenKind::DateTime
            | TokenKind::Duration
            | TokenKind::Path
            | TokenKind::Url
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::RParen
            | TokenKind::RBracket
    )
}
