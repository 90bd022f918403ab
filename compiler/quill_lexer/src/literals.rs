//! Strings, templates, regexes and `@` literals.

use quill_ir::{Position, Token, TokenKind};

use crate::scanner::Lexer;

impl Lexer<'_> {
    /// `"..."` with `\n \t \r \\ \"` escapes. Other escapes keep the
    /// backslash. Unterminated strings become `Illegal`.
    pub(crate) fn string(&mut self, start: Position) -> Token {
        let offset = self.cursor.offset();
        self.cursor.advance();
        let mut value = String::new();
        loop {
            if self.cursor.is_eof() {
                return Token::new(TokenKind::Illegal, self.cursor.slice_from(offset), start);
            }
            match self.cursor.current() {
                '"' => {
                    self.cursor.advance();
                    return Token::new(TokenKind::Str, value, start);
                }
                '\\' => {
                    self.cursor.advance();
                    match self.cursor.current() {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        '\\' => value.push('\\'),
                        '"' => value.push('"'),
                        '\0' if self.cursor.is_eof() => continue,
                        other => {
                            value.push('\\');
                            value.push(other);
                        }
                    }
                    self.cursor.advance();
                }
                c => {
                    value.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    /// Backtick template. The body is kept raw for the evaluator, except
    /// that `\{`/`\}` become the `\0{`/`\0}` escapes and `` \` `` becomes a
    /// backtick. Templates nested inside `{...}` are copied whole.
    pub(crate) fn template(&mut self, start: Position) -> Token {
        let offset = self.cursor.offset();
        self.cursor.advance();
        let mut body = String::new();
        if self.template_body(&mut body, false) {
            Token::new(TokenKind::Template, body, start)
        } else {
            Token::new(TokenKind::Illegal, self.cursor.slice_from(offset), start)
        }
    }

    /// Read up to and past the closing backtick. `nested` bodies are
    /// copied verbatim since they will be lexed again on interpolation.
    fn template_body(&mut self, out: &mut String, nested: bool) -> bool {
        let mut depth = 0u32;
        while !self.cursor.is_eof() {
            let c = self.cursor.current();
            match c {
                '`' if depth == 0 => {
                    self.cursor.advance();
                    return true;
                }
                '`' => {
                    out.push('`');
                    self.cursor.advance();
                    if !self.template_body(out, true) {
                        return false;
                    }
                    out.push('`');
                    continue;
                }
                '\\' => {
                    self.cursor.advance();
                    let escaped = self.cursor.current();
                    match escaped {
                        '{' | '}' if !nested && depth == 0 => {
                            out.push_str("\\0");
                            out.push(escaped);
                        }
                        '`' if !nested => out.push('`'),
                        '0' if matches!(self.cursor.peek(), '{' | '}') => {
                            out.push_str("\\0");
                            self.cursor.advance();
                            out.push(self.cursor.current());
                        }
                        '\0' if self.cursor.is_eof() => return false,
                        _ => {
                            out.push('\\');
                            out.push(escaped);
                        }
                    }
                }
                '"' if depth > 0 => {
                    self.copy_quoted(out);
                    continue;
                }
                '{' => {
                    depth += 1;
                    out.push(c);
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    out.push(c);
                }
                _ => out.push(c),
            }
            self.cursor.advance();
        }
        false
    }

    /// Copy a `"..."` literal verbatim, escapes included.
    fn copy_quoted(&mut self, out: &mut String) {
        out.push('"');
        self.cursor.advance();
        while !self.cursor.is_eof() {
            let c = self.cursor.current();
            out.push(c);
            self.cursor.advance();
            match c {
                '"' => return,
                '\\' if !self.cursor.is_eof() => {
                    out.push(self.cursor.current());
                    self.cursor.advance();
                }
                _ => {}
            }
        }
    }

    /// `/pattern/flags` on a single line. `/` inside a `[...]` class does
    /// not terminate. The token literal is `pattern/flags`.
    pub(crate) fn regex(&mut self, start: Position) -> Token {
        let offset = self.cursor.offset();
        self.cursor.advance();
        let body_start = self.cursor.offset();
        let mut in_class = false;
        loop {
            if self.cursor.is_eof() || self.cursor.current() == '\n' {
                return Token::new(TokenKind::Illegal, self.cursor.slice_from(offset), start);
            }
            match self.cursor.current() {
                '\\' => self.cursor.advance(),
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
            self.cursor.advance();
        }
        let pattern = self.cursor.slice_from(body_start).to_string();
        self.cursor.advance();
        let flags_start = self.cursor.offset();
        self.cursor.eat_while(|c| c.is_ascii_alphabetic());
        let flags = self.cursor.slice_from(flags_start);
        Token::new(TokenKind::Regex, format!("{pattern}/{flags}"), start)
    }

    /// `@` followed by a URL, path, datetime or duration. The literal drops
    /// the `@`. Anything else is `Illegal`.
    pub(crate) fn at_literal(&mut self, start: Position) -> Token {
        self.cursor.advance();
        let rest = self.cursor.rest();
        let Some(kind) = classify_at(rest) else {
            return Token::new(TokenKind::Illegal, "@", start);
        };
        let offset = self.cursor.offset();
        match kind {
            TokenKind::Url => self.cursor.eat_while(is_url_char),
            TokenKind::Path => self.cursor.eat_while(is_path_char),
            TokenKind::DateTime => self.cursor.eat_while(is_datetime_char),
            _ => self.cursor.advance_n(duration_len(rest)),
        }
        Token::new(kind, self.cursor.slice_from(offset), start)
    }
}

/// Decide what an `@` introduces by looking at the text after it.
pub(crate) fn classify_at(rest: &str) -> Option<TokenKind> {
    if scheme_len(rest).is_some_and(|len| rest[len..].starts_with("://")) {
        return Some(TokenKind::Url);
    }
    if ["/", "./", "../", "~/"].iter().any(|p| rest.starts_with(p)) {
        return Some(TokenKind::Path);
    }
    let bytes = rest.as_bytes();
    if bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-' {
        return Some(TokenKind::DateTime);
    }
    if duration_len(rest) > 0 {
        return Some(TokenKind::Duration);
    }
    None
}

/// Length of a URL scheme (`[a-zA-Z][a-zA-Z0-9+.-]*`) at the start of `s`.
fn scheme_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => return None,
    }
    let end = chars
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-')))
        .map_or(s.len(), |(i, _)| i);
    Some(end)
}

/// Byte length of a `[-]<digits><unit>...` duration body, 0 if none.
/// Units are `y mo w d h m s`; `mo` is checked before `m`.
pub(crate) fn duration_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = usize::from(bytes.first() == Some(&b'-'));
    let mut pairs = 0;
    loop {
        let digits_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == digits_start {
            break;
        }
        let unit = if bytes[i..].starts_with(b"mo") {
            2
        } else if matches!(
            bytes.get(i),
            Some(b'y' | b'w' | b'd' | b'h' | b'm' | b's')
        ) {
            1
        } else {
            0
        };
        if unit == 0 {
            i = digits_start;
            break;
        }
        i += unit;
        pairs += 1;
    }
    if pairs == 0 {
        0
    } else {
        i
    }
}

fn is_url_char(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>' | '"' | '\'' | '`' | ','
        )
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '~' | '+' | '%' | '@')
}

fn is_datetime_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | ':' | 'T' | '.' | '+' | 'Z')
}
