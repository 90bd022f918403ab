//! Tags, markup text and raw text.

use quill_ir::{Position, Token, TokenKind};

use crate::mode::{is_raw_text_tag, Mode};
use crate::scanner::Lexer;

impl Lexer<'_> {
    /// `<name attrs>` or `<name attrs />`, cursor on `<`.
    ///
    /// Attribute text is read brace- and quote-aware so `>` inside
    /// `{a > b}` or `"x>y"` does not end the tag. A paired start tag
    /// pushes a markup frame (raw text for `style`/`script`).
    pub(crate) fn tag_start(&mut self, start: Position) -> Token {
        let offset = self.cursor.offset();
        self.cursor.advance();
        let body_start = self.cursor.offset();
        let mut braces = 0u32;
        let mut quote: Option<char> = None;
        let mut terminated = false;
        while !self.cursor.is_eof() {
            let c = self.cursor.current();
            match quote {
                Some(_) if c == '\\' => self.cursor.advance(),
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None => match c {
                    '"' | '\'' => quote = Some(c),
                    '{' => braces += 1,
                    '}' => braces = braces.saturating_sub(1),
                    '>' if braces == 0 => {
                        terminated = true;
                        break;
                    }
                    _ => {}
                },
            }
            self.cursor.advance();
        }
        if !terminated {
            return Token::new(TokenKind::Illegal, self.cursor.slice_from(offset), start);
        }
        let body = self.cursor.slice_from(body_start);
        self.cursor.advance();

        let body = body.trim_end();
        if let Some(inner) = body.strip_suffix('/') {
            return Token::new(TokenKind::TagSingleton, inner.trim(), start);
        }
        let literal = body.trim();
        let name = tag_name(literal);
        if is_raw_text_tag(name) {
            self.modes.push(Mode::RawText {
                tag: name.to_string(),
            });
        } else {
            self.modes.push(Mode::Markup);
        }
        Token::new(TokenKind::TagStart, literal, start)
    }

    /// `</name>`, cursor on `<`. Pops the current markup frame.
    fn tag_end(&mut self, start: Position) -> Token {
        let offset = self.cursor.offset();
        self.cursor.advance_n(2);
        let name_start = self.cursor.offset();
        self.cursor.eat_while(|c| c != '>' && c != '<' && c != '\n');
        let name = self.cursor.slice_from(name_start).trim().to_string();
        if self.cursor.current() != '>' {
            return Token::new(TokenKind::Illegal, self.cursor.slice_from(offset), start);
        }
        self.cursor.advance();
        self.modes.pop();
        Token::new(TokenKind::TagEnd, name, start)
    }

    /// `<![CDATA[...]]>`, `<!DOCTYPE ...>` and `<?...?>` pass through as
    /// text. Returns `None` if the cursor is not on one of them.
    pub(crate) fn verbatim_markup(&mut self) -> Option<String> {
        let offset = self.cursor.offset();
        if self.cursor.starts_with("<![CDATA[") {
            self.cursor.eat_through("]]>");
        } else if self.cursor.starts_with("<!") || self.cursor.starts_with("<?") {
            self.cursor.eat_through(">");
        } else {
            return None;
        }
        Some(self.cursor.slice_from(offset).to_string())
    }

    // ─── Markup mode ───────────────────────────────────────────────────

    pub(crate) fn scan_markup(&mut self) -> Option<Token> {
        let start = self.cursor.position();
        if self.cursor.is_eof() {
            return Some(self.eof());
        }
        match self.cursor.current() {
            '{' => {
                let token = self.single(start, TokenKind::LBrace);
                self.modes.push(Mode::Code { braces: 0 });
                return Some(token);
            }
            '<' => {
                if self.cursor.starts_with("<!--") {
                    self.cursor.eat_through("-->");
                    return None;
                }
                if self.cursor.starts_with("</") {
                    return Some(self.tag_end(start));
                }
                if let Some(text) = self.verbatim_markup() {
                    return Some(Token::new(TokenKind::TagText, text, start));
                }
                let next = self.cursor.peek();
                if next.is_alphabetic() || next == '>' {
                    return Some(self.tag_start(start));
                }
            }
            _ => {}
        }

        let offset = self.cursor.offset();
        loop {
            self.cursor.advance();
            if self.cursor.is_eof()
                || self.cursor.current() == '{'
                || (self.cursor.current() == '<' && starts_markup(self.cursor.peek()))
            {
                break;
            }
        }
        text_token(self.cursor.slice_from(offset), start)
    }

    // ─── Raw text mode ─────────────────────────────────────────────────

    /// Body of `<style>`/`<script>`: braces are content, only `@{` opens
    /// an embedded expression.
    pub(crate) fn scan_raw_text(&mut self, tag: &str) -> Option<Token> {
        let start = self.cursor.position();
        if self.cursor.is_eof() {
            return Some(self.eof());
        }
        if self.cursor.starts_with("@{") {
            self.cursor.advance();
            let token = self.single(start, TokenKind::LBrace);
            self.modes.push(Mode::Code { braces: 0 });
            return Some(token);
        }
        if self.at_closing_tag(tag) {
            return Some(self.tag_end(start));
        }

        let offset = self.cursor.offset();
        loop {
            self.cursor.advance();
            if self.cursor.is_eof() || self.cursor.starts_with("@{") || self.at_closing_tag(tag) {
                break;
            }
        }
        text_token(self.cursor.slice_from(offset), start)
    }

    fn at_closing_tag(&self, tag: &str) -> bool {
        let rest = self.cursor.rest();
        rest.starts_with("</")
            && rest
                .get(2..2 + tag.len())
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }
}

/// Characters after `<` that make it markup rather than text.
fn starts_markup(next: char) -> bool {
    next.is_alphabetic() || matches!(next, '>' | '/' | '!' | '?')
}

/// Indentation between tags (whitespace containing a newline) is dropped.
fn text_token(text: &str, start: Position) -> Option<Token> {
    if text.trim().is_empty() && text.contains('\n') {
        return None;
    }
    Some(Token::new(TokenKind::TagText, text, start))
}

/// The tag name: text up to the first whitespace.
pub(crate) fn tag_name(literal: &str) -> &str {
    literal.split_whitespace().next().unwrap_or("")
}
