//! Markup tags.

use quill_diagnostic::ErrorCode;
use quill_ir::{Expr, ExprKind, TokenKind};

use super::Precedence;
use crate::{ParseError, Parser};

/// Split a tag token literal into name and raw attribute text.
fn split_tag(literal: &str) -> (String, String) {
    match literal.split_once(char::is_whitespace) {
        Some((name, attrs)) => (name.to_string(), attrs.trim().to_string()),
        None => (literal.to_string(), String::new()),
    }
}

impl Parser<'_> {
    /// `<name attrs />` or `<name attrs> children </name>`.
    pub(crate) fn parse_tag(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let pos = open.pos();
        let (name, attrs) = split_tag(&open.literal);
        if open.kind == TokenKind::TagSingleton {
            return Ok(Expr::new(ExprKind::TagSingleton { name, attrs }, pos));
        }

        let mut children = Vec::new();
        loop {
            let token = self.cursor.current();
            match token.kind {
                TokenKind::TagEnd => {
                    self.cursor.advance();
                    if token.literal != name {
                        return Err(ParseError::new(
                            ErrorCode::E1005,
                            format!("closing tag `</{}>` does not match `<{name}>`", token.literal),
                            token.pos(),
                        ));
                    }
                    break;
                }
                TokenKind::TagText => {
                    self.cursor.advance();
                    children.push(Expr::new(ExprKind::Text(token.literal.clone()), token.pos()));
                }
                TokenKind::TagStart | TokenKind::TagSingleton => children.push(self.parse_tag()?),
                TokenKind::LBrace => {
                    self.cursor.advance();
                    if self.cursor.eat(TokenKind::RBrace) {
                        continue;
                    }
                    children.push(self.parse_expression(Precedence::Lowest)?);
                    self.cursor.expect(TokenKind::RBrace)?;
                }
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ErrorCode::E1003,
                        format!("unclosed tag `<{name}>`"),
                        pos,
                    ));
                }
                _ => {
                    return Err(ParseError::expected(
                        ErrorCode::E1001,
                        &format!("content or `</{name}>`"),
                        token,
                    ));
                }
            }
        }
        Ok(Expr::new(ExprKind::TagPair { name, attrs, children }, pos))
    }
}
