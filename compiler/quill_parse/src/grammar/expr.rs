//! Expression parsing.
//!
//! Classic Pratt parsing: `parse_prefix` handles the token that starts an
//! operand, then infix handlers run while the next token binds tighter
//! than the caller's precedence. All binary operators are
//! left-associative.

use std::rc::Rc;

use quill_diagnostic::ErrorCode;
use quill_ir::{DictEntry, Expr, ExprKind, PrefixOp, TokenKind};
use quill_stack::ensure_sufficient_stack;

use super::precedence::infix_op;
use super::Precedence;
use crate::error::found_text;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression whose operators bind tighter than `precedence`.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow
    /// on deeply nested expressions.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expression_inner(precedence))
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        let mut left = self.parse_prefix()?;
        while precedence < Precedence::of(self.cursor.current_kind()) {
            left = self.parse_infix(left)?;
        }
        Ok(left)
    }

    /// An element of a comma-separated list: everything above `,`.
    #[inline]
    pub(crate) fn parse_element(&mut self) -> Result<Expr, ParseError> {
        self.parse_expression(Precedence::Comma)
    }

    // ─── Prefix handlers ───────────────────────────────────────────────

    /// `!operand` or `-operand`, binding tighter than any infix operator.
    fn parse_unary(&mut self, op: PrefixOp) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos();
        let operand = self.parse_expression(Precedence::Prefix)?;
        Ok(Expr::new(
            ExprKind::Prefix {
                op,
                operand: Box::new(operand),
            },
            pos,
        ))
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let pos = token.pos();
        let literal = |kind| Ok(Expr::new(kind, pos));
        match token.kind {
            TokenKind::Ident => {
                self.cursor.advance();
                literal(ExprKind::Ident(token.literal.clone()))
            }
            TokenKind::Int => {
                self.cursor.advance();
                match token.literal.parse::<i64>() {
                    Ok(value) => literal(ExprKind::Int(value)),
                    Err(_) => Err(ParseError::new(
                        ErrorCode::E1002,
                        format!("integer literal `{}` is out of range", token.literal),
                        pos,
                    )),
                }
            }
            TokenKind::Float => {
                self.cursor.advance();
                match token.literal.parse::<f64>() {
                    Ok(value) => literal(ExprKind::Float(value)),
                    Err(_) => Err(ParseError::new(
                        ErrorCode::E1002,
                        format!("invalid float literal `{}`", token.literal),
                        pos,
                    )),
                }
            }
            TokenKind::Str => {
                self.cursor.advance();
                literal(ExprKind::Str(token.literal.clone()))
            }
            TokenKind::Template => {
                self.cursor.advance();
                literal(ExprKind::Template(token.literal.clone()))
            }
            TokenKind::Regex => {
                self.cursor.advance();
                let (pattern, flags) = token
                    .literal
                    .rsplit_once('/')
                    .unwrap_or((token.literal.as_str(), ""));
                literal(ExprKind::Regex {
                    pattern: pattern.to_string(),
                    flags: flags.to_string(),
                })
            }
            TokenKind::DateTime => {
                self.cursor.advance();
                literal(ExprKind::DateTime(token.literal.clone()))
            }
            TokenKind::Duration => {
                self.cursor.advance();
                literal(ExprKind::Duration(token.literal.clone()))
            }
            TokenKind::Path => {
                self.cursor.advance();
                literal(ExprKind::Path(token.literal.clone()))
            }
            TokenKind::Url => {
                self.cursor.advance();
                literal(ExprKind::Url(token.literal.clone()))
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                literal(ExprKind::Bool(token.kind == TokenKind::True))
            }
            TokenKind::Null => {
                self.cursor.advance();
                literal(ExprKind::Null)
            }
            // `i64::MIN` has no positive counterpart, so its digits only
            // parse together with the sign.
            TokenKind::Minus if self.cursor.peek_kind() == TokenKind::Int => {
                let digits = &self.cursor.peek_nth(1).literal;
                match format!("-{digits}").parse::<i64>() {
                    Ok(i64::MIN) => {
                        self.cursor.advance();
                        self.cursor.advance();
                        literal(ExprKind::Int(i64::MIN))
                    }
                    _ => self.parse_unary(PrefixOp::Neg),
                }
            }
            TokenKind::Minus => self.parse_unary(PrefixOp::Neg),
            TokenKind::Bang => self.parse_unary(PrefixOp::Not),
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expression(Precedence::Lowest)?;
                self.cursor.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_dict_literal(),
            TokenKind::If => self.parse_if(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::For => self.parse_for(),
            TokenKind::TagStart | TokenKind::TagSingleton => self.parse_tag(),
            TokenKind::Illegal => Err(ParseError::new(
                ErrorCode::E0001,
                format!("illegal token {}", found_text(token)),
                pos,
            )),
            _ => Err(ParseError::expected(ErrorCode::E1002, "expression", token)),
        }
    }

    /// `[a, b, c]`; a trailing comma is allowed.
    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos();
        let elements = self.parse_list(TokenKind::RBracket)?;
        Ok(Expr::new(ExprKind::Array(elements), pos))
    }

    /// Comma-separated elements up to and including `close`.
    pub(crate) fn parse_list(&mut self, close: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        while !self.cursor.check(close) {
            items.push(self.parse_element()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(close)?;
        Ok(items)
    }

    /// `{key: value, "other key": value}`. Values are stored unevaluated.
    fn parse_dict_literal(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos();
        let mut entries = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            let key = self.parse_property_name(true)?;
            self.cursor.expect(TokenKind::Colon)?;
            let value = self.parse_element()?;
            entries.push(DictEntry {
                key,
                value: Rc::new(value),
            });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::Dict(entries), pos))
    }

    /// An identifier or keyword used as a key; string keys when
    /// `allow_string` is set.
    pub(crate) fn parse_property_name(&mut self, allow_string: bool) -> Result<String, ParseError> {
        let token = self.cursor.current();
        let is_word = token.kind == TokenKind::Ident
            || token
                .kind
                .symbol()
                .is_some_and(|s| s.starts_with(|c: char| c.is_ascii_alphabetic()));
        if is_word || (allow_string && token.kind == TokenKind::Str) {
            self.cursor.advance();
            Ok(token.literal.clone())
        } else {
            Err(ParseError::expected(ErrorCode::E1004, "property name", token))
        }
    }

    // ─── Infix handlers ────────────────────────────────────────────────

    fn parse_infix(&mut self, left: Expr) -> Result<Expr, ParseError> {
        let token = self.cursor.advance();
        let pos = token.pos();
        match token.kind {
            TokenKind::LParen => {
                let args = self.parse_list(TokenKind::RParen)?;
                let pos = left.pos;
                Ok(Expr::new(
                    ExprKind::Call {
                        function: Box::new(left),
                        args,
                    },
                    pos,
                ))
            }
            TokenKind::LBracket => self.parse_index(left, pos),
            TokenKind::Dot => {
                let property = self.parse_property_name(false)?;
                Ok(Expr::new(
                    ExprKind::Dot {
                        object: Box::new(left),
                        property,
                    },
                    pos,
                ))
            }
            kind => {
                let Some(op) = infix_op(kind) else {
                    return Err(ParseError::expected(ErrorCode::E1001, "operator", token));
                };
                let right = self.parse_expression(Precedence::of(kind))?;
                Ok(Expr::new(
                    ExprKind::Infix {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    pos,
                ))
            }
        }
    }

    /// `a[i]`, `a[i:j]`, `a[:j]`, `a[i:]`; the `[` is already consumed.
    fn parse_index(&mut self, object: Expr, pos: quill_ir::Position) -> Result<Expr, ParseError> {
        let start = if self.cursor.check(TokenKind::Colon) {
            None
        } else {
            Some(Box::new(self.parse_element()?))
        };
        if !self.cursor.eat(TokenKind::Colon) {
            self.cursor.expect(TokenKind::RBracket)?;
            let Some(index) = start else {
                return Err(ParseError::expected(
                    ErrorCode::E1002,
                    "index expression",
                    self.cursor.current(),
                ));
            };
            return Ok(Expr::new(
                ExprKind::Index {
                    object: Box::new(object),
                    index,
                },
                pos,
            ));
        }
        let end = if self.cursor.check(TokenKind::RBracket) {
            None
        } else {
            Some(Box::new(self.parse_element()?))
        };
        self.cursor.expect(TokenKind::RBracket)?;
        Ok(Expr::new(
            ExprKind::Slice {
                object: Box::new(object),
                start,
                end,
            },
            pos,
        ))
    }
}
