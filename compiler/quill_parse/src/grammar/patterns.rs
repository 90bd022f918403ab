//! Binding patterns: parameters, array patterns, dictionary patterns.

use quill_diagnostic::ErrorCode;
use quill_ir::{ArrayPattern, DictPattern, DictPatternKey, KeyBinding, Param, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `name`, `[...]` or `{...}`.
    pub(crate) fn parse_param(&mut self) -> Result<Param, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident => Ok(Param::Ident(self.cursor.expect_ident()?)),
            TokenKind::LBracket => Ok(Param::Array(self.parse_array_pattern()?)),
            TokenKind::LBrace => Ok(Param::Dict(self.parse_dict_pattern()?)),
            _ => Err(ParseError::expected(
                ErrorCode::E1006,
                "parameter name or pattern",
                self.cursor.current(),
            )),
        }
    }

    /// `[a, [b, c], {d}]`
    pub(crate) fn parse_array_pattern(&mut self) -> Result<ArrayPattern, ParseError> {
        self.cursor.expect(TokenKind::LBracket)?;
        let mut elements = Vec::new();
        while !self.cursor.check(TokenKind::RBracket) {
            elements.push(self.parse_param()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RBracket)?;
        Ok(ArrayPattern { elements })
    }

    /// `{a, b as c, d: {e}, f: [g, h], ...rest}`
    pub(crate) fn parse_dict_pattern(&mut self) -> Result<DictPattern, ParseError> {
        self.cursor.expect(TokenKind::LBrace)?;
        let mut pattern = DictPattern::default();
        while !self.cursor.check(TokenKind::RBrace) {
            if self.cursor.eat(TokenKind::Ellipsis) {
                pattern.rest = Some(self.cursor.expect_ident()?);
                self.cursor.eat(TokenKind::Comma);
                if !self.cursor.check(TokenKind::RBrace) {
                    return Err(ParseError::expected(
                        ErrorCode::E1006,
                        "`}` after rest pattern",
                        self.cursor.current(),
                    ));
                }
                break;
            }
            let key = self.parse_property_name(true)?;
            let binding = if self.cursor.eat(TokenKind::As) {
                KeyBinding::Alias(self.cursor.expect_ident()?)
            } else if self.cursor.eat(TokenKind::Colon) {
                KeyBinding::Nested(self.parse_param()?)
            } else {
                KeyBinding::Same
            };
            pattern.keys.push(DictPatternKey { key, binding });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RBrace)?;
        Ok(pattern)
    }
}
