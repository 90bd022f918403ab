use std::ops::Index;

use super::{Token, TokenKind};
use crate::Position;

/// An owned token stream that always ends with exactly one `Eof` token.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Build a list, appending the `Eof` sentinel if `tokens` lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.kind == TokenKind::Eof) {
            let pos = tokens.last().map_or(Position::START, Token::pos);
            tokens.push(Token::new(TokenKind::Eof, "", pos));
        }
        TokenList { tokens }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true: the `Eof` sentinel is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The final `Eof` token.
    pub fn eof(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// `(kind, literal)` pairs, the stable shape tests compare against.
    pub fn kinds_and_literals(&self) -> Vec<(TokenKind, &str)> {
        self.tokens
            .iter()
            .map(|t| (t.kind, t.literal.as_str()))
            .collect()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
