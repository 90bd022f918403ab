use quill_ir::{InfixOp, TokenKind};

/// Binding power of infix operators, lowest first.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub(crate) enum Precedence {
    Lowest,
    /// `,`
    Comma,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `== != ~ !~`
    Equals,
    /// `< <= > >=`
    LessGreater,
    /// `+ -`
    Sum,
    /// `++`
    Concat,
    /// `* / %`
    Product,
    /// `-x !x`
    Prefix,
    /// `a[i]`, `a.b`
    Index,
    /// `f(x)`
    Call,
}

impl Precedence {
    /// Precedence of `kind` in infix position; `Lowest` if it is not an
    /// infix operator.
    pub(crate) fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Comma => Precedence::Comma,
            TokenKind::Or => Precedence::Or,
            TokenKind::And => Precedence::And,
            TokenKind::Eq | TokenKind::NotEq | TokenKind::Match | TokenKind::NotMatch => {
                Precedence::Equals
            }
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => {
                Precedence::LessGreater
            }
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Concat => Precedence::Concat,
            TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
            TokenKind::LBracket | TokenKind::Dot => Precedence::Index,
            TokenKind::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

/// The binary operator spelled by `kind`.
pub(crate) fn infix_op(kind: TokenKind) -> Option<InfixOp> {
    let op = match kind {
        TokenKind::Plus => InfixOp::Add,
        TokenKind::Minus => InfixOp::Sub,
        TokenKind::Asterisk => InfixOp::Mul,
        TokenKind::Slash => InfixOp::Div,
        TokenKind::Percent => InfixOp::Mod,
        TokenKind::Concat => InfixOp::Concat,
        TokenKind::Eq => InfixOp::Eq,
        TokenKind::NotEq => InfixOp::NotEq,
        TokenKind::Lt => InfixOp::Lt,
        TokenKind::LtEq => InfixOp::LtEq,
        TokenKind::Gt => InfixOp::Gt,
        TokenKind::GtEq => InfixOp::GtEq,
        TokenKind::And => InfixOp::And,
        TokenKind::Or => InfixOp::Or,
        TokenKind::Match => InfixOp::Match,
        TokenKind::NotMatch => InfixOp::NotMatch,
        TokenKind::Comma => InfixOp::Comma,
        _ => return None,
    };
    Some(op)
}
