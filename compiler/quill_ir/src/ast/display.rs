//! Canonical source rendering of the tree.
//!
//! Prefix, infix and index expressions are fully parenthesized so tests can
//! assert on grouping: `1 + 2 * 3` renders as `(1 + (2 * 3))`.

use std::fmt::{self, Display, Formatter, Write};

use super::{
    ArrayPattern, BindingTarget, Block, DictPattern, Expr, ExprKind, KeyBinding, Param, Program,
    Stmt, StmtKind,
};

fn write_joined<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_quoted(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.statements, "\n")
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        write_joined(f, &self.statements, "; ")?;
        f.write_str(" }")
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Let { target, value } => write!(f, "let {target} = {value}"),
            StmtKind::Assign { target, value } => write!(f, "{target} = {value}"),
            StmtKind::Return(Some(value)) => write!(f, "return {value}"),
            StmtKind::Return(None) => f.write_str("return"),
            StmtKind::Expression(expr) => write!(f, "{expr}"),
            StmtKind::Block(block) => write!(f, "{block}"),
            StmtKind::Delete(target) => write!(f, "delete {target}"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => f.write_str(name),
            ExprKind::Int(n) => write!(f, "{n}"),
            ExprKind::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            ExprKind::Str(s) => write_quoted(f, s),
            ExprKind::Bool(b) => write!(f, "{b}"),
            ExprKind::Null => f.write_str("null"),
            ExprKind::Template(t) => write!(f, "`{t}`"),
            ExprKind::Regex { pattern, flags } => write!(f, "/{pattern}/{flags}"),
            ExprKind::DateTime(s)
            | ExprKind::Duration(s)
            | ExprKind::Path(s)
            | ExprKind::Url(s) => write!(f, "@{s}"),
            ExprKind::Prefix { op, operand } => write!(f, "({op}{operand})"),
            ExprKind::Infix { op, left, right } => write!(f, "({left} {op} {right})"),
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if ({condition}) {consequence}")?;
                if let Some(alt) = alternative {
                    write!(f, " else {alt}")?;
                }
                Ok(())
            }
            ExprKind::Function(func) => {
                f.write_str("fn(")?;
                write_joined(f, &func.params, ", ")?;
                write!(f, ") {}", func.body)
            }
            ExprKind::Call { function, args } => {
                write!(f, "{function}(")?;
                write_joined(f, args, ", ")?;
                f.write_char(')')
            }
            ExprKind::Array(elements) => {
                f.write_char('[')?;
                write_joined(f, elements, ", ")?;
                f.write_char(']')
            }
            ExprKind::Dict(entries) => {
                f.write_char('{')?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", entry.key, entry.value)?;
                }
                f.write_char('}')
            }
            ExprKind::Dot { object, property } => write!(f, "{object}.{property}"),
            ExprKind::Index { object, index } => write!(f, "({object}[{index}])"),
            ExprKind::Slice { object, start, end } => {
                write!(f, "({object}[")?;
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                f.write_char(':')?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                f.write_str("])")
            }
            ExprKind::For { iterable, function } => write!(f, "for ({iterable}) {function}"),
            ExprKind::TagSingleton { name, attrs } => {
                write!(f, "<{name}")?;
                if !attrs.is_empty() {
                    write!(f, " {attrs}")?;
                }
                f.write_str(" />")
            }
            ExprKind::TagPair {
                name,
                attrs,
                children,
            } => {
                write!(f, "<{name}")?;
                if !attrs.is_empty() {
                    write!(f, " {attrs}")?;
                }
                f.write_char('>')?;
                for child in children {
                    match child.kind {
                        ExprKind::Text(_)
                        | ExprKind::TagPair { .. }
                        | ExprKind::TagSingleton { .. } => {
                            write!(f, "{child}")?;
                        }
                        _ => write!(f, "{{{child}}}")?,
                    }
                }
                write!(f, "</{name}>")
            }
            ExprKind::Text(text) => f.write_str(text),
        }
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Param::Ident(name) => f.write_str(name),
            Param::Array(pattern) => write!(f, "{pattern}"),
            Param::Dict(pattern) => write!(f, "{pattern}"),
        }
    }
}

impl Display for ArrayPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        write_joined(f, &self.elements, ", ")?;
        f.write_char(']')
    }
}

impl Display for DictPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        let mut first = true;
        for key in &self.keys {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            match &key.binding {
                KeyBinding::Same => f.write_str(&key.key)?,
                KeyBinding::Alias(alias) => write!(f, "{} as {alias}", key.key)?,
                KeyBinding::Nested(inner) => write!(f, "{}: {inner}", key.key)?,
            }
        }
        if let Some(rest) = &self.rest {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "...{rest}")?;
        }
        f.write_char('}')
    }
}

impl Display for BindingTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BindingTarget::Names(names) => write_joined(f, names, ", "),
            BindingTarget::Array(pattern) => write!(f, "{pattern}"),
            BindingTarget::Dict(pattern) => write!(f, "{pattern}"),
        }
    }
}
