//! Expression evaluation.

use indexmap::IndexMap;
use quill_ir::{Expr, ExprKind, InfixOp};

use super::Interpreter;
use crate::errors::{index_out_of_range, type_mismatch, unknown_identifier, EvalError, EvalResult};
use crate::operators::{evaluate_binary, evaluate_prefix};
use crate::{builtins, methods, typed, Dict, Entry, Environment, Object};

impl Interpreter {
    /// Evaluate `expr` in `env`. Errors leaving here carry the position of
    /// the innermost expression that failed.
    pub fn eval_expr(&self, expr: &Expr, env: &Environment) -> EvalResult {
        quill_stack::ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
            .map_err(|e| e.at(expr.pos))
    }

    fn eval_expr_inner(&self, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            ExprKind::Ident(name) => eval_ident(name, env),
            ExprKind::Int(n) => Ok(Object::Integer(*n)),
            ExprKind::Float(x) => Ok(Object::Float(*x)),
            ExprKind::Str(s) => Ok(Object::String(s.clone())),
            ExprKind::Bool(b) => Ok(Object::Boolean(*b)),
            ExprKind::Null => Ok(Object::Null),
            ExprKind::Template(raw) => self.render_template(raw, env).map(Object::String),
            ExprKind::Regex { pattern, flags } => typed::regex(pattern, flags),
            ExprKind::DateTime(text) => typed::datetime(text),
            ExprKind::Duration(text) => typed::duration(text),
            ExprKind::Path(text) => Ok(typed::path(text)),
            ExprKind::Url(text) => typed::url(text),
            ExprKind::Prefix { op, operand } => {
                let operand = self.eval_expr(operand, env)?;
                evaluate_prefix(*op, &operand)
            }
            ExprKind::Infix { op, left, right } => self.eval_infix(*op, left, right, env),
            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                if self.eval_expr(condition, env)?.is_truthy() {
                    self.eval_block(consequence, &self.scopes.child_of(env))
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, &self.scopes.child_of(env))
                } else {
                    Ok(Object::Null)
                }
            }
            ExprKind::Function(literal) => Ok(Object::function(literal.clone(), env.clone())),
            ExprKind::Call { function, args } => self.eval_call(function, args, env),
            ExprKind::Array(elements) => elements
                .iter()
                .map(|element| self.eval_expr(element, env))
                .collect::<Result<Vec<_>, _>>()
                .map(Object::Array),
            ExprKind::Dict(entries) => {
                let entries: IndexMap<String, Entry> = entries
                    .iter()
                    .map(|entry| (entry.key.clone(), Entry::Lazy(entry.value.clone())))
                    .collect();
                Ok(Object::dict(Dict::new(entries, env.clone())))
            }
            ExprKind::Dot { object, property } => {
                let object = self.eval_expr(object, env)?;
                self.read_property(&object, property)
            }
            ExprKind::Index { object, index } => {
                let object = self.eval_expr(object, env)?;
                let index = self.eval_expr(index, env)?;
                self.eval_index(&object, &index)
            }
            ExprKind::Slice { object, start, end } => {
                let object = self.eval_expr(object, env)?;
                let start = self.eval_bound(start.as_deref(), env)?;
                let end = self.eval_bound(end.as_deref(), env)?;
                eval_slice(&object, start, end)
            }
            ExprKind::For { iterable, function } => {
                let iterable = self.eval_expr(iterable, env)?;
                let function = self.eval_expr(function, env)?;
                self.map_iterable(&function, &iterable)
            }
            ExprKind::TagSingleton { name, attrs } => {
                self.eval_tag(name, attrs, None, expr.pos, env)
            }
            ExprKind::TagPair {
                name,
                attrs,
                children,
            } => self.eval_tag(name, attrs, Some(children), expr.pos, env),
            ExprKind::Text(text) => Ok(Object::String(text.clone())),
        }
    }

    fn eval_infix(&self, op: InfixOp, left: &Expr, right: &Expr, env: &Environment) -> EvalResult {
        match op {
            InfixOp::And => {
                let left = self.eval_expr(left, env)?;
                if left.is_truthy() {
                    self.eval_expr(right, env)
                } else {
                    Ok(left)
                }
            }
            InfixOp::Or => {
                let left = self.eval_expr(left, env)?;
                if left.is_truthy() {
                    Ok(left)
                } else {
                    self.eval_expr(right, env)
                }
            }
            InfixOp::Comma => self.eval_comma(left, right, env),
            InfixOp::Concat => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                self.concat(left, right)
            }
            _ => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                evaluate_binary(op, &left, &right)
            }
        }
    }

    /// `a, b, c` parses as `((a , b) , c)` and evaluates to `[a, b, c]`.
    fn eval_comma(&self, left: &Expr, right: &Expr, env: &Environment) -> EvalResult {
        let mut rights = vec![right];
        let mut head = left;
        while let ExprKind::Infix {
            op: InfixOp::Comma,
            left,
            right,
        } = &head.kind
        {
            rights.push(right);
            head = left;
        }
        let mut items = Vec::with_capacity(rights.len() + 1);
        items.push(self.eval_expr(head, env)?);
        for expr in rights.into_iter().rev() {
            items.push(self.eval_expr(expr, env)?);
        }
        Ok(Object::Array(items))
    }

    /// `++`: arrays concatenate, dictionaries merge, anything else joins
    /// as text.
    fn concat(&self, left: Object, right: Object) -> EvalResult {
        match (left, right) {
            (Object::Array(mut a), Object::Array(b)) => {
                a.extend(b);
                Ok(Object::Array(a))
            }
            (Object::Array(mut a), item) => {
                a.push(item);
                Ok(Object::Array(a))
            }
            (item, Object::Array(b)) => {
                let mut items = Vec::with_capacity(b.len() + 1);
                items.push(item);
                items.extend(b);
                Ok(Object::Array(items))
            }
            (Object::Dict(a), Object::Dict(b)) => {
                let mut entries = a.entries().clone();
                for key in b.keys() {
                    let value = self.dict_get(&b, &key)?.unwrap_or(Object::Null);
                    entries.insert(key, Entry::Value(value));
                }
                Ok(Object::dict(Dict::new(entries, a.env().clone())))
            }
            (left @ Object::Dict(_), right) | (left, right @ Object::Dict(_))
                if !left.as_dict().is_some_and(|d| d.typed_kind().is_some())
                    && !right.as_dict().is_some_and(|d| d.typed_kind().is_some()) =>
            {
                Err(crate::errors::unsupported_operator(
                    "++",
                    left.type_name(),
                    right.type_name(),
                ))
            }
            (left, right) => Ok(Object::String(format!(
                "{}{}",
                self.stringify(&left)?,
                self.stringify(&right)?
            ))),
        }
    }

    fn eval_bound(
        &self,
        bound: Option<&Expr>,
        env: &Environment,
    ) -> Result<Option<i64>, EvalError> {
        let Some(expr) = bound else {
            return Ok(None);
        };
        match self.eval_expr(expr, env)? {
            Object::Integer(n) => Ok(Some(n)),
            Object::Null => Ok(None),
            other => Err(type_mismatch(format!(
                "slice bounds must be integers, got {}",
                other.type_name()
            ))
            .at(expr.pos)),
        }
    }

    /// `object.property`. Dictionaries read the key (missing keys are
    /// `null`); other values have no properties.
    fn read_property(&self, object: &Object, property: &str) -> EvalResult {
        match object {
            Object::Dict(dict) => Ok(self.dict_get(dict, property)?.unwrap_or(Object::Null)),
            other => Err(type_mismatch(format!(
                "cannot read property `{property}` of {}",
                other.type_name()
            ))),
        }
    }

    fn eval_index(&self, object: &Object, index: &Object) -> EvalResult {
        match (object, index) {
            (Object::Array(items), Object::Integer(i)) => resolve_index(*i, items.len())
                .map(|at| items[at].clone())
                .ok_or_else(|| index_out_of_range(*i, items.len())),
            (Object::String(s), Object::Integer(i)) => {
                let len = s.chars().count();
                resolve_index(*i, len)
                    .and_then(|at| s.chars().nth(at))
                    .map(|c| Object::String(c.to_string()))
                    .ok_or_else(|| index_out_of_range(*i, len))
            }
            (Object::Dict(dict), Object::String(key)) => {
                Ok(self.dict_get(dict, key)?.unwrap_or(Object::Null))
            }
            (Object::Dict(dict), Object::Integer(n)) => {
                Ok(self.dict_get(dict, &n.to_string())?.unwrap_or(Object::Null))
            }
            (object, index) => Err(type_mismatch(format!(
                "cannot index {} with {}",
                object.type_name(),
                index.type_name()
            ))),
        }
    }

    /// `f(args)` and `receiver.method(args)`.
    fn eval_call(&self, function: &Expr, args: &[Expr], env: &Environment) -> EvalResult {
        let callee = if let ExprKind::Dot { object, property } = &function.kind {
            let receiver = self.eval_expr(object, env)?;
            let holds_key = receiver.as_dict().is_some_and(|d| d.contains_key(property));
            if !holds_key && methods::find(&receiver, property).is_some() {
                let args = self.eval_args(args, env)?;
                return methods::call(self, &receiver, property, &args);
            }
            if !matches!(receiver, Object::Dict(_)) {
                return Err(crate::errors::unknown_method(receiver.type_name(), property));
            }
            self.read_property(&receiver, property)
                .map_err(|e| e.at(function.pos))?
        } else {
            self.eval_expr(function, env)?
        };
        let args = self.eval_args(args, env)?;
        self.apply_function(&callee, args)
    }

    fn eval_args(&self, args: &[Expr], env: &Environment) -> Result<Vec<Object>, EvalError> {
        args.iter().map(|arg| self.eval_expr(arg, env)).collect()
    }
}

/// Scope binding first, then the builtin table.
pub(super) fn eval_ident(name: &str, env: &Environment) -> EvalResult {
    if let Some(value) = env.get(name) {
        return Ok(value);
    }
    builtins::lookup(name)
        .map(Object::Builtin)
        .ok_or_else(|| unknown_identifier(name))
}

/// Map a possibly negative index into `0..len`.
fn resolve_index(i: i64, len: usize) -> Option<usize> {
    if i >= 0 {
        usize::try_from(i).ok().filter(|&at| at < len)
    } else {
        let back = usize::try_from(i.unsigned_abs()).ok()?;
        len.checked_sub(back)
    }
}

/// Clamp a slice bound into `0..=len`; negative bounds count from the end.
fn clamp_bound(bound: i64, len: usize) -> usize {
    if bound >= 0 {
        usize::try_from(bound).map_or(len, |b| b.min(len))
    } else {
        usize::try_from(bound.unsigned_abs()).map_or(0, |back| len.saturating_sub(back))
    }
}

fn eval_slice(object: &Object, start: Option<i64>, end: Option<i64>) -> EvalResult {
    let range = |len: usize| {
        let from = start.map_or(0, |s| clamp_bound(s, len));
        let to = end.map_or(len, |e| clamp_bound(e, len));
        (from, to.max(from))
    };
    match object {
        Object::Array(items) => {
            let (from, to) = range(items.len());
            Ok(Object::Array(items[from..to].to_vec()))
        }
        Object::String(s) => {
            let (from, to) = range(s.chars().count());
            Ok(Object::String(s.chars().skip(from).take(to - from).collect()))
        }
        other => Err(type_mismatch(format!("cannot slice {}", other.type_name()))),
    }
}
