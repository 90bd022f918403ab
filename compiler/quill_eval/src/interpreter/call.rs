//! Function application.

use quill_ir::Param;

use crate::errors::{
    not_callable, recursion_limit, type_mismatch, wrong_arity, EvalError, EvalResult,
};
use crate::interpreter::BindMode;
use crate::{Interpreter, Object};

impl Interpreter {
    /// Run `step` one level deeper. Function bodies and lazy dictionary
    /// fields both count; past `max_call_depth` levels this fails with
    /// the recursion limit instead of exhausting the stack.
    pub(crate) fn nested<T>(
        &self,
        step: impl FnOnce() -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        let depth = self.call_depth.get();
        if depth >= self.max_call_depth {
            return Err(recursion_limit(self.max_call_depth));
        }
        self.call_depth.set(depth + 1);
        let result = step();
        self.call_depth.set(depth);
        result
    }

    /// Call a closure or builtin with evaluated arguments.
    ///
    /// Closure parameters bind positionally in a fresh scope under the
    /// captured one. Extra arguments are ignored. A missing argument leaves
    /// a plain parameter unbound and binds every name of a pattern
    /// parameter to `null`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn apply_function(&self, callee: &Object, args: Vec<Object>) -> EvalResult {
        match callee {
            Object::Function(function) => self.nested(|| {
                let scope = self.scopes.child_of(&function.env);
                let mut args = args.into_iter();
                for param in &function.literal.params {
                    match args.next() {
                        Some(arg) => self.bind_param(param, arg, &scope, BindMode::Set)?,
                        None if matches!(param, Param::Ident(_)) => {}
                        None => Self::bind_nulls(param, &scope, BindMode::Set),
                    }
                }
                self.eval_block(&function.literal.body, &scope)
                    .map(Object::unwrap_return)
            }),
            Object::Builtin(builtin) => builtin.call(self, &args),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Apply `function` to each element of `iterable`, dropping `null`
    /// results. Strings iterate by character; dictionaries pass key and
    /// value and need a two-parameter function.
    pub fn map_iterable(&self, function: &Object, iterable: &Object) -> EvalResult {
        let mut results = Vec::new();
        let mut push = |value: Object| {
            if !value.is_null() {
                results.push(value);
            }
        };
        match iterable {
            Object::Array(items) => {
                for item in items {
                    push(self.apply_function(function, vec![item.clone()])?);
                }
            }
            Object::String(s) => {
                for c in s.chars() {
                    push(self.apply_function(function, vec![Object::String(c.to_string())])?);
                }
            }
            Object::Dict(dict) => {
                if let Object::Function(f) = function {
                    if f.literal.params.len() != 2 {
                        return Err(wrong_arity(
                            "dictionary iteration function",
                            "2",
                            f.literal.params.len(),
                        ));
                    }
                }
                for key in dict.keys() {
                    let value = self.dict_get(dict, &key)?.unwrap_or(Object::Null);
                    push(self.apply_function(function, vec![Object::String(key), value])?);
                }
            }
            other => {
                return Err(type_mismatch(format!(
                    "cannot iterate over {}",
                    other.type_name()
                )))
            }
        }
        Ok(Object::Array(results))
    }
}
