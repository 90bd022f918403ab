//! Binding values to names and patterns.

use indexmap::IndexMap;
use quill_ir::{BindingTarget, DictPattern, KeyBinding, Param};

use crate::errors::{destructure_mismatch, EvalError};
use crate::{Dict, Environment, Interpreter, Object};

/// How a binding writes to the scope chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BindMode {
    /// `let`: bind in the current scope.
    Set,
    /// Bare assignment: overwrite the nearest definition.
    Update,
}

impl BindMode {
    fn write(self, env: &Environment, name: &str, value: Object) {
        match self {
            BindMode::Set => env.set(name, value),
            BindMode::Update => env.update(name, value),
        }
    }
}

impl Interpreter {
    pub(crate) fn bind_target(
        &self,
        target: &BindingTarget,
        value: Object,
        env: &Environment,
        mode: BindMode,
    ) -> Result<(), EvalError> {
        match target {
            BindingTarget::Names(names) if names.len() == 1 => {
                mode.write(env, &names[0], value);
                Ok(())
            }
            BindingTarget::Names(names) => {
                let params: Vec<Param> = names.iter().cloned().map(Param::Ident).collect();
                self.bind_array(&params, value, env, mode)
            }
            BindingTarget::Array(pattern) => self.bind_array(&pattern.elements, value, env, mode),
            BindingTarget::Dict(pattern) => self.bind_dict(pattern, value, env, mode),
        }
    }

    pub(crate) fn bind_param(
        &self,
        param: &Param,
        value: Object,
        env: &Environment,
        mode: BindMode,
    ) -> Result<(), EvalError> {
        match param {
            Param::Ident(name) => {
                mode.write(env, name, value);
                Ok(())
            }
            Param::Array(pattern) => self.bind_array(&pattern.elements, value, env, mode),
            Param::Dict(pattern) => self.bind_dict(pattern, value, env, mode),
        }
    }

    /// Bind every name `param` introduces to `null`.
    pub(crate) fn bind_nulls(param: &Param, env: &Environment, mode: BindMode) {
        for name in param.bound_names() {
            mode.write(env, name, Object::Null);
        }
    }

    /// Positional binding. A non-array value acts as a one-element array;
    /// names past the end get `null`; when elements are left over the last
    /// name is rebound to all elements from its position on.
    fn bind_array(
        &self,
        elements: &[Param],
        value: Object,
        env: &Environment,
        mode: BindMode,
    ) -> Result<(), EvalError> {
        let items = match value {
            Object::Array(items) => items,
            other => vec![other],
        };
        for (i, param) in elements.iter().enumerate() {
            let item = items.get(i).cloned().unwrap_or(Object::Null);
            self.bind_param(param, item, env, mode)?;
        }
        if let Some(last) = elements.len().checked_sub(1) {
            if items.len() > elements.len() {
                let rest = Object::Array(items[last..].to_vec());
                self.bind_param(&elements[last], rest, env, mode)?;
            }
        }
        Ok(())
    }

    /// Keyed binding from a dictionary. Each key is read through the
    /// dictionary so lazy entries see `this`; missing keys bind `null`.
    /// `...rest` collects the remaining raw entries into a new dictionary
    /// sharing the source's scope.
    fn bind_dict(
        &self,
        pattern: &DictPattern,
        value: Object,
        env: &Environment,
        mode: BindMode,
    ) -> Result<(), EvalError> {
        let Object::Dict(dict) = value else {
            return Err(destructure_mismatch(format!(
                "cannot destructure {} with a dictionary pattern",
                value.type_name()
            )));
        };
        for key in &pattern.keys {
            let found = self.dict_get(&dict, &key.key)?;
            match &key.binding {
                KeyBinding::Same => mode.write(env, &key.key, found.unwrap_or(Object::Null)),
                KeyBinding::Alias(alias) => mode.write(env, alias, found.unwrap_or(Object::Null)),
                KeyBinding::Nested(inner) => match found {
                    Some(Object::Null) | None => Self::bind_nulls(inner, env, mode),
                    Some(found) => self.bind_param(inner, found, env, mode)?,
                },
            }
        }
        if let Some(rest) = &pattern.rest {
            let remaining: IndexMap<_, _> = dict
                .entries()
                .iter()
                .filter(|(name, _)| !pattern.keys.iter().any(|k| &k.key == *name))
                .map(|(name, entry)| (name.clone(), entry.clone()))
                .collect();
            mode.write(env, rest, Object::dict(Dict::new(remaining, dict.env().clone())));
        }
        Ok(())
    }
}
