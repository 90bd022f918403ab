//! Lazy dictionaries.
//!
//! Entries hold unevaluated expressions plus the scope the literal was
//! written in. Reading an entry evaluates it afresh with `this` bound to
//! the dictionary, so fields behave like computed properties. Values
//! produced by the runtime itself (typed literals, merged entries,
//! component props) are stored as constants.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use quill_ir::Expr;

use crate::typed::TypedKind;
use crate::{Environment, Object};

#[derive(Clone)]
pub enum Entry {
    Lazy(Rc<Expr>),
    Value(Object),
}

pub struct Dict {
    entries: RefCell<IndexMap<String, Entry>>,
    env: Environment,
}

impl Dict {
    pub fn new(entries: IndexMap<String, Entry>, env: Environment) -> Self {
        Dict {
            entries: RefCell::new(entries),
            env,
        }
    }

    /// A dictionary of constant entries.
    pub fn from_values<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Object)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), Entry::Value(value)))
            .collect();
        Dict::new(entries, Environment::new())
    }

    /// Scope that lazy entries evaluate in.
    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// A copy of the raw entry; evaluating it is the interpreter's job.
    pub fn entry(&self, key: &str) -> Option<Entry> {
        self.entries.borrow().get(key).cloned()
    }

    /// The entry under `key` if it is a constant.
    pub fn value(&self, key: &str) -> Option<Object> {
        match self.entries.borrow().get(key) {
            Some(Entry::Value(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn entries(&self) -> Ref<'_, IndexMap<String, Entry>> {
        self.entries.borrow()
    }

    pub fn insert(&self, key: impl Into<String>, entry: Entry) {
        self.entries.borrow_mut().insert(key.into(), entry);
    }

    /// Remove `key`, keeping the order of the rest.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().shift_remove(key).is_some()
    }

    /// `__type` tag of a typed literal.
    pub fn typed_kind(&self) -> Option<TypedKind> {
        match self.value(crate::typed::TYPE_KEY)? {
            Object::String(name) => TypedKind::from_name(&name),
            _ => None,
        }
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, entry) in self.entries.borrow().iter() {
            match entry {
                Entry::Lazy(expr) => map.entry(key, &format_args!("<{expr}>")),
                Entry::Value(value) => map.entry(key, value),
            };
        }
        map.finish()
    }
}
