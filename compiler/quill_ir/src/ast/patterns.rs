//! Binding patterns shared by function parameters, `let` and assignment.

/// A function parameter, or one element of an array pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    Ident(String),
    Array(ArrayPattern),
    Dict(DictPattern),
}

impl Param {
    /// Every name this parameter binds, in source order.
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Param::Ident(name) => out.push(name),
            Param::Array(pattern) => {
                for element in &pattern.elements {
                    element.collect_names(out);
                }
            }
            Param::Dict(pattern) => pattern.collect_names(out),
        }
    }
}

/// `[a, b, [c, d]]`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ArrayPattern {
    pub elements: Vec<Param>,
}

/// `{a, b as c, d: {e}, ...rest}`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DictPattern {
    pub keys: Vec<DictPatternKey>,
    /// Name receiving a dictionary of every key not listed in `keys`.
    pub rest: Option<String>,
}

impl DictPattern {
    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        for key in &self.keys {
            match &key.binding {
                KeyBinding::Same => out.push(&key.key),
                KeyBinding::Alias(alias) => out.push(alias),
                KeyBinding::Nested(inner) => inner.collect_names(out),
            }
        }
        if let Some(rest) = &self.rest {
            out.push(rest);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DictPatternKey {
    pub key: String,
    pub binding: KeyBinding,
}

/// How a requested dictionary key is bound.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyBinding {
    /// `{key}` binds `key`.
    Same,
    /// `{key as other}` binds `other`.
    Alias(String),
    /// `{key: [a, b]}` / `{key: {c}}` destructures the value further.
    Nested(Param),
}

/// Left-hand side of `let` and of destructuring assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum BindingTarget {
    /// `x` or `a, b, c`
    Names(Vec<String>),
    Array(ArrayPattern),
    Dict(DictPattern),
}
