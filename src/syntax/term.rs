//! The Erlang expression tree consumed by fact extraction.
//!
//! Attribute payloads (`-compile(...)` arguments, export entries, rebar
//! config sections) arrive as [`Term`]s: a tagged-variant tree the extractors
//! walk by recursive descent. Anything the parser could not shape into one of
//! the recognized variants is [`Term::Other`]; extractors skip it, they never
//! fail on it.

use smol_str::SmolStr;

/// One Erlang expression, reduced to the shapes fact extraction cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// A bare atom: `export_all`, `lists`, `no_auto_import`.
    Atom(SmolStr),
    /// An integer literal.
    Integer(i64),
    /// A string literal, unquoted: `"include"`.
    Str(SmolStr),
    /// The `name/arity` token used in export and import lists: `foo/2`.
    AtomArity { name: SmolStr, arity: u32 },
    /// A list expression: `[...]`.
    List(Vec<Term>),
    /// A tuple expression: `{...}`.
    Tuple(Vec<Term>),
    /// Any expression with no semantic weight here (calls, macros, vars).
    Other,
}

impl Term {
    /// Construct an atom term.
    pub fn atom(name: impl Into<SmolStr>) -> Term {
        Term::Atom(name.into())
    }

    /// Construct a string term.
    pub fn string(value: impl Into<SmolStr>) -> Term {
        Term::Str(value.into())
    }

    /// Construct a `name/arity` token.
    pub fn atom_arity(name: impl Into<SmolStr>, arity: u32) -> Term {
        Term::AtomArity {
            name: name.into(),
            arity,
        }
    }

    /// Construct a list term.
    pub fn list(items: impl IntoIterator<Item = Term>) -> Term {
        Term::List(items.into_iter().collect())
    }

    /// Construct a tuple term.
    pub fn tuple(items: impl IntoIterator<Item = Term>) -> Term {
        Term::Tuple(items.into_iter().collect())
    }

    /// The atom's name, if this is an atom.
    pub fn atom_name(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            _ => None,
        }
    }

    /// The integer value, if this is an integer literal.
    pub fn integer(&self) -> Option<i64> {
        match self {
            Term::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The string content, if this is a string literal.
    pub fn string_value(&self) -> Option<&str> {
        match self {
            Term::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Term]> {
        match self {
            Term::List(items) => Some(items),
            _ => None,
        }
    }

    /// The elements, if this is a tuple.
    pub fn as_tuple(&self) -> Option<&[Term]> {
        match self {
            Term::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// The two elements of a 2-tuple, if this is one.
    pub fn as_pair(&self) -> Option<(&Term, &Term)> {
        match self.as_tuple()? {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    /// Pre-order walk over this term and everything nested in it.
    pub fn visit(&self, f: &mut dyn FnMut(&Term)) {
        f(self);
        match self {
            Term::List(items) | Term::Tuple(items) => {
                for item in items {
                    item.visit(f);
                }
            }
            _ => {}
        }
    }
}
