//! Top-level forms of a parsed module.
//!
//! The parser lowers each top-level declaration into one [`Form`]: a function,
//! record, macro or type declaration, or an [`Attribute`]. Attribute payloads
//! that the extractors pattern-match on (export entries, compile arguments,
//! optional-callback lists) stay raw [`Term`]s, so a malformed attribute is
//! representable and simply contributes nothing downstream.

use smol_str::SmolStr;

use crate::base::TextRange;
use super::term::Term;

/// A function declaration: all clauses of `name/arity`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: SmolStr,
    pub arity: u32,
    pub range: TextRange,
}

/// A record declaration: `-record(name, {field, ...}).`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordDecl {
    pub name: SmolStr,
    pub fields: Vec<SmolStr>,
    pub range: TextRange,
}

/// A macro definition: `-define(NAME, ...).`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroDecl {
    pub name: SmolStr,
    pub range: TextRange,
}

/// A type declaration: `-type name() :: ...` / `-opaque name() :: ...`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: SmolStr,
    pub range: TextRange,
}

/// A module attribute other than a function/record/macro/type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub kind: AttrKind,
    pub range: TextRange,
}

/// The recognized attribute shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrKind {
    /// `-module(name).`
    Module(SmolStr),
    /// `-export([...]).` — entries are usually [`Term::AtomArity`]; anything
    /// else is carried through and skipped at extraction.
    Export(Vec<Term>),
    /// `-import(Module, [...]).`
    Import { module: SmolStr, entries: Vec<Term> },
    /// `-compile(...)` — one entry per argument expression.
    Compile(Vec<Term>),
    /// `-behaviour(Name).` (or `-behavior`, normalized by the parser)
    Behaviour(SmolStr),
    /// `-callback name(Args) -> ...` — one term per declared argument position.
    Callback { name: SmolStr, args: Vec<Term> },
    /// `-optional_callbacks([...]).`
    OptionalCallbacks(Vec<Term>),
    /// `-spec name/arity :: ...`
    Spec { name: SmolStr, arity: u32 },
    /// `-include("path").`
    Include(SmolStr),
    /// `-include_lib("app/include/path").`
    IncludeLib(SmolStr),
    /// Any attribute the parser did not give a dedicated shape.
    Wild { name: SmolStr, args: Vec<Term> },
}

impl Attribute {
    /// The attribute's leading name, for diagnostics and wild-attribute scans.
    pub fn name(&self) -> &str {
        match &self.kind {
            AttrKind::Module(_) => "module",
            AttrKind::Export(_) => "export",
            AttrKind::Import { .. } => "import",
            AttrKind::Compile(_) => "compile",
            AttrKind::Behaviour(_) => "behaviour",
            AttrKind::Callback { .. } => "callback",
            AttrKind::OptionalCallbacks(_) => "optional_callbacks",
            AttrKind::Spec { .. } => "spec",
            AttrKind::Include(_) => "include",
            AttrKind::IncludeLib(_) => "include_lib",
            AttrKind::Wild { name, .. } => name,
        }
    }
}

/// One top-level form of a module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Form {
    Function(FunctionDecl),
    Record(RecordDecl),
    Macro(MacroDecl),
    Type(TypeDecl),
    Attribute(Attribute),
}

impl Form {
    /// The source range this form covers.
    pub fn range(&self) -> TextRange {
        match self {
            Form::Function(f) => f.range,
            Form::Record(r) => r.range,
            Form::Macro(m) => m.range,
            Form::Type(t) => t.range,
            Form::Attribute(a) => a.range,
        }
    }

    /// This form as an attribute, if it is one.
    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Form::Attribute(attr) => Some(attr),
            _ => None,
        }
    }
}
