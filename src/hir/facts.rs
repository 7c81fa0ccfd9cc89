//! Value types for derived module facts.
//!
//! Facts are what the extractors produce and the [`ErlangModule`] facade
//! answers queries with. They are plain values: cheap to clone, comparable,
//! and buildable from either a live tree traversal or a persisted stub — the
//! equality of those two sources is the model's central invariant.
//!
//! [`ErlangModule`]: crate::hir::ErlangModule

use smol_str::{SmolStr, format_smolstr};

use crate::base::TextRange;

/// Format the `"name/arity"` lookup key shared by functions, callbacks,
/// exports and imports.
pub fn signature(name: &str, arity: u32) -> SmolStr {
    format_smolstr!("{name}/{arity}")
}

/// A declared function, identified by (name, arity).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub name: SmolStr,
    pub arity: u32,
    pub range: TextRange,
}

impl Function {
    pub fn signature(&self) -> SmolStr {
        signature(&self.name, self.arity)
    }
}

/// A declared record, identified by name alone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub name: SmolStr,
    pub fields: Vec<SmolStr>,
    pub range: TextRange,
}

/// A macro definition, identified by name alone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Macro {
    pub name: SmolStr,
    pub range: TextRange,
}

/// A type declaration, identified by name alone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeAlias {
    pub name: SmolStr,
    pub range: TextRange,
}

/// A `-callback` declaration; arity is the count of declared argument
/// positions in its type signature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Callback {
    pub name: SmolStr,
    pub arity: u32,
    pub range: TextRange,
}

impl Callback {
    pub fn signature(&self) -> SmolStr {
        signature(&self.name, self.arity)
    }
}

/// One entry of an `-import(Module, [...]).` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportEntry {
    /// The module the function is imported from.
    pub module: SmolStr,
    pub name: SmolStr,
    pub arity: u32,
    pub range: TextRange,
}

impl ImportEntry {
    pub fn signature(&self) -> SmolStr {
        signature(&self.name, self.arity)
    }
}

/// A `-behaviour(Name)` / `-behavior(Name)` reference.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviourRef {
    pub name: SmolStr,
    pub range: TextRange,
}

/// A `-spec name/arity` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Spec {
    pub name: SmolStr,
    pub arity: u32,
    pub range: TextRange,
}

impl Spec {
    pub fn signature(&self) -> SmolStr {
        signature(&self.name, self.arity)
    }
}

/// An `-include` or `-include_lib` path.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Include {
    pub path: SmolStr,
    pub range: TextRange,
}
