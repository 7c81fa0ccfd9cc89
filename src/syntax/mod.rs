//! The syntax tree consumed by the semantic model.
//!
//! Built by an external parser; this crate only reads it. `Term` is the
//! expression layer, `Form`/`Attribute` the top-level declaration layer, and
//! `SourceFile` the immutable per-file snapshot the semantic model hangs off.

mod form;
mod source;
mod term;

pub use form::{AttrKind, Attribute, Form, FunctionDecl, MacroDecl, RecordDecl, TypeDecl};
pub use source::{SourceFile, SourceFileBuilder};
pub use term::Term;
