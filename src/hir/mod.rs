//! The semantic model: per-module derived facts with snapshot-scoped caching.
//!
//! Data flows facade → cache → source: [`ErlangModule`] answers queries from
//! compute-once [`LazyFact`] slots, and each slot is filled from the
//! [`ModuleStub`] when one is attached, else by a [fact extractor](extract)
//! walking the tree. Both sources must produce identical answers; the stub is
//! built with the same extractors to keep that invariant structural.
//!
//! Nothing is computed until first queried, and nothing is ever recomputed:
//! a source edit produces a new [`SourceFile`](crate::syntax::SourceFile)
//! snapshot and a new `ErlangModule` around it.

mod cache;
pub mod extract;
pub mod facts;
mod module;
mod stub;

pub use cache::LazyFact;
pub use facts::{
    BehaviourRef, Callback, Function, ImportEntry, Include, Macro, Record, Spec, TypeAlias,
    signature,
};
pub use module::{ErlangModule, default_module_name};
pub use stub::ModuleStub;
