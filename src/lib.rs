//! # erlang-analyzer-base
//!
//! Core library for Erlang syntax facts, per-module semantic analysis, and
//! project metadata.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project → cross-module index, rebar config, OTP app facts
//!   ↓
//! hir     → per-module semantic model: fact extraction + caching + facade
//!   ↓
//! syntax  → the consumed tree: terms, forms, source snapshots
//!   ↓
//! base    → primitives (FileId, spans, line index)
//! ```
//!
//! The semantic model is pull-based: an [`hir::ErlangModule`] computes
//! nothing until queried, caches each fact category on first access, and is
//! scoped to one immutable [`syntax::SourceFile`] snapshot — an edit means a
//! new snapshot, not an invalidation protocol. A module built over a
//! persisted [`hir::ModuleStub`] answers every query identically to one
//! walking the tree.

/// Foundation types: FileId, spans, line/column conversion
pub mod base;

/// Per-module semantic model: facts, extractors, cache, facade
pub mod hir;

/// Project metadata: rebar config readers, OTP apps, module index
pub mod project;

/// The consumed syntax tree: terms, forms, source files
pub mod syntax;

// Re-export commonly needed items
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
pub use hir::{ErlangModule, ModuleStub};
pub use syntax::{SourceFile, SourceFileBuilder, Term};
