//! The precomputed module stub.
//!
//! A [`ModuleStub`] is a compact summary of a module's top-level
//! declarations: flattened fact lists per category plus a few precomputed
//! scalars. It is built once (typically at index time) and can be persisted,
//! letting later sessions answer most facade queries without re-walking the
//! tree. A stub-backed module must answer every query exactly like a
//! tree-backed one; the stub is built with the same extractors to keep that
//! invariant structural rather than aspirational.

use smol_str::SmolStr;
use tracing::debug;

use crate::syntax::SourceFile;
use super::extract;
use super::facts::{BehaviourRef, Callback, Function, Macro, Record, Spec, TypeAlias, signature};

/// Precomputed summary of one module's declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleStub {
    /// Declared `-module(...)` name, if any.
    pub module_name: Option<SmolStr>,
    /// Function facts, in source order.
    pub functions: Vec<Function>,
    /// Record facts, in source order.
    pub records: Vec<Record>,
    /// Macro facts, in source order.
    pub macros: Vec<Macro>,
    /// Type facts, in source order.
    pub types: Vec<TypeAlias>,
    /// Callback facts, in source order, duplicates kept.
    pub callbacks: Vec<Callback>,
    /// Optional-callback facts, in source order.
    pub optional_callbacks: Vec<Callback>,
    /// Behaviour references, in source order.
    pub behaviours: Vec<BehaviourRef>,
    /// Spec facts, in source order.
    pub specifications: Vec<Spec>,
    /// Whether a `-compile(export_all)` option is present.
    pub export_all: bool,
    /// Whether the module defines a behaviour (exported `behaviour_info/1`
    /// or at least one callback).
    pub is_behaviour: bool,
    /// Comma-joined parse-transform module names; `None` when there are none.
    pub parse_transforms: Option<SmolStr>,
}

impl ModuleStub {
    /// Summarize a parsed file.
    pub fn build(src: &SourceFile) -> Self {
        let functions = extract::functions(src);
        let callbacks = extract::callbacks(src);
        let export_all = extract::has_compile_option(src, "export_all");

        let behaviour_info_exported = functions
            .iter()
            .any(|f| f.name == "behaviour_info" && f.arity == 1)
            && (export_all || extract::exported_signatures(src).contains(&signature("behaviour_info", 1)));
        let is_behaviour = behaviour_info_exported || !callbacks.is_empty();

        let transforms = extract::parse_transforms(src);
        let parse_transforms = if transforms.is_empty() {
            None
        } else {
            Some(SmolStr::from(transforms.join(",")))
        };

        let stub = Self {
            module_name: extract::module_name(src),
            functions,
            records: extract::records(src),
            macros: extract::macros(src),
            types: extract::types(src),
            callbacks,
            optional_callbacks: extract::optional_callbacks(src),
            behaviours: extract::behaviours(src),
            specifications: extract::specifications(src),
            export_all,
            is_behaviour,
            parse_transforms,
        };
        debug!(
            file = %src.file(),
            functions = stub.functions.len(),
            callbacks = stub.callbacks.len(),
            "built module stub"
        );
        stub
    }

    /// Serialize for persistence.
    #[cfg(feature = "persist")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize a persisted stub.
    #[cfg(feature = "persist")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
