//! The per-module query facade.
//!
//! [`ErlangModule`] owns one immutable [`SourceFile`] snapshot, an optional
//! [`ModuleStub`], and a set of compute-once fact slots. Every query is a
//! read over derived state; nothing here mutates the module. Whether a fact
//! category is served from the stub or from a live traversal is decided in
//! exactly one place per category — the cached getter — never in the query
//! methods themselves.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::syntax::{Attribute, SourceFile};
use super::cache::LazyFact;
use super::extract;
use super::facts::{
    BehaviourRef, Callback, Function, ImportEntry, Include, Macro, Record, Spec, TypeAlias,
    signature,
};
use super::stub::ModuleStub;

/// Fallback module name for a file: the file name without its last extension.
///
/// Used when no `-module(...)` attribute is present; `"parser.erl"` yields
/// `"parser"`, `"rebar.config"` yields `"rebar"`.
pub fn default_module_name(file_name: &str) -> SmolStr {
    match file_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem.into(),
        _ => file_name.into(),
    }
}

/// One fact slot per category; all scoped to a single snapshot.
#[derive(Debug, Default)]
struct DerivedFacts {
    module_name: LazyFact<Option<SmolStr>>,
    attributes: LazyFact<Vec<Attribute>>,
    functions: LazyFact<Vec<Function>>,
    records: LazyFact<Vec<Record>>,
    macros: LazyFact<Vec<Macro>>,
    types: LazyFact<Vec<TypeAlias>>,
    imports: LazyFact<Vec<ImportEntry>>,
    callbacks: LazyFact<Vec<Callback>>,
    optional_callbacks: LazyFact<Vec<Callback>>,
    behaviours: LazyFact<Vec<BehaviourRef>>,
    specifications: LazyFact<Vec<Spec>>,
    includes: LazyFact<Vec<Include>>,
    include_libs: LazyFact<Vec<Include>>,
    functions_by_name: LazyFact<FxHashMap<SmolStr, Vec<Function>>>,
    imports_by_name: LazyFact<FxHashMap<SmolStr, Vec<ImportEntry>>>,
    records_by_name: LazyFact<FxHashMap<SmolStr, Record>>,
    macros_by_name: LazyFact<FxHashMap<SmolStr, Macro>>,
    types_by_name: LazyFact<FxHashMap<SmolStr, TypeAlias>>,
    callback_map: LazyFact<IndexMap<SmolStr, Callback>>,
    exported_signatures: LazyFact<FxHashSet<SmolStr>>,
    exported_functions: LazyFact<Vec<Function>>,
    no_auto_import_signatures: LazyFact<FxHashSet<SmolStr>>,
    export_all: LazyFact<bool>,
    no_auto_import_all: LazyFact<bool>,
    parse_transforms: LazyFact<Vec<SmolStr>>,
}

/// The semantic model of one Erlang module.
#[derive(Debug)]
pub struct ErlangModule {
    source: Arc<SourceFile>,
    stub: Option<Arc<ModuleStub>>,
    default_name: SmolStr,
    facts: DerivedFacts,
}

impl ErlangModule {
    /// Build a tree-backed module. `file_name` supplies the fallback name
    /// used when the source declares no `-module(...)`.
    pub fn new(source: Arc<SourceFile>, file_name: &str) -> Self {
        Self {
            source,
            stub: None,
            default_name: default_module_name(file_name),
            facts: DerivedFacts::default(),
        }
    }

    /// Build a stub-backed module. Queries the stub precomputed, everything
    /// else falls back to the tree.
    pub fn with_stub(source: Arc<SourceFile>, stub: Arc<ModuleStub>, file_name: &str) -> Self {
        Self {
            source,
            stub: Some(stub),
            default_name: default_module_name(file_name),
            facts: DerivedFacts::default(),
        }
    }

    /// The underlying snapshot.
    pub fn source(&self) -> &Arc<SourceFile> {
        &self.source
    }

    /// The attached stub, if any.
    pub fn stub(&self) -> Option<&Arc<ModuleStub>> {
        self.stub.as_ref()
    }

    /// The declared `-module(...)` name, if present.
    pub fn module_name(&self) -> Option<SmolStr> {
        if let Some(stub) = &self.stub {
            return stub.module_name.clone();
        }
        self.facts
            .module_name
            .get_or_compute(|| extract::module_name(&self.source))
            .as_ref()
            .clone()
    }

    /// The effective module name: declared, else derived from the file name.
    pub fn name(&self) -> SmolStr {
        self.module_name().unwrap_or_else(|| self.default_name.clone())
    }

    // ------------------------------------------------------------------
    // Raw ordered snapshots, one per fact category
    // ------------------------------------------------------------------

    /// All attributes, in source order.
    pub fn attributes(&self) -> Arc<Vec<Attribute>> {
        self.facts
            .attributes
            .get_or_compute(|| extract::attributes(&self.source))
    }

    /// All functions, in source order.
    pub fn functions(&self) -> Arc<Vec<Function>> {
        self.facts.functions.get_or_compute(|| match &self.stub {
            Some(stub) => stub.functions.clone(),
            None => extract::functions(&self.source),
        })
    }

    /// All records, in source order.
    pub fn records(&self) -> Arc<Vec<Record>> {
        self.facts.records.get_or_compute(|| match &self.stub {
            Some(stub) => stub.records.clone(),
            None => extract::records(&self.source),
        })
    }

    /// All macro definitions, in source order.
    pub fn macros(&self) -> Arc<Vec<Macro>> {
        self.facts.macros.get_or_compute(|| match &self.stub {
            Some(stub) => stub.macros.clone(),
            None => extract::macros(&self.source),
        })
    }

    /// All type declarations, in source order.
    pub fn types(&self) -> Arc<Vec<TypeAlias>> {
        self.facts.types.get_or_compute(|| match &self.stub {
            Some(stub) => stub.types.clone(),
            None => extract::types(&self.source),
        })
    }

    /// All import entries, in source order.
    pub fn imported_functions(&self) -> Arc<Vec<ImportEntry>> {
        self.facts
            .imports
            .get_or_compute(|| extract::imports(&self.source))
    }

    /// All callback declarations, in source order, duplicates kept.
    pub fn callbacks(&self) -> Arc<Vec<Callback>> {
        self.facts.callbacks.get_or_compute(|| match &self.stub {
            Some(stub) => stub.callbacks.clone(),
            None => extract::callbacks(&self.source),
        })
    }

    /// All optional-callback entries, in source order.
    pub fn optional_callbacks(&self) -> Arc<Vec<Callback>> {
        self.facts
            .optional_callbacks
            .get_or_compute(|| match &self.stub {
                Some(stub) => stub.optional_callbacks.clone(),
                None => extract::optional_callbacks(&self.source),
            })
    }

    /// All behaviour references, in source order.
    pub fn behaviours(&self) -> Arc<Vec<BehaviourRef>> {
        self.facts.behaviours.get_or_compute(|| match &self.stub {
            Some(stub) => stub.behaviours.clone(),
            None => extract::behaviours(&self.source),
        })
    }

    /// All spec declarations, in source order.
    pub fn specifications(&self) -> Arc<Vec<Spec>> {
        self.facts
            .specifications
            .get_or_compute(|| match &self.stub {
                Some(stub) => stub.specifications.clone(),
                None => extract::specifications(&self.source),
            })
    }

    /// All `-include` paths, in source order.
    pub fn includes(&self) -> Arc<Vec<Include>> {
        self.facts
            .includes
            .get_or_compute(|| extract::includes(&self.source))
    }

    /// All `-include_lib` paths, in source order.
    pub fn include_libs(&self) -> Arc<Vec<Include>> {
        self.facts
            .include_libs
            .get_or_compute(|| extract::include_libs(&self.source))
    }

    /// The functions that are exported, in declaration order.
    pub fn exported_functions(&self) -> Arc<Vec<Function>> {
        self.facts.exported_functions.get_or_compute(|| {
            let export_all = self.is_exported_all();
            let sigs = self.exported_signatures();
            self.functions()
                .iter()
                .filter(|f| export_all || sigs.contains(&f.signature()))
                .cloned()
                .collect()
        })
    }

    /// The explicit export set (signatures listed in `-export` attributes).
    pub fn exported_signatures(&self) -> Arc<FxHashSet<SmolStr>> {
        self.facts
            .exported_signatures
            .get_or_compute(|| extract::exported_signatures(&self.source))
    }

    // ------------------------------------------------------------------
    // Keyed lookups
    // ------------------------------------------------------------------

    /// First function with this exact name and arity, if declared.
    pub fn function(&self, name: &str, arity: u32) -> Option<Function> {
        self.functions_by_name_map()
            .get(name)?
            .iter()
            .find(|f| f.arity == arity)
            .cloned()
    }

    /// Every declared arity for this name, in declaration order.
    pub fn functions_by_name(&self, name: &str) -> Vec<Function> {
        self.functions_by_name_map()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// The record with this name; on duplicates, the first declaration wins.
    pub fn record(&self, name: &str) -> Option<Record> {
        self.facts
            .records_by_name
            .get_or_compute(|| {
                let mut map = FxHashMap::default();
                for record in self.records().iter() {
                    map.entry(record.name.clone()).or_insert_with(|| record.clone());
                }
                map
            })
            .get(name)
            .cloned()
    }

    /// The macro with this name; on duplicates, the first definition wins.
    pub fn macro_def(&self, name: &str) -> Option<Macro> {
        self.facts
            .macros_by_name
            .get_or_compute(|| {
                let mut map = FxHashMap::default();
                for mac in self.macros().iter() {
                    map.entry(mac.name.clone()).or_insert_with(|| mac.clone());
                }
                map
            })
            .get(name)
            .cloned()
    }

    /// The type with this name; on duplicates, the first declaration wins.
    pub fn type_alias(&self, name: &str) -> Option<TypeAlias> {
        self.facts
            .types_by_name
            .get_or_compute(|| {
                let mut map = FxHashMap::default();
                for ty in self.types().iter() {
                    map.entry(ty.name.clone()).or_insert_with(|| ty.clone());
                }
                map
            })
            .get(name)
            .cloned()
    }

    /// The callback map keyed by `"name/arity"`; on duplicate signatures,
    /// the last declaration wins.
    pub fn callback_map(&self) -> Arc<IndexMap<SmolStr, Callback>> {
        self.facts.callback_map.get_or_compute(|| {
            let mut map = IndexMap::new();
            for callback in self.callbacks().iter() {
                map.insert(callback.signature(), callback.clone());
            }
            map
        })
    }

    /// The callback with this `"name/arity"` signature, if declared.
    pub fn callback_by_signature(&self, sig: &str) -> Option<Callback> {
        self.callback_map().get(sig).cloned()
    }

    /// The import entry matching this name and arity, if declared.
    pub fn imported_function(&self, name: &str, arity: u32) -> Option<ImportEntry> {
        self.facts
            .imports_by_name
            .get_or_compute(|| {
                let mut map: FxHashMap<SmolStr, Vec<ImportEntry>> = FxHashMap::default();
                for entry in self.imported_functions().iter() {
                    map.entry(entry.name.clone()).or_default().push(entry.clone());
                }
                map
            })
            .get(name)?
            .iter()
            .find(|entry| entry.arity == arity)
            .cloned()
    }

    fn functions_by_name_map(&self) -> Arc<FxHashMap<SmolStr, Vec<Function>>> {
        self.facts.functions_by_name.get_or_compute(|| {
            let mut map: FxHashMap<SmolStr, Vec<Function>> = FxHashMap::default();
            for function in self.functions().iter() {
                map.entry(function.name.clone()).or_default().push(function.clone());
            }
            map
        })
    }

    // ------------------------------------------------------------------
    // Flag-backed queries
    // ------------------------------------------------------------------

    /// Whether `-compile(export_all)` is in effect.
    pub fn is_exported_all(&self) -> bool {
        if let Some(stub) = &self.stub {
            return stub.export_all;
        }
        *self
            .facts
            .export_all
            .get_or_compute(|| extract::has_compile_option(&self.source, "export_all"))
    }

    /// Whether this `"name/arity"` signature is exported. `export_all`
    /// makes every signature exported, listed or not.
    pub fn is_exported(&self, sig: &str) -> bool {
        if self.is_exported_all() {
            return true;
        }
        self.exported_signatures().contains(sig)
    }

    /// Whether a bare `-compile(no_auto_import)` option is in effect.
    pub fn is_no_auto_import_all(&self) -> bool {
        *self
            .facts
            .no_auto_import_all
            .get_or_compute(|| extract::has_compile_option(&self.source, "no_auto_import"))
    }

    /// Whether auto-import of `name/arity` is suppressed, either globally or
    /// by an explicit `{no_auto_import, [...]}` entry.
    pub fn is_no_auto_import(&self, name: &str, arity: u32) -> bool {
        if self.is_no_auto_import_all() {
            return true;
        }
        self.facts
            .no_auto_import_signatures
            .get_or_compute(|| extract::no_auto_import_signatures(&self.source))
            .contains(&signature(name, arity))
    }

    /// Whether this module defines a behaviour: it exports
    /// `behaviour_info/1`, or declares at least one callback.
    pub fn is_behaviour(&self) -> bool {
        if let Some(stub) = &self.stub {
            return stub.is_behaviour;
        }
        let info = self.function("behaviour_info", 1);
        info.is_some_and(|f| self.is_exported(&f.signature())) || !self.callback_map().is_empty()
    }

    /// Add this module's declared parse transforms to `out`.
    ///
    /// Additive so callers can merge declarations from several sources (a
    /// module file plus a build config) into one running set. A stub answers
    /// from its flattened comma-joined string without touching the tree.
    pub fn add_declared_parse_transforms(&self, out: &mut FxHashSet<SmolStr>) {
        if let Some(stub) = &self.stub {
            if let Some(joined) = &stub.parse_transforms {
                out.extend(
                    joined
                        .split(',')
                        .filter(|part| !part.is_empty())
                        .map(SmolStr::from),
                );
            }
            return;
        }
        let transforms = self
            .facts
            .parse_transforms
            .get_or_compute(|| extract::parse_transforms(&self.source));
        out.extend(transforms.iter().cloned());
    }

    /// Populate the hot fact categories eagerly. Used by batch indexing so
    /// later queries from any thread hit warm slots.
    pub fn prefetch(&self) {
        self.functions();
        self.attributes();
        self.records();
        self.macros();
        self.types();
        self.exported_signatures();
        self.callback_map();
        self.behaviours();
        self.imported_functions();
        self.is_exported_all();
    }
}
