//! A project-wide index of module semantic models.

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::debug;

use crate::hir::ErlangModule;

/// Module-name → module map for one project.
///
/// Registration order is preserved; a duplicate module name keeps the first
/// registration, matching the first-wins convention of the name-keyed fact
/// maps.
#[derive(Debug, Default)]
pub struct ProjectIndex {
    modules: IndexMap<SmolStr, Arc<ErlangModule>>,
}

impl ProjectIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a batch of modules, prefetching their hot fact categories in
    /// parallel first so registration and later queries hit warm slots.
    pub fn build(modules: impl IntoIterator<Item = Arc<ErlangModule>>) -> Self {
        let modules: Vec<_> = modules.into_iter().collect();
        modules.par_iter().for_each(|module| module.prefetch());

        let mut index = Self::new();
        for module in modules {
            index.add(module);
        }
        debug!(modules = index.len(), "built project index");
        index
    }

    /// Register a module. Returns false (and keeps the existing entry) when
    /// the name is already taken.
    pub fn add(&mut self, module: Arc<ErlangModule>) -> bool {
        let name = module.name();
        match self.modules.entry(name) {
            indexmap::map::Entry::Occupied(entry) => {
                debug!(module = %entry.key(), "duplicate module name ignored");
                false
            }
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(module);
                true
            }
        }
    }

    /// Look up a module by name.
    pub fn module(&self, name: &str) -> Option<&Arc<ErlangModule>> {
        self.modules.get(name)
    }

    /// All indexed modules, in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &Arc<ErlangModule>> {
        self.modules.values()
    }

    /// The modules that define a behaviour, in registration order.
    pub fn behaviour_modules(&self) -> Vec<Arc<ErlangModule>> {
        self.modules
            .values()
            .filter(|module| module.is_behaviour())
            .cloned()
            .collect()
    }

    /// Union of parse transforms declared across all indexed modules.
    pub fn declared_parse_transforms(&self) -> FxHashSet<SmolStr> {
        let mut transforms = FxHashSet::default();
        for module in self.modules.values() {
            module.add_declared_parse_transforms(&mut transforms);
        }
        transforms
    }

    /// Number of indexed modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
