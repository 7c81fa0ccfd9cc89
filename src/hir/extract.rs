//! Fact extractors — one single-pass traversal per fact category.
//!
//! Extractors are pure functions of a [`SourceFile`]: no hidden state, no
//! failure path. A malformed attribute (wrong argument count, unexpected
//! expression shape) contributes nothing; extraction never errors.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::trace;

use crate::syntax::{AttrKind, Attribute, Form, SourceFile, Term};
use super::facts::{
    BehaviourRef, Callback, Function, ImportEntry, Include, Macro, Record, Spec, TypeAlias,
    signature,
};

/// The declared `-module(...)` name, if any.
pub fn module_name(src: &SourceFile) -> Option<SmolStr> {
    src.attributes().find_map(|attr| match &attr.kind {
        AttrKind::Module(name) => Some(name.clone()),
        _ => None,
    })
}

/// All function declarations, in source order.
pub fn functions(src: &SourceFile) -> Vec<Function> {
    let list: Vec<_> = src
        .forms()
        .iter()
        .filter_map(|form| match form {
            Form::Function(f) => Some(Function {
                name: f.name.clone(),
                arity: f.arity,
                range: f.range,
            }),
            _ => None,
        })
        .collect();
    trace!(count = list.len(), "extracted function facts");
    list
}

/// All record declarations, in source order.
pub fn records(src: &SourceFile) -> Vec<Record> {
    src.forms()
        .iter()
        .filter_map(|form| match form {
            Form::Record(r) => Some(Record {
                name: r.name.clone(),
                fields: r.fields.clone(),
                range: r.range,
            }),
            _ => None,
        })
        .collect()
}

/// All macro definitions, in source order.
pub fn macros(src: &SourceFile) -> Vec<Macro> {
    src.forms()
        .iter()
        .filter_map(|form| match form {
            Form::Macro(m) => Some(Macro {
                name: m.name.clone(),
                range: m.range,
            }),
            _ => None,
        })
        .collect()
}

/// All type declarations, in source order.
pub fn types(src: &SourceFile) -> Vec<TypeAlias> {
    src.forms()
        .iter()
        .filter_map(|form| match form {
            Form::Type(t) => Some(TypeAlias {
                name: t.name.clone(),
                range: t.range,
            }),
            _ => None,
        })
        .collect()
}

/// All attributes, in source order.
pub fn attributes(src: &SourceFile) -> Vec<Attribute> {
    src.attributes().cloned().collect()
}

/// Signatures listed by `-export([...])` attributes.
///
/// Entries without a resolvable arity are silently excluded.
pub fn exported_signatures(src: &SourceFile) -> FxHashSet<SmolStr> {
    let mut result = FxHashSet::default();
    for attr in src.attributes() {
        let AttrKind::Export(entries) = &attr.kind else {
            continue;
        };
        for entry in entries {
            if let Term::AtomArity { name, arity } = entry {
                result.insert(signature(name, *arity));
            }
        }
    }
    result
}

/// All import entries, in source order, tagged with their source module.
pub fn imports(src: &SourceFile) -> Vec<ImportEntry> {
    let mut result = Vec::new();
    for attr in src.attributes() {
        let AttrKind::Import { module, entries } = &attr.kind else {
            continue;
        };
        for entry in entries {
            if let Term::AtomArity { name, arity } = entry {
                result.push(ImportEntry {
                    module: module.clone(),
                    name: name.clone(),
                    arity: *arity,
                    range: attr.range,
                });
            }
        }
    }
    result
}

/// All `-callback` declarations, in source order; duplicates kept.
pub fn callbacks(src: &SourceFile) -> Vec<Callback> {
    src.attributes()
        .filter_map(|attr| match &attr.kind {
            AttrKind::Callback { name, args } => Some(Callback {
                name: name.clone(),
                arity: args.len() as u32,
                range: attr.range,
            }),
            _ => None,
        })
        .collect()
}

/// Entries of `-optional_callbacks([...])` attributes.
pub fn optional_callbacks(src: &SourceFile) -> Vec<Callback> {
    let mut result = Vec::new();
    for attr in src.attributes() {
        let AttrKind::OptionalCallbacks(entries) = &attr.kind else {
            continue;
        };
        for entry in entries {
            if let Term::AtomArity { name, arity } = entry {
                result.push(Callback {
                    name: name.clone(),
                    arity: *arity,
                    range: attr.range,
                });
            }
        }
    }
    result
}

/// Behaviour references, accepting both `-behaviour` and `-behavior`.
///
/// The typed attribute covers parsers that normalize the spelling; the wild
/// fallback covers ones that pass the American form through untyped.
pub fn behaviours(src: &SourceFile) -> Vec<BehaviourRef> {
    src.attributes()
        .filter_map(|attr| match &attr.kind {
            AttrKind::Behaviour(name) => Some(BehaviourRef {
                name: name.clone(),
                range: attr.range,
            }),
            AttrKind::Wild { name, args } if name == "behaviour" || name == "behavior" => {
                match args.as_slice() {
                    [term] => term.atom_name().map(|referenced| BehaviourRef {
                        name: referenced.into(),
                        range: attr.range,
                    }),
                    _ => None,
                }
            }
            _ => None,
        })
        .collect()
}

/// All `-spec` declarations, in source order.
pub fn specifications(src: &SourceFile) -> Vec<Spec> {
    src.attributes()
        .filter_map(|attr| match &attr.kind {
            AttrKind::Spec { name, arity } => Some(Spec {
                name: name.clone(),
                arity: *arity,
                range: attr.range,
            }),
            _ => None,
        })
        .collect()
}

/// All `-include` paths, in source order.
pub fn includes(src: &SourceFile) -> Vec<Include> {
    src.attributes()
        .filter_map(|attr| match &attr.kind {
            AttrKind::Include(path) => Some(Include {
                path: path.clone(),
                range: attr.range,
            }),
            _ => None,
        })
        .collect()
}

/// All `-include_lib` paths, in source order.
pub fn include_libs(src: &SourceFile) -> Vec<Include> {
    src.attributes()
        .filter_map(|attr| match &attr.kind {
            AttrKind::IncludeLib(path) => Some(Include {
                path: path.clone(),
                range: attr.range,
            }),
            _ => None,
        })
        .collect()
}

fn compile_args(src: &SourceFile) -> impl Iterator<Item = &Term> {
    src.attributes()
        .filter_map(|attr| match &attr.kind {
            AttrKind::Compile(args) => Some(args.iter()),
            _ => None,
        })
        .flatten()
}

/// Whether any `-compile(...)` argument carries the given bare-atom option.
///
/// The atom is accepted both as the whole argument (`-compile(export_all)`)
/// and as an element of a top-level list (`-compile([export_all, ...])`);
/// tuple options never match.
pub fn has_compile_option(src: &SourceFile, option: &str) -> bool {
    compile_args(src).any(|arg| {
        if arg.atom_name() == Some(option) {
            return true;
        }
        arg.as_list()
            .is_some_and(|items| items.iter().any(|item| item.atom_name() == Some(option)))
    })
}

/// Signatures suppressed by `{no_auto_import, [...]}` compile options.
///
/// The tuple is accepted as a whole compile argument or as an element of a
/// top-level list argument; its payload list is walked recursively,
/// collecting every `name/arity` token and every `{Name, Arity}` 2-tuple.
pub fn no_auto_import_signatures(src: &SourceFile) -> FxHashSet<SmolStr> {
    let mut result = FxHashSet::default();
    for arg in compile_args(src) {
        if let Some(items) = arg.as_list() {
            for item in items {
                no_auto_import_from_tuple(item, &mut result);
            }
        } else {
            no_auto_import_from_tuple(arg, &mut result);
        }
    }
    result
}

fn no_auto_import_from_tuple(term: &Term, result: &mut FxHashSet<SmolStr>) {
    let Some((head, payload)) = term.as_pair() else {
        return;
    };
    if head.atom_name() != Some("no_auto_import") || payload.as_list().is_none() {
        return;
    }
    payload.visit(&mut |t| match t {
        Term::AtomArity { name, arity } => {
            result.insert(signature(name, *arity));
        }
        Term::Tuple(items) => {
            if let [name, arity] = items.as_slice() {
                if let (Some(name), Some(arity)) = (name.atom_name(), term_arity(arity)) {
                    result.insert(signature(name, arity));
                }
            }
        }
        _ => {}
    });
}

fn term_arity(term: &Term) -> Option<u32> {
    term.integer().and_then(|i| u32::try_from(i).ok())
}

/// Parse-transform module names declared via `-compile(...)`, in encounter
/// order, without duplicates.
///
/// Recognizes `{parse_transform, Module}` tuples anywhere inside list or
/// tuple arguments, with either a single module atom or a list of them.
pub fn parse_transforms(src: &SourceFile) -> Vec<SmolStr> {
    let mut result = Vec::new();
    for arg in compile_args(src) {
        if matches!(arg, Term::List(_) | Term::Tuple(_)) {
            collect_parse_transforms(arg, &mut result);
        }
    }
    trace!(count = result.len(), "extracted parse transforms");
    result
}

fn collect_parse_transforms(term: &Term, result: &mut Vec<SmolStr>) {
    term.visit(&mut |t| {
        let Some((head, value)) = t.as_pair() else {
            return;
        };
        if head.atom_name() != Some("parse_transform") {
            return;
        }
        match value {
            Term::Atom(module) => push_unique(result, module.clone()),
            Term::List(items) => {
                for item in items {
                    if let Some(module) = item.atom_name() {
                        push_unique(result, module.into());
                    }
                }
            }
            _ => {}
        }
    });
}

fn push_unique(result: &mut Vec<SmolStr>, module: SmolStr) {
    if !result.contains(&module) {
        result.push(module);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::syntax::SourceFileBuilder;

    fn module_with_compile_args(args: Vec<Term>) -> SourceFile {
        let mut b = SourceFileBuilder::new(FileId::new(0));
        b.attribute("-module(sample).", AttrKind::Module("sample".into()));
        b.attribute("-compile(...).", AttrKind::Compile(args));
        b.finish()
    }

    #[test]
    fn test_export_entries_without_arity_are_skipped() {
        let mut b = SourceFileBuilder::new(FileId::new(0));
        b.attribute(
            "-export([foo/1, bar]).",
            AttrKind::Export(vec![Term::atom_arity("foo", 1), Term::atom("bar")]),
        );
        let src = b.finish();

        let sigs = exported_signatures(&src);
        assert_eq!(sigs.len(), 1);
        assert!(sigs.contains("foo/1"));
    }

    #[test]
    fn test_compile_option_as_bare_atom_and_in_list() {
        let bare = module_with_compile_args(vec![Term::atom("export_all")]);
        assert!(has_compile_option(&bare, "export_all"));

        let listed = module_with_compile_args(vec![Term::list([
            Term::atom("inline"),
            Term::atom("export_all"),
        ])]);
        assert!(has_compile_option(&listed, "export_all"));

        // a tuple never counts as the bare flag
        let tuple = module_with_compile_args(vec![Term::tuple([
            Term::atom("no_auto_import"),
            Term::list([Term::atom_arity("size", 1)]),
        ])]);
        assert!(!has_compile_option(&tuple, "no_auto_import"));
    }

    #[test]
    fn test_no_auto_import_tuple_forms() {
        // {no_auto_import, [size/1, {hd, 1}]} inside a list argument
        let src = module_with_compile_args(vec![Term::list([Term::tuple([
            Term::atom("no_auto_import"),
            Term::list([
                Term::atom_arity("size", 1),
                Term::tuple([Term::atom("hd"), Term::Integer(1)]),
            ]),
        ])])]);

        let sigs = no_auto_import_signatures(&src);
        assert!(sigs.contains("size/1"));
        assert!(sigs.contains("hd/1"));
        assert_eq!(sigs.len(), 2);
    }

    #[test]
    fn test_no_auto_import_tuple_as_whole_argument() {
        let src = module_with_compile_args(vec![Term::tuple([
            Term::atom("no_auto_import"),
            Term::list([Term::atom_arity("length", 1)]),
        ])]);

        assert!(no_auto_import_signatures(&src).contains("length/1"));
    }

    #[test]
    fn test_no_auto_import_malformed_shapes_contribute_nothing() {
        // wrong head atom, non-list payload, negative arity
        let src = module_with_compile_args(vec![
            Term::tuple([Term::atom("auto_import"), Term::list([])]),
            Term::tuple([Term::atom("no_auto_import"), Term::atom("size")]),
            Term::list([Term::tuple([
                Term::atom("no_auto_import"),
                Term::list([Term::tuple([Term::atom("size"), Term::Integer(-1)])]),
            ])]),
        ]);

        assert!(no_auto_import_signatures(&src).is_empty());
    }

    #[test]
    fn test_parse_transforms_from_tuple_and_list() {
        let src = module_with_compile_args(vec![
            Term::tuple([Term::atom("parse_transform"), Term::atom("lager_transform")]),
            Term::list([Term::tuple([
                Term::atom("parse_transform"),
                Term::list([Term::atom("ms_transform"), Term::atom("lager_transform")]),
            ])]),
        ]);

        assert_eq!(parse_transforms(&src), vec!["lager_transform", "ms_transform"]);
    }

    #[test]
    fn test_behaviour_both_spellings() {
        let mut b = SourceFileBuilder::new(FileId::new(0));
        b.attribute(
            "-behaviour(gen_server).",
            AttrKind::Behaviour("gen_server".into()),
        );
        b.attribute(
            "-behavior(gen_event).",
            AttrKind::Wild {
                name: "behavior".into(),
                args: vec![Term::atom("gen_event")],
            },
        );
        let src = b.finish();

        let names: Vec<_> = behaviours(&src).into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["gen_server", "gen_event"]);
    }

    #[test]
    fn test_callback_arity_is_argument_count() {
        let mut b = SourceFileBuilder::new(FileId::new(0));
        b.attribute(
            "-callback init(Args) -> {ok, term()}.",
            AttrKind::Callback {
                name: "init".into(),
                args: vec![Term::Other],
            },
        );
        b.attribute(
            "-callback handle_call(Req, From, State) -> term().",
            AttrKind::Callback {
                name: "handle_call".into(),
                args: vec![Term::Other, Term::Other, Term::Other],
            },
        );
        let src = b.finish();

        let cbs = callbacks(&src);
        assert_eq!(cbs[0].signature(), "init/1");
        assert_eq!(cbs[1].signature(), "handle_call/3");
    }

    #[test]
    fn test_imports_keep_source_module() {
        let mut b = SourceFileBuilder::new(FileId::new(0));
        b.attribute(
            "-import(lists, [map/2, filter/2]).",
            AttrKind::Import {
                module: "lists".into(),
                entries: vec![Term::atom_arity("map", 2), Term::atom_arity("filter", 2)],
            },
        );
        let src = b.finish();

        let entries = imports(&src);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.module == "lists"));
        assert_eq!(entries[0].signature(), "map/2");
    }
}
