//! Facade behavior over a live syntax tree: export and no-auto-import
//! monotonicity, name/arity lookups, tie-breaks, and cache idempotence.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rstest::rstest;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use erlang_analyzer::FileId;
use erlang_analyzer::hir::ErlangModule;
use erlang_analyzer::syntax::{AttrKind, SourceFileBuilder, Term};

fn build_module(file_name: &str, build: impl FnOnce(&mut SourceFileBuilder)) -> ErlangModule {
    let mut b = SourceFileBuilder::new(FileId::new(0));
    build(&mut b);
    ErlangModule::new(Arc::new(b.finish()), file_name)
}

/// A module exercising most fact categories at once, shared across cases.
static FIXTURE: Lazy<ErlangModule> = Lazy::new(|| {
    build_module("kitchen_sink.erl", |b| {
        b.attribute("-module(kitchen_sink).", AttrKind::Module("kitchen_sink".into()));
        b.attribute(
            "-behaviour(gen_server).",
            AttrKind::Behaviour("gen_server".into()),
        );
        b.attribute(
            "-export([init/1, handle_call/3]).",
            AttrKind::Export(vec![
                Term::atom_arity("init", 1),
                Term::atom_arity("handle_call", 3),
            ]),
        );
        b.attribute(
            "-import(lists, [map/2, filter/2]).",
            AttrKind::Import {
                module: "lists".into(),
                entries: vec![Term::atom_arity("map", 2), Term::atom_arity("filter", 2)],
            },
        );
        b.attribute(
            "-include(\"records.hrl\").",
            AttrKind::Include("records.hrl".into()),
        );
        b.attribute(
            "-include_lib(\"kernel/include/file.hrl\").",
            AttrKind::IncludeLib("kernel/include/file.hrl".into()),
        );
        b.record("-record(state, {count, name}).", "state", &["count", "name"]);
        b.macro_def("-define(TIMEOUT, 5000).", "TIMEOUT");
        b.type_def("-type state_name() :: atom().", "state_name");
        b.attribute(
            "-spec init(term()) -> {ok, state}.",
            AttrKind::Spec { name: "init".into(), arity: 1 },
        );
        b.function("init(Args) -> {ok, Args}.", "init", 1);
        b.function("handle_call(_R, _F, S) -> {reply, ok, S}.", "handle_call", 3);
        b.function("internal() -> ok.", "internal", 0);
    })
});

#[rstest]
#[case("init", 1, true)]
#[case("handle_call", 3, true)]
#[case("internal", 0, false)] // declared but not exported
#[case("init", 2, false)] // wrong arity
fn exported_signatures(#[case] name: &str, #[case] arity: u32, #[case] expected: bool) {
    let sig = format!("{name}/{arity}");
    assert_eq!(FIXTURE.is_exported(&sig), expected);
}

#[rstest]
#[case("init", 1, true)]
#[case("init", 2, false)]
#[case("internal", 0, true)]
#[case("missing", 0, false)]
fn function_lookup_iff_declared(#[case] name: &str, #[case] arity: u32, #[case] expected: bool) {
    assert_eq!(FIXTURE.function(name, arity).is_some(), expected);
}

#[test]
fn fixture_fact_categories() {
    assert_eq!(FIXTURE.name(), "kitchen_sink");
    assert_eq!(FIXTURE.functions().len(), 3);
    assert_eq!(FIXTURE.records().len(), 1);
    assert_eq!(FIXTURE.macros().len(), 1);
    assert_eq!(FIXTURE.types().len(), 1);
    assert_eq!(FIXTURE.specifications().len(), 1);
    assert_eq!(FIXTURE.includes().len(), 1);
    assert_eq!(FIXTURE.include_libs().len(), 1);
    assert_eq!(FIXTURE.behaviours()[0].name, "gen_server");

    let record = FIXTURE.record("state").unwrap();
    assert_eq!(record.fields, vec!["count", "name"]);
    assert!(FIXTURE.macro_def("TIMEOUT").is_some());
    assert!(FIXTURE.type_alias("state_name").is_some());

    let exported: Vec<SmolStr> = FIXTURE
        .exported_functions()
        .iter()
        .map(|f| f.signature())
        .collect();
    assert_eq!(exported, vec!["init/1", "handle_call/3"]);
}

// Scenario: `-export([foo/1]).` plus `-compile(export_all).` makes *every*
// signature exported, declared or not.
#[test]
fn export_all_covers_unlisted_signatures() {
    let m = build_module("a.erl", |b| {
        b.attribute(
            "-export([foo/1]).",
            AttrKind::Export(vec![Term::atom_arity("foo", 1)]),
        );
        b.attribute(
            "-compile(export_all).",
            AttrKind::Compile(vec![Term::atom("export_all")]),
        );
        b.function("foo(X) -> X.", "foo", 1);
    });

    assert!(m.is_exported_all());
    assert!(m.is_exported("foo/1"));
    assert!(m.is_exported("bar/3"));
}

// Scenario: `-compile([{no_auto_import,[{size,1}]}]).` suppresses exactly
// size/1, and only it; the global flag stays off.
#[test]
fn no_auto_import_with_explicit_pairs() {
    let m = build_module("b.erl", |b| {
        b.attribute(
            "-compile([{no_auto_import,[{size,1}]}]).",
            AttrKind::Compile(vec![Term::list([Term::tuple([
                Term::atom("no_auto_import"),
                Term::list([Term::tuple([Term::atom("size"), Term::Integer(1)])]),
            ])])]),
        );
    });

    assert!(m.is_no_auto_import("size", 1));
    assert!(!m.is_no_auto_import("size", 2));
    assert!(!m.is_no_auto_import_all());
}

#[test]
fn no_auto_import_bare_flag_suppresses_everything() {
    let m = build_module("c.erl", |b| {
        b.attribute(
            "-compile(no_auto_import).",
            AttrKind::Compile(vec![Term::atom("no_auto_import")]),
        );
    });

    assert!(m.is_no_auto_import_all());
    assert!(m.is_no_auto_import("size", 1));
    assert!(m.is_no_auto_import("never_mentioned", 9));
}

// Scenario: a callback declaration alone makes the module a behaviour, no
// behaviour_info/1 export required.
#[test]
fn callbacks_make_a_behaviour_module() {
    let m = build_module("d.erl", |b| {
        b.attribute(
            "-callback init(Args) -> term().",
            AttrKind::Callback { name: "init".into(), args: vec![Term::Other] },
        );
    });

    assert!(m.is_behaviour());
    assert!(m.callback_by_signature("init/1").is_some());
}

#[test]
fn exported_behaviour_info_makes_a_behaviour_module() {
    let m = build_module("e.erl", |b| {
        b.attribute(
            "-export([behaviour_info/1]).",
            AttrKind::Export(vec![Term::atom_arity("behaviour_info", 1)]),
        );
        b.function("behaviour_info(callbacks) -> [].", "behaviour_info", 1);
    });

    assert!(m.is_behaviour());
}

// Scenario: `-import(lists, [map/2, filter/2]).`
#[test]
fn imported_function_exact_arity_match() {
    let m = build_module("f.erl", |b| {
        b.attribute(
            "-import(lists, [map/2, filter/2]).",
            AttrKind::Import {
                module: "lists".into(),
                entries: vec![Term::atom_arity("map", 2), Term::atom_arity("filter", 2)],
            },
        );
    });

    let map2 = m.imported_function("map", 2).unwrap();
    assert_eq!(map2.module, "lists");
    assert!(m.imported_function("map", 3).is_none());
    assert!(m.imported_function("foldl", 3).is_none());
}

#[test]
fn record_first_wins_callback_last_wins() {
    let m = build_module("g.erl", |b| {
        b.record("-record(r, {first}).", "r", &["first"]);
        b.record("-record(r, {second}).", "r", &["second"]);
        b.attribute(
            "-callback f(A) -> first.",
            AttrKind::Callback { name: "f".into(), args: vec![Term::atom("first")] },
        );
        b.attribute(
            "-callback f(A) -> second.",
            AttrKind::Callback { name: "f".into(), args: vec![Term::atom("second")] },
        );
    });

    assert_eq!(m.record("r").unwrap().fields, vec!["first"]);

    let callbacks = m.callbacks();
    let last_range = callbacks[1].range;
    assert_eq!(m.callback_by_signature("f/1").unwrap().range, last_range);
}

#[test]
fn queries_are_idempotent_and_cached() {
    let m = build_module("h.erl", |b| {
        b.function("f() -> ok.", "f", 0);
        b.record("-record(r, {}).", "r", &[]);
    });

    // equal by value
    assert_eq!(m.function("f", 0), m.function("f", 0));
    assert_eq!(m.record("r"), m.record("r"));

    // and served from the same snapshot, i.e. no re-extraction
    assert!(Arc::ptr_eq(&m.functions(), &m.functions()));
    assert!(Arc::ptr_eq(&m.attributes(), &m.attributes()));
    assert!(Arc::ptr_eq(&m.callback_map(), &m.callback_map()));
    assert!(Arc::ptr_eq(&m.exported_signatures(), &m.exported_signatures()));
}

#[test]
fn parse_transforms_accumulate_across_sources() {
    let m = build_module("i.erl", |b| {
        b.attribute(
            "-compile({parse_transform, lager_transform}).",
            AttrKind::Compile(vec![Term::tuple([
                Term::atom("parse_transform"),
                Term::atom("lager_transform"),
            ])]),
        );
    });

    let mut transforms: FxHashSet<SmolStr> = FxHashSet::default();
    transforms.insert("from_build_config".into());
    m.add_declared_parse_transforms(&mut transforms);

    assert_eq!(transforms.len(), 2);
    assert!(transforms.contains("lager_transform"));
    assert!(transforms.contains("from_build_config"));
}

#[test]
fn malformed_attributes_contribute_nothing() {
    let m = build_module("j.erl", |b| {
        // export entry with no resolvable arity
        b.attribute(
            "-export([foo/1, bar]).",
            AttrKind::Export(vec![Term::atom_arity("foo", 1), Term::atom("bar")]),
        );
        // compile attribute with an expression of no recognized shape
        b.attribute("-compile(?OPTS).", AttrKind::Compile(vec![Term::Other]));
        // wild attribute nobody asked about
        b.attribute(
            "-vsn(\"1.0.1\").",
            AttrKind::Wild { name: "vsn".into(), args: vec![Term::string("1.0.1")] },
        );
    });

    assert!(m.is_exported("foo/1"));
    assert!(!m.is_exported("bar/0"));
    assert!(!m.is_exported_all());
    assert_eq!(m.attributes().len(), 3);
}

#[test]
fn concurrent_queries_agree() {
    let m = Arc::new(build_module("k.erl", |b| {
        b.attribute(
            "-export([f/0]).",
            AttrKind::Export(vec![Term::atom_arity("f", 0)]),
        );
        b.function("f() -> ok.", "f", 0);
    }));

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let m = Arc::clone(&m);
            scope.spawn(move || {
                assert!(m.is_exported("f/0"));
                assert_eq!(m.functions().len(), 1);
            });
        }
    });
}
