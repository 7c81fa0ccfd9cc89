//! Config-section walking over parsed Erlang term files.
//!
//! `rebar.config` and `.app`/`.app.src` files are sequences of Erlang terms;
//! a "section" is a tuple whose first element is a well-known atom, as in
//! `{erl_opts, [...]}` or `{deps, [...]}`. Anything that does not match the
//! expected shape is skipped, never an error.

use crate::syntax::Term;

/// The value of every `{name, Value, ...}` tuple among `terms`.
pub fn config_sections<'t>(terms: &'t [Term], name: &'t str) -> impl Iterator<Item = &'t Term> {
    terms.iter().filter_map(move |term| section_value(term, name))
}

/// The value of every `{name, Value, ...}` tuple inside a list term.
pub fn sections_in<'t>(term: &'t Term, name: &'t str) -> impl Iterator<Item = &'t Term> {
    term.as_list()
        .unwrap_or_default()
        .iter()
        .filter_map(move |item| section_value(item, name))
}

fn section_value<'t>(term: &'t Term, name: &str) -> Option<&'t Term> {
    let items = term.as_tuple()?;
    let (head, rest) = items.split_first()?;
    (head.atom_name()? == name).then(|| rest.first()).flatten()
}

/// The leading atom of every tuple inside a list term.
///
/// rebar `deps` entries are such named tuples: `{cowboy, "2.9.0"}`,
/// `{jiffy, {git, ...}}` — the name is all the importer needs.
pub fn named_tuple_names(term: &Term) -> impl Iterator<Item = &str> {
    term.as_list()
        .unwrap_or_default()
        .iter()
        .filter_map(|item| item.as_tuple()?.first()?.atom_name())
}
