//! Readers over a parsed `rebar.config`.
//!
//! Each reader answers one question about the build configuration; all of
//! them tolerate arbitrary junk in the config and return what they could
//! recognize. Locating and parsing the file is the host's job.

use smol_str::SmolStr;

use crate::syntax::Term;
use super::term_config::{config_sections, named_tuple_names, sections_in};

/// Include paths from `{erl_opts, [{i, Path}, ...]}` sections.
///
/// A path value is either a string or something containing strings (a list
/// of them); every string found is collected.
pub fn include_paths(config: &[Term]) -> Vec<SmolStr> {
    let mut paths = Vec::new();
    for opts in config_sections(config, "erl_opts") {
        for value in sections_in(opts, "i") {
            match value {
                Term::Str(path) => paths.push(path.clone()),
                other => other.visit(&mut |t| {
                    if let Term::Str(path) = t {
                        paths.push(path.clone());
                    }
                }),
            }
        }
    }
    paths
}

/// Source directories from a top-level `{extra_src_dirs, [...]}` section.
pub fn extra_src_dirs(config: &[Term]) -> Vec<SmolStr> {
    let mut dirs = Vec::new();
    for value in config_sections(config, "extra_src_dirs") {
        let Some(entries) = value.as_list() else {
            continue;
        };
        for entry in entries {
            if let Some(dir) = entry.string_value() {
                dirs.push(dir.into());
            }
        }
    }
    dirs
}

/// Dependency application names from `{deps, [...]}` sections.
pub fn dependency_app_names(config: &[Term]) -> Vec<SmolStr> {
    config_sections(config, "deps")
        .flat_map(|deps| named_tuple_names(deps).map(SmolStr::from).collect::<Vec<_>>())
        .collect()
}

/// Parse-transform modules from `{erl_opts, [{parse_transform, Mod}, ...]}`.
pub fn parse_transforms(config: &[Term]) -> Vec<SmolStr> {
    let mut transforms = Vec::new();
    for opts in config_sections(config, "erl_opts") {
        for value in sections_in(opts, "parse_transform") {
            if let Some(module) = value.atom_name() {
                transforms.push(module.into());
            }
        }
    }
    transforms
}
