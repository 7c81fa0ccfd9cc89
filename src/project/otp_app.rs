//! Aggregated facts about one OTP application.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use thiserror::Error;
use tracing::debug;

use crate::syntax::Term;
use super::rebar;
use super::term_config::sections_in;

/// Failures surfaced to the importer. Unlike malformed config entries,
/// which are skipped, a missing or unusable app descriptor is a caller
/// precondition violation and fails hard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    /// No `.app`/`.app.src` resource was supplied for the application.
    #[error("no application resource supplied for `{0}`")]
    MissingAppResource(SmolStr),
    /// The resource exists but contains no `{application, Name, Props}` term.
    #[error("no `{{application, ...}}` descriptor in app resource for `{0}`")]
    MalformedAppResource(SmolStr),
}

/// One imported OTP application: its identity plus everything the importer
/// needs from the app descriptor and the rebar config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpApp {
    name: SmolStr,
    deps: FxHashSet<SmolStr>,
    include_paths: Vec<SmolStr>,
    extra_src_dirs: Vec<SmolStr>,
    parse_transforms: FxHashSet<SmolStr>,
}

impl OtpApp {
    /// Aggregate app facts from a parsed `.app`/`.app.src` resource and an
    /// optional parsed `rebar.config`.
    ///
    /// `default_name` names the app when the descriptor carries no name atom
    /// (usually the resource file's stem).
    pub fn from_sources(
        default_name: &str,
        app_resource: Option<&[Term]>,
        rebar_config: Option<&[Term]>,
    ) -> Result<Self, ProjectError> {
        let resource =
            app_resource.ok_or_else(|| ProjectError::MissingAppResource(default_name.into()))?;

        let descriptor = resource
            .iter()
            .find_map(application_descriptor)
            .ok_or_else(|| ProjectError::MalformedAppResource(default_name.into()))?;

        let mut app = Self {
            name: descriptor.name.map(SmolStr::from).unwrap_or_else(|| default_name.into()),
            deps: FxHashSet::default(),
            include_paths: Vec::new(),
            extra_src_dirs: Vec::new(),
            parse_transforms: FxHashSet::default(),
        };
        app.add_dependencies_from_props(descriptor.props);

        if let Some(config) = rebar_config {
            app.add_info_from_rebar_config(config);
        }

        debug!(app = %app.name, deps = app.deps.len(), "aggregated OTP app facts");
        Ok(app)
    }

    fn add_dependencies_from_props(&mut self, props: Option<&Term>) {
        let Some(props) = props else { return };
        for value in sections_in(props, "applications") {
            let Some(entries) = value.as_list() else {
                continue;
            };
            for entry in entries {
                if let Some(dep) = entry.atom_name() {
                    self.deps.insert(dep.into());
                }
            }
        }
    }

    fn add_info_from_rebar_config(&mut self, config: &[Term]) {
        self.deps.extend(rebar::dependency_app_names(config));
        self.include_paths.extend(rebar::include_paths(config));
        self.extra_src_dirs.extend(rebar::extra_src_dirs(config));
        self.parse_transforms.extend(rebar::parse_transforms(config));
    }

    /// The application name.
    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    /// Names of applications this one depends on.
    pub fn deps(&self) -> &FxHashSet<SmolStr> {
        &self.deps
    }

    /// Include paths declared in the rebar config.
    pub fn include_paths(&self) -> &[SmolStr] {
        &self.include_paths
    }

    /// Extra source directories declared in the rebar config.
    pub fn extra_src_dirs(&self) -> &[SmolStr] {
        &self.extra_src_dirs
    }

    /// Parse transforms declared in the rebar config.
    pub fn parse_transforms(&self) -> &FxHashSet<SmolStr> {
        &self.parse_transforms
    }
}

struct AppDescriptor<'t> {
    name: Option<&'t str>,
    props: Option<&'t Term>,
}

/// Match one `{application, Name, Props}` term; the props list is the first
/// list element after the head, wherever it sits.
fn application_descriptor(term: &Term) -> Option<AppDescriptor<'_>> {
    let items = term.as_tuple()?;
    let (head, rest) = items.split_first()?;
    if head.atom_name()? != "application" {
        return None;
    }
    Some(AppDescriptor {
        name: rest.first().and_then(Term::atom_name),
        props: rest.iter().find(|item| item.as_list().is_some()),
    })
}
