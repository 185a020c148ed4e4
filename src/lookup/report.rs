//! Lookup results as handed to the presentation layer.

use serde::Serialize;

use crate::platform::types::{Application, Domain, Organization, Route, Space};

/// Why a lookup produced nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotBoundReason {
    /// No suffix of the hostname is a registered domain.
    DomainNotFound,
    /// The domain exists but no route matches the hostname.
    NoMatchingRoutes,
}

impl std::fmt::Display for NotBoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotBoundReason::DomainNotFound => write!(f, "could not find matching domain"),
            NotBoundReason::NoMatchingRoutes => write!(f, "route not found"),
        }
    }
}

/// One matching route and one of its applications, or `None` if unbound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub route: Route,
    pub hostname: String,
    pub app: Option<Application>,
}

impl Binding {
    pub fn is_unbound(&self) -> bool {
        self.app.is_none()
    }
}

/// Bindings whose routes live in the same space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceGroup {
    pub org: Organization,
    pub space: Space,
    pub bindings: Vec<Binding>,
}

/// Result of the optional context switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RetargetOutcome {
    Changed { org: String, space: String },
    /// Requested, but no matching route had an application bound.
    Unavailable,
}

/// Bound routes grouped by owning space, in space-GUID order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub domain: Domain,
    pub groups: Vec<SpaceGroup>,
    pub retarget: Option<RetargetOutcome>,
}

impl Report {
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.groups.iter().flat_map(|g| g.bindings.iter())
    }

    /// First bound application in presentation order.
    pub fn first_app(&self) -> Option<&Application> {
        self.bindings().find_map(|b| b.app.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    NotBound { reason: NotBoundReason },
    Bound(Report),
}

/// Progress events emitted while a report is assembled, so output already
/// shown survives a failure in a later stage.
#[derive(Debug, Clone, Copy)]
pub enum LookupEvent<'a> {
    /// Bindings are about to be listed.
    Bound { bindings: usize },
    /// The following bindings belong to this org/space.
    Space { org: &'a Organization, space: &'a Space },
    Binding(&'a Binding),
}

/// Receives [`LookupEvent`]s as the orchestrator walks the sorted bindings.
pub trait ReportSink {
    fn emit(&mut self, event: LookupEvent<'_>);
}

impl<F> ReportSink for F
where
    F: FnMut(LookupEvent<'_>),
{
    fn emit(&mut self, event: LookupEvent<'_>) {
        self(event)
    }
}

/// Sink that drops every event.
#[derive(Debug, Default)]
pub struct Discard;

impl ReportSink for Discard {
    fn emit(&mut self, _event: LookupEvent<'_>) {}
}
