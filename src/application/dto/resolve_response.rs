use crate::resolution::domain::{DependencyGraph, DependencySet};

/// ResolveResponse - result payload of a successful resolution run.
#[derive(Debug, Clone)]
pub struct ResolveResponse {
    /// The verified dependencies, partitioned into prod and dev
    pub dependencies: DependencySet,
    /// Transitive graph, present when expansion was requested
    pub graph: Option<DependencyGraph>,
    /// Number of candidates extracted from source, before oracle
    /// classification and registry verification
    pub candidate_count: usize,
}

/// Outcome of a resolution run.
///
/// A project with no external imports and a cancelled run are both
/// ordinary outcomes, not errors; only genuine failures travel the
/// error channel.
#[derive(Debug, Clone)]
pub enum ResolveOutcome {
    Resolved(ResolveResponse),
    NoExternalDependencies,
    Cancelled,
}

impl ResolveOutcome {
    pub fn response(&self) -> Option<&ResolveResponse> {
        match self {
            ResolveOutcome::Resolved(response) => Some(response),
            _ => None,
        }
    }
}
