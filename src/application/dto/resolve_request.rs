use std::collections::HashMap;
use std::path::PathBuf;

/// ResolveRequest - Internal request DTO for the dependency resolution
/// use case.
///
/// This DTO represents the internal request structure used within the
/// application layer; the CLI builds it from arguments and config.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Path to the Python project directory to scan
    pub project_path: PathBuf,
    /// Whether to expand the transitive dependency graph
    pub include_graph: bool,
    /// Maximum BFS depth for transitive expansion
    pub max_depth: usize,
    /// Bounded fan-out for registry lookups
    pub concurrency: usize,
    /// Versions pinned in an existing requirements artifact, by
    /// canonical name
    pub pinned: HashMap<String, String>,
}

impl ResolveRequest {
    pub fn new(project_path: PathBuf) -> Self {
        Self {
            project_path,
            include_graph: true,
            max_depth: crate::resolution::services::TransitiveGraphBuilder::DEFAULT_MAX_DEPTH,
            concurrency: crate::resolution::services::TransitiveGraphBuilder::DEFAULT_CONCURRENCY,
            pinned: HashMap::new(),
        }
    }

    pub fn with_graph(mut self, include_graph: bool) -> Self {
        self.include_graph = include_graph;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_pinned(mut self, pinned: HashMap<String, String>) -> Self {
        self.pinned = pinned;
        self
    }
}
