use crate::ports::outbound::PackageRegistry;
use crate::resolution::domain::{normalize_name, DependencyGraph, PackageRecord};
use crate::shared::CancellationToken;
use futures::stream::{self, StreamExt};

/// TransitiveGraphBuilder performs bounded-depth BFS expansion over
/// each package's declared requirements.
///
/// Registry fetches within one BFS level run with bounded concurrency,
/// but results are reordered before the graph is materialized so node
/// and edge emission stays deterministic BFS order. Termination is
/// guaranteed by the depth bound alone: a name already in the node set
/// is never re-enqueued, and no node deeper than `max_depth` exists.
pub struct TransitiveGraphBuilder {
    max_depth: usize,
    concurrency: usize,
}

impl TransitiveGraphBuilder {
    pub const DEFAULT_MAX_DEPTH: usize = 2;
    pub const DEFAULT_CONCURRENCY: usize = 8;

    pub fn new(max_depth: usize, concurrency: usize) -> Self {
        Self {
            max_depth,
            concurrency: concurrency.max(1),
        }
    }

    /// Expands the verified direct dependencies into a node/edge graph.
    ///
    /// Direct names enter at level 0; requirements of a level-N node
    /// enter at level N+1 only while N+1 <= max_depth. With
    /// `max_depth = 0` the result is exactly the direct nodes with no
    /// edges. Cancellation returns the graph built so far.
    pub async fn expand<R: PackageRegistry>(
        &self,
        registry: &R,
        direct_names: &[String],
        cancel: &CancellationToken,
    ) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        let mut frontier: Vec<String> = Vec::new();

        for name in direct_names {
            let name = normalize_name(name);
            if !name.is_empty() && graph.add_node(name.clone(), 0) {
                frontier.push(name);
            }
        }

        let mut level = 0;
        while level < self.max_depth && !frontier.is_empty() {
            if cancel.is_cancelled() {
                return graph;
            }

            let records = self.fetch_level(registry, &frontier, cancel).await;

            let mut next_frontier = Vec::new();
            for (name, record) in frontier.iter().zip(records) {
                let Some(record) = record else { continue };
                for requirement in &record.requirement_names {
                    let requirement = normalize_name(requirement);
                    // A package occasionally lists itself via extras.
                    if requirement.is_empty() || requirement == *name {
                        continue;
                    }
                    graph.add_edge(name.clone(), requirement.clone());
                    if graph.add_node(requirement.clone(), level + 1) {
                        next_frontier.push(requirement);
                    }
                }
            }

            frontier = next_frontier;
            level += 1;
        }

        graph
    }

    /// Fetches all records for one BFS level, fanning out with bounded
    /// concurrency and restoring input order afterwards.
    async fn fetch_level<R: PackageRegistry>(
        &self,
        registry: &R,
        names: &[String],
        cancel: &CancellationToken,
    ) -> Vec<Option<PackageRecord>> {
        let mut results: Vec<(usize, Option<PackageRecord>)> =
            stream::iter(names.iter().cloned().enumerate())
                .map(|(index, name)| async move {
                    if cancel.is_cancelled() {
                        return (index, None);
                    }
                    (index, registry.lookup(&name).await)
                })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, record)| record).collect()
    }
}
