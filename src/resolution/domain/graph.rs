/// A node in the transitive dependency graph. `level` is the BFS depth
/// from a direct dependency (level 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// The bounded-depth transitive dependency graph.
///
/// Nodes are deduplicated by canonical name; when the same package is
/// reachable via several paths the minimum observed level wins.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.id == name)
    }

    /// Adds a node, keeping the minimum level if the name is already
    /// present. Returns true if the node was newly inserted.
    pub fn add_node(&mut self, id: String, level: usize) -> bool {
        if let Some(existing) = self.nodes.iter_mut().find(|n| n.id == id) {
            if level < existing.level {
                existing.level = level;
            }
            return false;
        }
        self.nodes.push(GraphNode { id, level });
        true
    }

    pub fn add_edge(&mut self, from: String, to: String) {
        let edge = GraphEdge { from, to };
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    /// Nodes at a given level, in insertion (BFS) order.
    pub fn nodes_at_level(&self, level: usize) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|n| n.level == level).collect()
    }
}
