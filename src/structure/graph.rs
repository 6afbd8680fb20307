//! The assignment graph produced by the extractor.

use std::collections::HashSet;

use serde::Serialize;

/// Label of the reserved node standing for module-level code.
///
/// `global` is a Python keyword, so no assignment target or function can
/// share this name.
pub const MODULE_SCOPE: &str = "global";

/// A named vertex: the module scope, a function, or an assigned name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Display name, unique within one graph.
    pub name: String,
    /// Position in insertion order.
    pub order: usize,
}

/// `from`'s body assigns to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Producer (function name or [`MODULE_SCOPE`]).
    pub from: String,
    /// Assigned name.
    pub to: String,
}

/// Ordered nodes and edges of one extraction.
///
/// Node names are unique; edges are kept exactly as appended, duplicates
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    #[serde(skip)]
    names: HashSet<String>,
}

impl Graph {
    /// A graph holding only the module-scope node.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = Self { nodes: Vec::new(), edges: Vec::new(), names: HashSet::new() };
        graph.add_node(MODULE_SCOPE);
        graph
    }

    /// Insert a node unless one with the same name exists. Returns whether it was inserted.
    pub fn add_node(&mut self, name: &str) -> bool {
        if !self.names.insert(name.to_string()) {
            return false;
        }
        let order = self.nodes.len();
        self.nodes.push(GraphNode { name: name.to_string(), order });
        true
    }

    /// Append an edge. Both ends are expected to be nodes already.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        debug_assert!(self.contains(from) && self.contains(to));
        self.edges.push(GraphEdge { from: from.to_string(), to: to.to_string() });
    }

    /// Returns `true` if a node named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Nodes in insertion order; the first is always [`MODULE_SCOPE`].
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Node names in insertion order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
