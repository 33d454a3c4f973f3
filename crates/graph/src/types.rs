use crate::compare::EdgeKind;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use teamnet_roster::Person;

/// Node in the team graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Person record the node stands for
    pub person: Person,
}

impl GraphNode {
    pub fn handle(&self) -> &str {
        &self.person.handle
    }
}

/// Edge in the team graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Matched kinds in evaluation order
    pub reasons: Vec<EdgeKind>,
}

impl GraphEdge {
    /// Number of shared attributes
    pub fn weight(&self) -> usize {
        self.reasons.len()
    }

    /// Kind that decides the colour
    pub fn edge_type(&self) -> Option<EdgeKind> {
        self.reasons.first().copied()
    }
}

/// Undirected relationship graph over people
pub struct TeamGraph {
    /// Nodes in table order; edges in pair order
    pub graph: UnGraph<GraphNode, GraphEdge>,

    /// Handle -> NodeIndex mapping for fast lookup
    pub handle_index: HashMap<String, NodeIndex>,
}

impl TeamGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            handle_index: HashMap::new(),
        }
    }

    /// Add node to graph
    pub fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        let handle = node.person.handle.clone();
        let idx = self.graph.add_node(node);
        self.handle_index.insert(handle, idx);
        idx
    }

    /// Add edge between nodes
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, edge: GraphEdge) {
        self.graph.add_edge(a, b, edge);
    }

    /// Find node by handle
    pub fn find_node(&self, handle: &str) -> Option<NodeIndex> {
        self.handle_index.get(handle).copied()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx).map(|node| (idx, node)))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for TeamGraph {
    fn default() -> Self {
        Self::new()
    }
}
