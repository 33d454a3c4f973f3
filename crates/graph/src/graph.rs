use crate::error::{GraphError, Result};
use crate::types::{GraphEdge, GraphNode, TeamGraph};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// Direct neighbour of a person together with the connecting edge
#[derive(Debug, Clone)]
pub struct Neighbor<'a> {
    pub node: &'a GraphNode,
    pub edge: &'a GraphEdge,
}

impl TeamGraph {
    /// Number of people directly connected to `node`
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.graph.edges(node).count()
    }

    /// Edges with both endpoints, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode, &GraphEdge)> {
        self.graph.edge_references().filter_map(move |e| {
            let a = self.graph.node_weight(e.source())?;
            let b = self.graph.node_weight(e.target())?;
            Some((a, b, e.weight()))
        })
    }

    /// Neighbours of a person, strongest first, then table order
    pub fn neighbors_of(&self, handle: &str) -> Result<Vec<Neighbor<'_>>> {
        let node = self
            .find_node(handle)
            .ok_or_else(|| GraphError::NodeNotFound(handle.to_string()))?;

        let mut neighbors: Vec<(NodeIndex, Neighbor<'_>)> = self
            .graph
            .edges(node)
            .filter_map(|e| {
                let other = if e.source() == node { e.target() } else { e.source() };
                let weight = self.graph.node_weight(other)?;
                Some((
                    other,
                    Neighbor {
                        node: weight,
                        edge: e.weight(),
                    },
                ))
            })
            .collect();

        neighbors.sort_by(|(ia, a), (ib, b)| {
            b.edge
                .weight()
                .cmp(&a.edge.weight())
                .then_with(|| ia.index().cmp(&ib.index()))
        });

        Ok(neighbors.into_iter().map(|(_, n)| n).collect())
    }

    /// Adjacency lists indexed by node position, each sorted ascending
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.node_count()];
        for e in self.graph.edge_references() {
            let (a, b) = (e.source().index(), e.target().index());
            if a != b {
                adj[a].push(b);
                adj[b].push(a);
            }
        }
        for list in &mut adj {
            list.sort_unstable();
            list.dedup();
        }
        adj
    }
}
