use crate::config::NetworkConfig;
use crate::error::{GraphError, Result};
use crate::scorer::{MatchRecord, PairScorer};
use crate::types::*;
use teamnet_roster::Roster;

/// Build the team graph from a roster
pub struct GraphBuilder {
    scorer: PairScorer,
}

impl GraphBuilder {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scorer: PairScorer::new(config),
        })
    }

    pub fn scorer(&self) -> &PairScorer {
        &self.scorer
    }

    /// Build graph from people
    pub fn build(&self, roster: &Roster) -> Result<TeamGraph> {
        let mut graph = TeamGraph::new();

        // Phase 1: one node per person, table order
        for person in roster.people() {
            graph.add_node(GraphNode {
                person: person.clone(),
            });
        }

        // Phase 2: one edge per non-zero match
        let matches = self.scorer.score_pairs(roster);
        for record in &matches {
            self.add_match(&mut graph, record)?;
        }

        if graph.edge_count() == 0 {
            log::info!(
                "No edges: no two of the {} people share an enabled attribute",
                graph.node_count()
            );
        }

        log::info!(
            "Built team graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(graph)
    }

    fn add_match(&self, graph: &mut TeamGraph, record: &MatchRecord) -> Result<()> {
        let a = graph
            .find_node(&record.a)
            .ok_or_else(|| GraphError::NodeNotFound(record.a.clone()))?;
        let b = graph
            .find_node(&record.b)
            .ok_or_else(|| GraphError::NodeNotFound(record.b.clone()))?;
        graph.add_edge(
            a,
            b,
            GraphEdge {
                reasons: record.reasons.clone(),
            },
        );
        Ok(())
    }
}
