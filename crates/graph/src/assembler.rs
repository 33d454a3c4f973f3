use crate::builder::GraphBuilder;
use crate::centrality::{centrality, EigenvectorConfig};
use crate::config::NetworkConfig;
use crate::error::{GraphError, Result};
use crate::similar::SimilarityIndex;
use crate::stats::PeerCounts;
use crate::style::{
    edge_color, edge_length, edge_thickness, edge_title, personality_color, LayoutGrid,
};
use crate::types::{GraphNode, TeamGraph};
use teamnet_protocol::{
    EdgePayload, GraphDocument, GraphSummary, NodeColor, NodePayload, NodeProfile,
    RenderOptions, SimilarPerson, GRAPH_SCHEMA_VERSION,
};
use teamnet_roster::{
    analyze, poster, Attribute, ImageReport, Person, PersonalityFilter, Roster,
};

/// Optional inputs of a run besides the roster
#[derive(Debug, Clone, Default)]
pub struct AssemblyRequest<'a> {
    pub filter: PersonalityFilter,
    pub search: Option<&'a str>,
    pub images: Option<&'a ImageReport>,
}

/// Everything one run produces
pub struct AssembledNetwork {
    pub document: GraphDocument,
    /// Graph over the visible (filtered) people
    pub graph: TeamGraph,
    pub visible: Roster,
}

/// Turns a roster into the renderer document
///
/// The graph, layout and centrality cover the filtered people; similar lists,
/// peer counts, chemistry and composition always cover the whole roster.
pub struct DocumentAssembler<'a> {
    config: &'a NetworkConfig,
    builder: GraphBuilder,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a NetworkConfig) -> Result<Self> {
        Ok(Self {
            config,
            builder: GraphBuilder::new(config)?,
        })
    }

    pub fn similarity(&self, roster: &Roster) -> SimilarityIndex {
        SimilarityIndex::build(roster, self.builder.scorer(), self.config.similar_limit)
    }

    /// Similar list of one person over the whole roster
    pub fn similar_to(&self, roster: &Roster, handle: &str) -> Result<Vec<SimilarPerson>> {
        roster.require(handle)?;
        Ok(self.similarity(roster).similar_people(roster, handle))
    }

    pub fn assemble(&self, roster: &Roster, request: &AssemblyRequest<'_>) -> Result<AssembledNetwork> {
        let mut notices = Vec::new();

        let outcome = request.filter.apply(roster);
        if outcome.fallback {
            notices.push(
                "No one matches the personality filter; the full roster is shown".to_string(),
            );
        }
        let visible = outcome.roster;

        let graph = self.builder.build(&visible)?;
        if graph.edge_count() == 0 {
            notices.push("No edges: no two people share an enabled attribute".to_string());
        }

        let focus = match request.search.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => {
                let hit = visible.search(query).first().map(|p| p.handle.clone());
                if hit.is_none() {
                    log::warn!("Search '{query}' matched nobody");
                    notices.push(format!("Search '{query}' matched nobody"));
                }
                hit
            }
            None => None,
        };

        let similar = self.similarity(roster);
        let peers = PeerCounts::new(roster);
        let grid = LayoutGrid::new(&visible, self.config.layout);

        let nodes = graph
            .nodes()
            .map(|(idx, node)| {
                self.node_payload(
                    node,
                    graph.degree(idx),
                    &peers,
                    &grid,
                    similar.similar_people(roster, node.handle()),
                    request.images,
                )
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(a, b, edge)| EdgePayload {
                from: a.handle().to_string(),
                to: b.handle().to_string(),
                weight: edge.weight(),
                reasons: edge.reasons.iter().map(|k| k.key().to_string()).collect(),
                edge_type: edge
                    .edge_type()
                    .map_or_else(|| "other".to_string(), |k| k.key().to_string()),
                title: edge_title(&edge.reasons),
                color: edge_color(edge.edge_type()).to_string(),
                value: edge_thickness(edge.weight()),
                length: edge_length(edge.weight()),
            })
            .collect();

        let missing_images = request
            .images
            .map(|report| report.missing.clone())
            .unwrap_or_default();
        if !missing_images.is_empty() {
            notices.push(format!("{} people have no image", missing_images.len()));
        }

        let document = GraphDocument {
            schema_version: GRAPH_SCHEMA_VERSION,
            options: RenderOptions {
                physics: self.config.physics,
                show_labels: self.config.show_labels,
            },
            summary: GraphSummary {
                people: roster.len(),
                visible_people: visible.len(),
                edges: graph.edge_count(),
                edge_kinds: self
                    .builder
                    .scorer()
                    .kinds()
                    .iter()
                    .map(|k| k.key().to_string())
                    .collect(),
            },
            nodes,
            edges,
            focus,
            filter_fallback: outcome.fallback,
            centrality: centrality(&graph, EigenvectorConfig::default()),
            chemistry: similar.chemistry(roster),
            composition: analyze(roster, &self.config.composition),
            poster: poster(roster, &self.config.composition, request.images),
            missing_images,
            notices,
        };

        Ok(AssembledNetwork {
            document,
            graph,
            visible,
        })
    }

    fn node_payload(
        &self,
        node: &GraphNode,
        degree: usize,
        peers: &PeerCounts,
        grid: &LayoutGrid,
        similar: Vec<SimilarPerson>,
        images: Option<&ImageReport>,
    ) -> NodePayload {
        let person = &node.person;
        let (x, y) = grid.position(person.department(), person.cohort());

        NodePayload {
            id: person.handle.clone(),
            label: self.config.show_labels.then(|| person.name().to_string()),
            title: tooltip(person),
            group: person.department().map(str::to_string),
            color: NodeColor::ring(personality_color(person.personality())),
            image: images.and_then(|r| r.url_for(&person.handle)).map(str::to_string),
            size: self.config.sizing.node_size(person.role(), degree),
            x,
            y,
            profile: profile(person),
            stats: peers.stats_for(person, degree),
            similar,
        }
    }
}

impl AssembledNetwork {
    /// Visible person by handle
    pub fn person(&self, handle: &str) -> Result<&Person> {
        self.visible
            .get(handle)
            .ok_or_else(|| GraphError::NodeNotFound(handle.to_string()))
    }
}

fn profile(person: &Person) -> NodeProfile {
    let text = |attr: Attribute| person.value(attr).map(str::to_string);
    NodeProfile {
        name: person.name().to_string(),
        handle: person.handle.clone(),
        department: text(Attribute::Department),
        role: text(Attribute::Role),
        job_family: text(Attribute::JobFamily),
        birth_year: person.birth_year(),
        join_year: person.join_year(),
        personality: text(Attribute::Personality),
        blood_type: text(Attribute::BloodType),
        cohort: text(Attribute::Cohort),
    }
}

fn tooltip(person: &Person) -> Vec<String> {
    let show = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    let text = |attr: Attribute| show(person.value(attr).map(str::to_string));
    let year = |value: Option<i32>| show(value.map(|y| y.to_string()));

    let mut lines = vec![
        format!("name: {}", person.name()),
        format!("handle: {}", person.handle),
        format!("department: {}", text(Attribute::Department)),
        format!("role: {}", text(Attribute::Role)),
        format!("job family: {}", text(Attribute::JobFamily)),
        format!("birth year: {}", year(person.birth_year())),
        format!("join year: {}", year(person.join_year())),
        format!("personality: {}", text(Attribute::Personality)),
        format!("blood type: {}", text(Attribute::BloodType)),
        format!("cohort: {}", text(Attribute::Cohort)),
    ];
    lines.extend(
        person
            .extras
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(header, value)| format!("{header}: {value}")),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::EdgeKind;
    use crate::config::EdgeToggles;
    use pretty_assertions::assert_eq;
    use teamnet_roster::{AxisFilter, RosterLoader};

    fn sample() -> Roster {
        RosterLoader::new().load_sample().unwrap()
    }

    #[test]
    fn sample_document_is_consistent() {
        let config = NetworkConfig::default();
        let roster = sample();
        let network = DocumentAssembler::new(&config)
            .unwrap()
            .assemble(&roster, &AssemblyRequest::default())
            .unwrap();
        let doc = &network.document;

        assert_eq!(doc.schema_version, GRAPH_SCHEMA_VERSION);
        assert_eq!(doc.nodes.len(), 20);
        assert_eq!(doc.summary.edges, doc.edges.len());
        assert!(!doc.edges.is_empty());
        assert_eq!(
            doc.summary.edge_kinds,
            vec!["department", "birth_year", "personality", "blood_type"]
        );

        for edge in &doc.edges {
            assert_ne!(edge.from, edge.to);
            assert_eq!(edge.weight, edge.reasons.len());
            assert_eq!(edge.edge_type, edge.reasons[0]);
        }
        for node in &doc.nodes {
            assert!(node.similar.len() <= 3);
            let idx = network.graph.find_node(&node.id).unwrap();
            assert_eq!(node.stats.degree, network.graph.degree(idx));
        }
        assert_eq!(doc.centrality.len(), 20);
    }

    #[test]
    fn output_is_deterministic() {
        let config = NetworkConfig::all_edges();
        let roster = sample();
        let assembler = DocumentAssembler::new(&config).unwrap();
        let request = AssemblyRequest::default();
        let first = assembler.assemble(&roster, &request).unwrap().document;
        let second = assembler.assemble(&roster, &request).unwrap().document;
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn filter_limits_graph_but_not_similar_lists() {
        let config = NetworkConfig::default();
        let roster = sample();
        let request = AssemblyRequest {
            filter: PersonalityFilter {
                energy: Some(AxisFilter::energy("I").unwrap()),
                ..Default::default()
            },
            ..Default::default()
        };
        let network = DocumentAssembler::new(&config)
            .unwrap()
            .assemble(&roster, &request)
            .unwrap();
        let doc = &network.document;

        assert!(!doc.filter_fallback);
        assert!(doc.summary.visible_people < doc.summary.people);
        assert!(doc
            .nodes
            .iter()
            .all(|n| n.profile.personality.as_deref().is_some_and(|c| c.starts_with('I'))));
        assert_eq!(doc.poster.iter().map(|s| s.cards.len()).sum::<usize>(), 20);
    }

    #[test]
    fn empty_edges_produce_a_notice() {
        let config = NetworkConfig {
            edges: EdgeToggles::only([EdgeKind::Spinoff]),
            spinoff_marker: "no-such-company".to_string(),
            ..Default::default()
        };
        let doc = DocumentAssembler::new(&config)
            .unwrap()
            .assemble(&sample(), &AssemblyRequest::default())
            .unwrap()
            .document;
        assert!(doc.edges.is_empty());
        assert!(doc.notices.iter().any(|n| n.starts_with("No edges")));
        assert_eq!(doc.chemistry.pair_count, 0);
    }

    #[test]
    fn search_sets_focus() {
        let config = NetworkConfig::default();
        let assembler = DocumentAssembler::new(&config).unwrap();
        let roster = sample();

        let request = AssemblyRequest {
            search: Some("CARL"),
            ..Default::default()
        };
        let doc = assembler.assemble(&roster, &request).unwrap().document;
        assert_eq!(doc.focus.as_deref(), Some("carl.lee"));

        let request = AssemblyRequest {
            search: Some("nobody-here"),
            ..Default::default()
        };
        let doc = assembler.assemble(&roster, &request).unwrap().document;
        assert_eq!(doc.focus, None);
        assert!(doc.notices.iter().any(|n| n.contains("nobody-here")));
    }

    #[test]
    fn hidden_labels_leave_nodes_unlabelled() {
        let config = NetworkConfig {
            show_labels: false,
            ..Default::default()
        };
        let doc = DocumentAssembler::new(&config)
            .unwrap()
            .assemble(&sample(), &AssemblyRequest::default())
            .unwrap()
            .document;
        assert!(doc.nodes.iter().all(|n| n.label.is_none()));
        assert!(!doc.options.show_labels);
    }

    #[test]
    fn similar_to_unknown_person_fails() {
        let config = NetworkConfig::default();
        let assembler = DocumentAssembler::new(&config).unwrap();
        assert!(assembler.similar_to(&sample(), "ghost").is_err());
        assert!(assembler.similar_to(&sample(), "carl.lee").unwrap().len() <= 3);
    }
}
