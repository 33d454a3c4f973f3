use proptest::prelude::*;
use teamnet_graph::{
    AssemblyRequest, DocumentAssembler, EdgeKind, EdgeToggles, GraphBuilder, NetworkConfig,
    PairScorer,
};
use teamnet_roster::{Attribute, Person, Roster};

const DEPARTMENTS: [&str; 3] = ["BI", "Tech", "Ops"];
const CODES: [&str; 3] = ["INTP", "ESFJ", "ENFP"];
const BLOOD: [&str; 3] = ["A", "B", "O"];
const YEARS: [&str; 4] = ["94", "1994", "05", "abcd"];

type Row = (Option<usize>, Option<usize>, Option<usize>, Option<usize>);

fn cell(values: &[&'static str], pick: Option<usize>) -> &'static str {
    pick.map_or("", |i| values[i % values.len()])
}

fn roster_from(rows: &[Row]) -> Roster {
    let people = rows
        .iter()
        .enumerate()
        .map(|(i, (dept, code, blood, year))| {
            let handle = format!("p{i}");
            Person::with_values(
                i + 1,
                &handle,
                [
                    (Attribute::Name, handle.clone()),
                    (Attribute::Department, cell(&DEPARTMENTS, *dept).to_string()),
                    (Attribute::Personality, cell(&CODES, *code).to_string()),
                    (Attribute::BloodType, cell(&BLOOD, *blood).to_string()),
                    (Attribute::BirthYear, cell(&YEARS, *year).to_string()),
                ],
            )
        })
        .collect();
    Roster::new(vec![Attribute::Name], people).unwrap()
}

fn row() -> impl Strategy<Value = Row> {
    (
        prop::option::of(0usize..3),
        prop::option::of(0usize..3),
        prop::option::of(0usize..3),
        prop::option::of(0usize..4),
    )
}

proptest! {
    #[test]
    fn proptest_score_is_symmetric(rows in prop::collection::vec(row(), 2..12)) {
        let roster = roster_from(&rows);
        let scorer = PairScorer::new(&NetworkConfig::all_edges());
        for a in roster.people() {
            for b in roster.people() {
                prop_assert_eq!(scorer.score(a, b), scorer.score(b, a));
            }
        }
    }

    #[test]
    fn proptest_graph_has_no_self_edges(rows in prop::collection::vec(row(), 1..15)) {
        let roster = roster_from(&rows);
        let graph = GraphBuilder::new(&NetworkConfig::all_edges()).unwrap().build(&roster).unwrap();
        for (a, b, edge) in graph.edges() {
            prop_assert_ne!(a.handle(), b.handle());
            prop_assert!(edge.weight() > 0);
        }
    }

    #[test]
    fn proptest_absent_attribute_never_contributes(rows in prop::collection::vec(row(), 2..10)) {
        let roster = roster_from(&rows);
        let scorer = PairScorer::new(&NetworkConfig::all_edges());
        for a in roster.people() {
            for b in roster.people() {
                for kind in scorer.reasons(a, b) {
                    let attr = kind.attribute();
                    prop_assert!(a.value(attr).is_some() && b.value(attr).is_some());
                }
            }
        }
    }
}

#[test]
fn three_shared_attributes_make_a_score_three_edge() {
    let roster = roster_from(&[
        (Some(0), Some(0), Some(0), Some(0)),
        (Some(0), Some(0), Some(0), Some(2)),
    ]);
    let graph = GraphBuilder::new(&NetworkConfig::default())
        .unwrap()
        .build(&roster)
        .unwrap();
    let edges: Vec<_> = graph.edges().collect();
    assert_eq!(edges.len(), 1);
    assert_eq!(
        edges[0].2.reasons,
        vec![EdgeKind::Department, EdgeKind::Personality, EdgeKind::BloodType]
    );
}

#[test]
fn two_digit_and_four_digit_years_match() {
    let roster = roster_from(&[(None, None, None, Some(0)), (None, None, None, Some(1))]);
    let config = NetworkConfig {
        edges: EdgeToggles::only([EdgeKind::BirthYear]),
        ..Default::default()
    };
    let graph = GraphBuilder::new(&config).unwrap().build(&roster).unwrap();
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn five_strangers_have_no_edges() {
    let people = (0..5)
        .map(|i| {
            let handle = format!("s{i}");
            Person::with_values(
                i + 1,
                &handle,
                [
                    (Attribute::Name, format!("Stranger {i}")),
                    (Attribute::Department, format!("dept-{i}")),
                    (Attribute::Personality, String::new()),
                    (Attribute::BloodType, format!("type-{i}")),
                    (Attribute::BirthYear, format!("{}", 1980 + i)),
                ],
            )
        })
        .collect();
    let roster = Roster::new(vec![Attribute::Name], people).unwrap();

    let config = NetworkConfig::default();
    let network = DocumentAssembler::new(&config)
        .unwrap()
        .assemble(&roster, &AssemblyRequest::default())
        .unwrap();
    assert!(network.document.edges.is_empty());
    assert_eq!(network.document.nodes.len(), 5);
    assert!(network.document.nodes.iter().all(|n| n.similar.is_empty()));
}
