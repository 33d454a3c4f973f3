use crate::compare::EdgeKind;
use crate::config::NetworkConfig;
use serde::{Deserialize, Serialize};
use teamnet_roster::{Person, Roster};

/// Scored relationship between two people
///
/// `a` is the person appearing earlier in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub a: String,
    pub b: String,
    pub reasons: Vec<EdgeKind>,
}

impl MatchRecord {
    pub fn score(&self) -> usize {
        self.reasons.len()
    }

    /// Kind that decides the edge colour
    pub fn primary(&self) -> Option<EdgeKind> {
        self.reasons.first().copied()
    }

    /// The other side of the pair
    pub fn other(&self, handle: &str) -> Option<&str> {
        if self.a == handle {
            Some(&self.b)
        } else if self.b == handle {
            Some(&self.a)
        } else {
            None
        }
    }
}

/// Compares people on the enabled edge kinds
#[derive(Debug, Clone)]
pub struct PairScorer {
    kinds: Vec<EdgeKind>,
    spinoff_marker: String,
}

impl PairScorer {
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            kinds: config.edges.enabled_kinds(),
            spinoff_marker: config.spinoff_marker.clone(),
        }
    }

    pub fn kinds(&self) -> &[EdgeKind] {
        &self.kinds
    }

    /// Matched kinds in evaluation order; empty for a self-pair
    pub fn reasons(&self, a: &Person, b: &Person) -> Vec<EdgeKind> {
        if a.handle == b.handle {
            return Vec::new();
        }
        self.kinds
            .iter()
            .copied()
            .filter(|kind| kind.matches(a, b, &self.spinoff_marker))
            .collect()
    }

    pub fn score(&self, a: &Person, b: &Person) -> usize {
        self.reasons(a, b).len()
    }

    pub fn compare(&self, a: &Person, b: &Person) -> Option<MatchRecord> {
        let reasons = self.reasons(a, b);
        if reasons.is_empty() {
            return None;
        }
        Some(MatchRecord {
            a: a.handle.clone(),
            b: b.handle.clone(),
            reasons,
        })
    }

    /// Every non-zero pair, `i < j` in table order
    pub fn score_pairs(&self, roster: &Roster) -> Vec<MatchRecord> {
        let people = roster.people();
        let mut matches = Vec::new();
        for (i, a) in people.iter().enumerate() {
            for b in &people[i + 1..] {
                if let Some(record) = self.compare(a, b) {
                    log::debug!(
                        "{} ~ {}: {} ({})",
                        record.a,
                        record.b,
                        record.score(),
                        record
                            .reasons
                            .iter()
                            .map(|k| k.key())
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                    matches.push(record);
                }
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use teamnet_roster::Attribute;

    fn person(row: usize, handle: &str, dept: &str, code: &str, blood: &str, role: &str) -> Person {
        Person::with_values(
            row,
            handle,
            [
                (Attribute::Name, handle),
                (Attribute::Department, dept),
                (Attribute::Personality, code),
                (Attribute::BloodType, blood),
                (Attribute::Role, role),
                (Attribute::BirthYear, ""),
            ],
        )
    }

    #[test]
    fn three_shared_attributes_score_three() {
        let scorer = PairScorer::new(&NetworkConfig::all_edges());
        let a = person(1, "a", "BI", "INTP", "A", "lead");
        let b = person(2, "b", "BI", "INTP", "A", "member");
        let record = scorer.compare(&a, &b).unwrap();
        assert_eq!(record.score(), 3);
        assert_eq!(
            record.reasons,
            vec![EdgeKind::Department, EdgeKind::Personality, EdgeKind::BloodType]
        );
        assert_eq!(record.primary(), Some(EdgeKind::Department));
    }

    #[test]
    fn disabled_kinds_do_not_count() {
        let config = NetworkConfig {
            edges: crate::config::EdgeToggles::only([EdgeKind::BloodType]),
            ..Default::default()
        };
        let scorer = PairScorer::new(&config);
        let a = person(1, "a", "BI", "INTP", "A", "");
        let b = person(2, "b", "BI", "INTP", "A", "");
        assert_eq!(scorer.reasons(&a, &b), vec![EdgeKind::BloodType]);
    }

    #[test]
    fn self_pairs_score_zero() {
        let scorer = PairScorer::new(&NetworkConfig::all_edges());
        let a = person(1, "a", "BI", "INTP", "A", "lead");
        assert_eq!(scorer.score(&a, &a), 0);
        assert!(scorer.compare(&a, &a).is_none());
    }

    #[test]
    fn pairs_keep_table_order() {
        let people = vec![
            person(1, "a", "BI", "", "", ""),
            person(2, "b", "Tech", "", "", ""),
            person(3, "c", "BI", "", "", ""),
        ];
        let roster = Roster::new(vec![Attribute::Name], people).unwrap();
        let pairs = PairScorer::new(&NetworkConfig::default()).score_pairs(&roster);
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].a.as_str(), pairs[0].b.as_str()), ("a", "c"));
        assert_eq!(pairs[0].other("c"), Some("a"));
    }
}
