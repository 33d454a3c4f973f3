use crate::compare::EdgeKind;
use crate::scorer::PairScorer;
use std::collections::{BTreeMap, HashMap};
use teamnet_protocol::{ChemistryPair, ChemistrySummary, SimilarPerson};
use teamnet_roster::Roster;

/// Pairs kept in the chemistry ranking
pub const CHEMISTRY_TOP: usize = 10;

/// One entry of a person's similar list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarEntry {
    /// Row position of the other person
    pub position: usize,
    pub score: usize,
    pub reasons: Vec<EdgeKind>,
}

/// Top matches of every person over the whole roster
///
/// Lists are computed with the same rules as the edges but ignore the
/// personality filter. Ties keep table order.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    lists: Vec<Vec<SimilarEntry>>,
    positions: HashMap<String, usize>,
}

impl SimilarityIndex {
    pub fn build(roster: &Roster, scorer: &PairScorer, limit: usize) -> Self {
        let people = roster.people();
        let mut lists: Vec<Vec<SimilarEntry>> = vec![Vec::new(); people.len()];

        for (i, a) in people.iter().enumerate() {
            for (j, b) in people.iter().enumerate().skip(i + 1) {
                let reasons = scorer.reasons(a, b);
                if reasons.is_empty() {
                    continue;
                }
                lists[i].push(SimilarEntry {
                    position: j,
                    score: reasons.len(),
                    reasons: reasons.clone(),
                });
                lists[j].push(SimilarEntry {
                    position: i,
                    score: reasons.len(),
                    reasons,
                });
            }
        }

        for list in &mut lists {
            list.sort_by_key(|entry| entry.position);
            // stable: equal scores stay in table order
            list.sort_by(|x, y| y.score.cmp(&x.score));
            list.truncate(limit);
        }

        let positions = people
            .iter()
            .enumerate()
            .map(|(pos, p)| (p.handle.clone(), pos))
            .collect();

        Self { lists, positions }
    }

    pub fn entries(&self, handle: &str) -> &[SimilarEntry] {
        self.positions
            .get(handle)
            .map(|&pos| self.lists[pos].as_slice())
            .unwrap_or(&[])
    }

    /// Similar list in output form
    pub fn similar_people(&self, roster: &Roster, handle: &str) -> Vec<SimilarPerson> {
        let people = roster.people();
        self.entries(handle)
            .iter()
            .filter_map(|entry| {
                let other = people.get(entry.position)?;
                Some(SimilarPerson {
                    name: other.name().to_string(),
                    handle: other.handle.clone(),
                    score: entry.score,
                    reasons: entry.reasons.iter().map(|k| k.key().to_string()).collect(),
                })
            })
            .collect()
    }

    /// Distinct pairs appearing in anyone's similar list, best first
    pub fn chemistry(&self, roster: &Roster) -> ChemistrySummary {
        let people = roster.people();

        // (earlier row, later row) -> best entry
        let mut pairs: BTreeMap<(usize, usize), &SimilarEntry> = BTreeMap::new();
        for (pos, list) in self.lists.iter().enumerate() {
            for entry in list {
                let key = (pos.min(entry.position), pos.max(entry.position));
                let better = pairs
                    .get(&key)
                    .map_or(true, |current| entry.score > current.score);
                if better {
                    pairs.insert(key, entry);
                }
            }
        }

        if pairs.is_empty() {
            return ChemistrySummary::default();
        }

        let mut ranked: Vec<((usize, usize), &SimilarEntry)> = pairs.into_iter().collect();
        ranked.sort_by(|(ka, a), (kb, b)| b.score.cmp(&a.score).then_with(|| ka.cmp(kb)));

        let pair_count = ranked.len();
        let total: usize = ranked.iter().map(|(_, e)| e.score).sum();
        let max_score = ranked.iter().map(|(_, e)| e.score).max().unwrap_or(0);

        let mut histogram: BTreeMap<usize, usize> = BTreeMap::new();
        for (_, entry) in &ranked {
            *histogram.entry(entry.score).or_default() += 1;
        }

        let top_pairs = ranked
            .iter()
            .take(CHEMISTRY_TOP)
            .filter_map(|((a, b), entry)| {
                let (pa, pb) = (people.get(*a)?, people.get(*b)?);
                Some(ChemistryPair {
                    a: pa.handle.clone(),
                    b: pb.handle.clone(),
                    a_label: pa.label(),
                    b_label: pb.label(),
                    score: entry.score,
                    reasons: entry.reasons.iter().map(|k| k.key().to_string()).collect(),
                })
            })
            .collect();

        ChemistrySummary {
            top_pairs,
            pair_count,
            mean_score: total as f64 / pair_count as f64,
            max_score,
            histogram: histogram.into_iter().collect(),
        }
    }
}
