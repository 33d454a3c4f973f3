use std::collections::HashMap;
use teamnet_protocol::NodeStats;
use teamnet_roster::{Person, Roster};

/// Counts of shared department, personality and cohort over the full roster
#[derive(Debug, Clone, Default)]
pub struct PeerCounts {
    departments: HashMap<String, usize>,
    personalities: HashMap<String, usize>,
    cohorts: HashMap<String, usize>,
}

impl PeerCounts {
    pub fn new(roster: &Roster) -> Self {
        let mut counts = Self::default();
        for person in roster.people() {
            bump(&mut counts.departments, person.department());
            bump(&mut counts.personalities, person.personality());
            bump(&mut counts.cohorts, person.cohort());
        }
        counts
    }

    /// Statistics for one person; `degree` comes from the drawn graph
    pub fn stats_for(&self, person: &Person, degree: usize) -> NodeStats {
        NodeStats {
            degree,
            same_department: others(&self.departments, person.department()),
            same_personality: others(&self.personalities, person.personality()),
            same_cohort: others(&self.cohorts, person.cohort()),
        }
    }
}

fn bump(map: &mut HashMap<String, usize>, value: Option<&str>) {
    if let Some(v) = value {
        *map.entry(v.trim().to_string()).or_default() += 1;
    }
}

fn others(map: &HashMap<String, usize>, value: Option<&str>) -> usize {
    value
        .and_then(|v| map.get(v.trim()))
        .map_or(0, |n| n.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamnet_roster::Attribute;

    #[test]
    fn counts_exclude_self_and_absent_values() {
        let people = vec![
            Person::with_values(1, "a", [(Attribute::Department, "BI"), (Attribute::Cohort, "")]),
            Person::with_values(2, "b", [(Attribute::Department, "BI"), (Attribute::Cohort, "")]),
            Person::with_values(3, "c", [(Attribute::Department, "Ops"), (Attribute::Cohort, "")]),
        ];
        let roster = Roster::new(vec![Attribute::Name], people).unwrap();
        let counts = PeerCounts::new(&roster);

        let a = counts.stats_for(roster.get("a").unwrap(), 2);
        assert_eq!(a.degree, 2);
        assert_eq!(a.same_department, 1);
        assert_eq!(a.same_cohort, 0);
        assert_eq!(a.same_personality, 0);
        assert_eq!(counts.stats_for(roster.get("c").unwrap(), 0).same_department, 0);
    }
}
