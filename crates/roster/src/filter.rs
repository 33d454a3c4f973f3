use crate::error::{Result, RosterError};
use crate::types::{Person, Roster};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Letter expected at a given position of the personality code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisFilter {
    position: usize,
    letter: char,
}

impl AxisFilter {
    /// Energy axis (first letter): `E` or `I`
    pub fn energy(value: &str) -> Result<Self> {
        Self::parse(value, 0, ['E', 'I'])
    }

    /// Decision axis (third letter): `T` or `F`
    pub fn decision(value: &str) -> Result<Self> {
        Self::parse(value, 2, ['T', 'F'])
    }

    fn parse(value: &str, position: usize, allowed: [char; 2]) -> Result<Self> {
        let mut chars = value.trim().chars();
        match (chars.next().map(|c| c.to_ascii_uppercase()), chars.next()) {
            (Some(letter), None) if allowed.contains(&letter) => Ok(Self { position, letter }),
            _ => Err(RosterError::invalid_filter(format!(
                "expected {} or {}, got '{value}'",
                allowed[0], allowed[1]
            ))),
        }
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    /// Codes that are absent or too short never pass
    fn keeps(&self, code: Option<&str>) -> bool {
        code.and_then(|c| c.chars().nth(self.position))
            .is_some_and(|c| c == self.letter)
    }
}

/// Personality filter applied before the graph is built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityFilter {
    pub energy: Option<AxisFilter>,
    pub decision: Option<AxisFilter>,
    pub exact: Option<String>,
}

/// Filtered roster plus whether the filter had to be dropped
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub roster: Roster,
    pub fallback: bool,
}

impl PersonalityFilter {
    pub fn is_empty(&self) -> bool {
        self.energy.is_none() && self.decision.is_none() && self.exact.is_none()
    }

    pub fn keeps(&self, person: &Person) -> bool {
        let code = person.personality();
        if let Some(exact) = &self.exact {
            if code != Some(exact.as_str()) {
                return false;
            }
        }
        self.energy.map_or(true, |f| f.keeps(code)) && self.decision.map_or(true, |f| f.keeps(code))
    }

    /// Apply the filter; an empty result falls back to the whole roster
    pub fn apply(&self, roster: &Roster) -> FilterOutcome {
        if self.is_empty() {
            return FilterOutcome {
                roster: roster.clone(),
                fallback: false,
            };
        }

        let filtered = roster.retain(|p| self.keeps(p));
        if filtered.is_empty() {
            log::warn!("No one matches the personality filter; showing the full roster");
            return FilterOutcome {
                roster: roster.clone(),
                fallback: true,
            };
        }

        log::info!(
            "Personality filter kept {} of {} people",
            filtered.len(),
            roster.len()
        );
        FilterOutcome {
            roster: filtered,
            fallback: false,
        }
    }
}

impl FromStr for PersonalityFilter {
    type Err = RosterError;

    /// Parse an exact code such as `INTP`
    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(RosterError::invalid_filter("empty personality code"));
        }
        Ok(Self {
            exact: Some(code),
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attribute;

    fn roster() -> Roster {
        let people = [("a", "INTP"), ("b", "ESFJ"), ("c", "ISTP"), ("d", "")]
            .into_iter()
            .enumerate()
            .map(|(i, (h, code))| {
                Person::with_values(i + 1, h, [(Attribute::Name, h), (Attribute::Personality, code)])
            })
            .collect();
        Roster::new(vec![Attribute::Name, Attribute::Personality], people).unwrap()
    }

    fn handles(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.roster.people().iter().map(|p| p.handle.as_str()).collect()
    }

    #[test]
    fn axis_filters_combine() {
        let filter = PersonalityFilter {
            energy: Some(AxisFilter::energy("i").unwrap()),
            decision: Some(AxisFilter::decision("T").unwrap()),
            exact: None,
        };
        let outcome = filter.apply(&roster());
        assert_eq!(handles(&outcome), vec!["a", "c"]);
        assert!(!outcome.fallback);
    }

    #[test]
    fn missing_codes_fail_axis_filters() {
        let filter = PersonalityFilter {
            energy: Some(AxisFilter::energy("E").unwrap()),
            ..Default::default()
        };
        assert_eq!(handles(&filter.apply(&roster())), vec!["b"]);
    }

    #[test]
    fn exact_filter_is_case_insensitive_on_input() {
        let filter: PersonalityFilter = "esfj".parse().unwrap();
        assert_eq!(handles(&filter.apply(&roster())), vec!["b"]);
    }

    #[test]
    fn empty_result_falls_back_to_everyone() {
        let filter: PersonalityFilter = "ENTJ".parse().unwrap();
        let outcome = filter.apply(&roster());
        assert!(outcome.fallback);
        assert_eq!(outcome.roster.len(), 4);
    }

    #[test]
    fn rejects_unknown_axis_letters() {
        assert!(AxisFilter::energy("X").is_err());
        assert!(AxisFilter::decision("TF").is_err());
    }
}
