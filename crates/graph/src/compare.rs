//! Attribute comparison rules behind every edge.

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use teamnet_roster::normalize::is_filled;
use teamnet_roster::{Attribute, Person};

/// Attribute two people can share, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Department,
    Role,
    BirthYear,
    Cohort,
    Spinoff,
    Gender,
    JoinYear,
    Personality,
    BloodType,
}

/// Colour for edges whose type is not known to the palette
pub const FALLBACK_EDGE_COLOR: &str = "#9ca3af";

impl EdgeKind {
    pub const ALL: [Self; 9] = [
        Self::Department,
        Self::Role,
        Self::BirthYear,
        Self::Cohort,
        Self::Spinoff,
        Self::Gender,
        Self::JoinYear,
        Self::Personality,
        Self::BloodType,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Role => "role",
            Self::BirthYear => "birth_year",
            Self::Cohort => "cohort",
            Self::Spinoff => "spinoff",
            Self::Gender => "gender",
            Self::JoinYear => "join_year",
            Self::Personality => "personality",
            Self::BloodType => "blood_type",
        }
    }

    /// Human phrase used in edge tooltips
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::Department => "same department",
            Self::Role => "same role",
            Self::BirthYear => "same birth year",
            Self::Cohort => "same cohort",
            Self::Spinoff => "same spin-off",
            Self::Gender => "same gender",
            Self::JoinYear => "same join year",
            Self::Personality => "same personality",
            Self::BloodType => "same blood type",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Department => "#22c55e",
            Self::Role => "#16a34a",
            Self::BirthYear => "#0ea5e9",
            Self::Cohort => "#3b82f6",
            Self::Spinoff => "#f59e0b",
            Self::Gender => "#ec4899",
            Self::JoinYear => "#a855f7",
            Self::Personality => "#ef4444",
            Self::BloodType => "#f97316",
        }
    }

    /// Column the comparison reads
    pub const fn attribute(self) -> Attribute {
        match self {
            Self::Department => Attribute::Department,
            Self::Role => Attribute::Role,
            Self::BirthYear => Attribute::BirthYear,
            Self::Cohort => Attribute::Cohort,
            Self::Spinoff => Attribute::Spinoff,
            Self::Gender => Attribute::Gender,
            Self::JoinYear => Attribute::JoinYear,
            Self::Personality => Attribute::Personality,
            Self::BloodType => Attribute::BloodType,
        }
    }

    /// Whether two people share this attribute
    pub fn matches(self, a: &Person, b: &Person, spinoff_marker: &str) -> bool {
        match self {
            Self::BirthYear => valid_equal_years(a.birth_year(), b.birth_year()),
            Self::JoinYear => valid_equal_years(a.join_year(), b.join_year()),
            Self::Spinoff => {
                has_marker(a.raw(Attribute::Spinoff), spinoff_marker)
                    && has_marker(b.raw(Attribute::Spinoff), spinoff_marker)
            }
            kind => valid_equal(a.raw(kind.attribute()), b.raw(kind.attribute())),
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EdgeKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == wanted)
            .ok_or_else(|| GraphError::UnknownEdgeKind(s.to_string()))
    }
}

/// Both sides filled and equal after trimming
pub fn valid_equal(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) if is_filled(Some(a)) && is_filled(Some(b)) => a.trim() == b.trim(),
        _ => false,
    }
}

fn valid_equal_years(a: Option<i32>, b: Option<i32>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

fn has_marker(value: Option<&str>, marker: &str) -> bool {
    !marker.is_empty() && value.is_some_and(|v| is_filled(Some(v)) && v.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(handle: &str, cells: &[(Attribute, &str)]) -> Person {
        Person::with_values(1, handle, cells.iter().copied())
    }

    #[test]
    fn absent_values_never_match() {
        assert!(!valid_equal(None, None));
        assert!(!valid_equal(Some(""), Some("")));
        assert!(!valid_equal(Some("nan"), Some("nan")));
        assert!(!valid_equal(Some("BI"), None));
        assert!(valid_equal(Some(" BI"), Some("BI ")));
    }

    #[test]
    fn years_compare_after_normalization() {
        let a = person("a", &[(Attribute::BirthYear, "94")]);
        let b = person("b", &[(Attribute::BirthYear, "1994년")]);
        let c = person("c", &[(Attribute::BirthYear, "abcd")]);
        let d = person("d", &[(Attribute::BirthYear, "n/a")]);
        assert!(EdgeKind::BirthYear.matches(&a, &b, ""));
        assert!(!EdgeKind::BirthYear.matches(&c, &d, ""));
    }

    #[test]
    fn spinoff_requires_marker_on_both_sides() {
        let a = person("a", &[(Attribute::Spinoff, "카카오엔터")]);
        let b = person("b", &[(Attribute::Spinoff, "카카오")]);
        let c = person("c", &[(Attribute::Spinoff, "네이버")]);
        assert!(EdgeKind::Spinoff.matches(&a, &b, "카카오"));
        assert!(!EdgeKind::Spinoff.matches(&a, &c, "카카오"));
        assert!(!EdgeKind::Spinoff.matches(&a, &b, ""));
    }

    #[test]
    fn parses_keys() {
        assert_eq!("blood-type".parse::<EdgeKind>().unwrap(), EdgeKind::BloodType);
        assert_eq!(" Department ".parse::<EdgeKind>().unwrap(), EdgeKind::Department);
        assert!("shoe_size".parse::<EdgeKind>().is_err());
    }
}
