//! Team composition analytics: personality mix, join years, generations.
//!
//! Per-department breakdowns skip the departments listed in
//! [`CompositionConfig::excluded_departments`] (typically the umbrella
//! organisation every team belongs to). Personality codes containing `?`
//! are treated as unknown.

use crate::images::ImageReport;
use crate::normalize::generation;
use crate::types::{Person, Roster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use teamnet_protocol::{
    AxisCount, AxisRatio, CompositionReport, DepartmentDiversity, DepartmentGenerations,
    DepartmentRatio, Generation, PosterCard, PosterSection,
};

/// Umbrella department of the built-in sample, kept out of per-department breakdowns
pub const DEFAULT_EXCLUDED_DEPARTMENTS: [&str; 1] = ["데이터분석랩"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositionConfig {
    /// Departments left out of per-department breakdowns
    pub excluded_departments: Vec<String>,

    /// Departments listed first on the poster, in this order
    pub department_order: Vec<String>,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            excluded_departments: DEFAULT_EXCLUDED_DEPARTMENTS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            department_order: Vec::new(),
        }
    }
}

impl CompositionConfig {
    fn includes(&self, department: &str) -> bool {
        !self.excluded_departments.iter().any(|d| d == department)
    }
}

/// Personality code usable for axis statistics
fn clean_code(person: &Person, min_len: usize) -> Option<&str> {
    person
        .personality()
        .filter(|code| !code.contains('?') && code.chars().count() >= min_len)
}

fn letter_at(code: &str, pos: usize) -> Option<char> {
    code.chars().nth(pos)
}

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Compute every composition breakdown for a roster
pub fn analyze(roster: &Roster, config: &CompositionConfig) -> CompositionReport {
    CompositionReport {
        personality_counts: personality_counts(roster),
        join_years: join_year_counts(roster),
        energy: axis_count(roster, 0, 'I', 'E'),
        decision: axis_count(roster, 2, 'T', 'F'),
        department_ratios: department_ratios(roster, config),
        axis_ratios: axis_ratios(roster),
        diversity: diversity(roster, config),
        generations: generation_counts(roster),
        department_generations: department_generations(roster, config),
    }
}

/// `(code, count)`, most frequent first, ties alphabetical
pub fn personality_counts(roster: &Roster) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for code in roster.people().iter().filter_map(Person::personality) {
        *counts.entry(code).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(code, n)| (code.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

pub fn join_year_counts(roster: &Roster) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in roster.people().iter().filter_map(Person::join_year) {
        *counts.entry(year).or_default() += 1;
    }
    counts.into_iter().collect()
}

fn axis_count(roster: &Roster, pos: usize, left: char, right: char) -> AxisCount {
    let mut count = AxisCount {
        left: left.to_string(),
        right: right.to_string(),
        ..AxisCount::default()
    };
    for letter in roster
        .people()
        .iter()
        .filter_map(|p| clean_code(p, 1))
        .filter_map(|code| letter_at(code, pos))
    {
        if letter == left {
            count.left_count += 1;
        } else if letter == right {
            count.right_count += 1;
        }
    }
    count
}

/// Share of introverts and of thinkers per department
pub fn department_ratios(roster: &Roster, config: &CompositionConfig) -> Vec<DepartmentRatio> {
    #[derive(Default)]
    struct Tally {
        i: usize,
        e: usize,
        t: usize,
        f: usize,
    }

    let mut by_dept: BTreeMap<&str, Tally> = BTreeMap::new();
    for person in roster.people() {
        let (Some(dept), Some(code)) = (person.department(), clean_code(person, 3)) else {
            continue;
        };
        if !config.includes(dept) {
            continue;
        }
        let tally = by_dept.entry(dept).or_default();
        match letter_at(code, 0) {
            Some('I') => tally.i += 1,
            Some('E') => tally.e += 1,
            _ => {}
        }
        match letter_at(code, 2) {
            Some('T') => tally.t += 1,
            Some('F') => tally.f += 1,
            _ => {}
        }
    }

    by_dept
        .into_iter()
        .map(|(dept, t)| DepartmentRatio {
            department: dept.to_string(),
            introvert_pct: pct(t.i, t.i + t.e),
            thinking_pct: pct(t.t, t.t + t.f),
        })
        .collect()
}

/// Left/right split for each of the four axes
pub fn axis_ratios(roster: &Roster) -> Vec<AxisRatio> {
    const AXES: [(&str, char, char); 4] = [
        ("I/E", 'I', 'E'),
        ("N/S", 'N', 'S'),
        ("T/F", 'T', 'F'),
        ("J/P", 'J', 'P'),
    ];

    let codes: Vec<&str> = roster
        .people()
        .iter()
        .filter_map(|p| clean_code(p, 4))
        .collect();
    if codes.is_empty() {
        return Vec::new();
    }

    AXES.iter()
        .enumerate()
        .map(|(pos, (axis, left, right))| {
            let l = codes.iter().filter(|c| letter_at(c, pos) == Some(*left)).count();
            let r = codes.iter().filter(|c| letter_at(c, pos) == Some(*right)).count();
            AxisRatio {
                axis: (*axis).to_string(),
                left_pct: pct(l, l + r),
                right_pct: pct(r, l + r),
            }
        })
        .collect()
}

/// Shannon entropy (bits) of the code distribution inside each department
pub fn shannon_entropy<'a, I>(codes: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for code in codes {
        *counts.entry(code).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    let entropy: f64 = counts
        .values()
        .map(|&n| {
            let p = n as f64 / total as f64;
            -p * p.log2()
        })
        .sum();
    // -0.0 for a single code
    entropy.abs()
}

pub fn diversity(roster: &Roster, config: &CompositionConfig) -> Vec<DepartmentDiversity> {
    let mut by_dept: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for person in roster.people() {
        let (Some(dept), Some(code)) = (person.department(), clean_code(person, 4)) else {
            continue;
        };
        if config.includes(dept) {
            by_dept.entry(dept).or_default().push(code);
        }
    }

    let mut out: Vec<DepartmentDiversity> = by_dept
        .into_iter()
        .map(|(dept, codes)| DepartmentDiversity {
            department: dept.to_string(),
            entropy: shannon_entropy(codes),
        })
        .collect();
    out.sort_by(|a, b| {
        b.entropy
            .total_cmp(&a.entropy)
            .then_with(|| a.department.cmp(&b.department))
    });
    out
}

/// Head count per generation, largest first
pub fn generation_counts(roster: &Roster) -> Vec<(Generation, usize)> {
    let mut counts: BTreeMap<Generation, usize> = BTreeMap::new();
    for year in roster.people().iter().filter_map(Person::birth_year) {
        *counts.entry(generation(year)).or_default() += 1;
    }
    let mut out: Vec<(Generation, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

pub fn department_generations(
    roster: &Roster,
    config: &CompositionConfig,
) -> Vec<DepartmentGenerations> {
    let mut by_dept: BTreeMap<&str, BTreeMap<Generation, usize>> = BTreeMap::new();
    for person in roster.people() {
        let (Some(dept), Some(year)) = (person.department(), person.birth_year()) else {
            continue;
        };
        if config.includes(dept) {
            *by_dept
                .entry(dept)
                .or_default()
                .entry(generation(year))
                .or_default() += 1;
        }
    }

    by_dept
        .into_iter()
        .map(|(dept, counts)| {
            let total: usize = counts.values().sum();
            DepartmentGenerations {
                department: dept.to_string(),
                shares: Generation::ALL
                    .iter()
                    .map(|g| (*g, pct(counts.get(g).copied().unwrap_or(0), total)))
                    .collect(),
            }
        })
        .collect()
}

/// Printable team layout grouped by department
///
/// Configured departments come first in their given order, the rest follow
/// alphabetically. People without a department are left off.
pub fn poster(
    roster: &Roster,
    config: &CompositionConfig,
    images: Option<&ImageReport>,
) -> Vec<PosterSection> {
    let mut groups: BTreeMap<&str, Vec<&Person>> = BTreeMap::new();
    for person in roster.people() {
        if let Some(dept) = person.department() {
            groups.entry(dept).or_default().push(person);
        }
    }

    let mut order: Vec<&str> = config
        .department_order
        .iter()
        .map(String::as_str)
        .filter(|d| groups.contains_key(d))
        .collect();
    order.extend(
        groups
            .keys()
            .copied()
            .filter(|d| !config.department_order.iter().any(|o| o == d)),
    );

    order
        .into_iter()
        .map(|dept| PosterSection {
            department: dept.to_string(),
            cards: groups[dept]
                .iter()
                .map(|p| PosterCard {
                    name: p.name().to_string(),
                    handle: p.handle.clone(),
                    role: p.role().map(str::to_string),
                    join_year: p.join_year(),
                    personality: p.personality().map(str::to_string),
                    image: images.and_then(|r| r.url_for(&p.handle)).map(str::to_string),
                })
                .collect(),
        })
        .collect()
}
