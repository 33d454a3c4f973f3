//! Visual encoding handed to the renderer: colours, widths, layout hints.

use crate::compare::{EdgeKind, FALLBACK_EDGE_COLOR};
use crate::config::LayoutConfig;
use std::collections::BTreeMap;
use teamnet_roster::Roster;

static PERSONALITY_COLORS: [(&str, &str); 9] = [
    ("INFJ", "#6366f1"),
    ("INFP", "#22c55e"),
    ("INTJ", "#0ea5e9"),
    ("INTP", "#6366f1"),
    ("ISFP", "#22c55e"),
    ("ENFP", "#f97316"),
    ("ENFJ", "#ec4899"),
    ("ESFJ", "#eab308"),
    ("ESFP", "#a855f7"),
];

pub const DEFAULT_BORDER_COLOR: &str = "#9ca3af";

/// Border colour of a person node
pub fn personality_color(code: Option<&str>) -> &'static str {
    code.map(str::trim)
        .and_then(|code| PERSONALITY_COLORS.iter().find(|(c, _)| *c == code))
        .map_or(DEFAULT_BORDER_COLOR, |(_, color)| *color)
}

pub fn edge_color(kind: Option<EdgeKind>) -> &'static str {
    kind.map_or(FALLBACK_EDGE_COLOR, EdgeKind::color)
}

/// Stroke width for an edge of the given weight
pub fn edge_thickness(weight: usize) -> f64 {
    1.0 + weight as f64 * 1.3
}

/// Preferred spring length; stronger ties sit closer
pub fn edge_length(weight: usize) -> f64 {
    (280.0 - 40.0 * weight as f64).max(80.0)
}

/// `same department / same personality (2 matched)`
pub fn edge_title(reasons: &[EdgeKind]) -> String {
    let phrases: Vec<&str> = reasons.iter().map(|k| k.phrase()).collect();
    format!("{} ({} matched)", phrases.join(" / "), reasons.len())
}

/// Initial node positions: departments as columns, cohorts as rows
///
/// People without a cohort share the row after the last cohort; people
/// without a department sit in the first column.
#[derive(Debug, Clone)]
pub struct LayoutGrid {
    columns: BTreeMap<String, i64>,
    rows: BTreeMap<String, i64>,
    none_row: i64,
}

impl LayoutGrid {
    pub fn new(roster: &Roster, spacing: LayoutConfig) -> Self {
        let people = roster.people();
        let columns = ranked(
            people.iter().filter_map(|p| p.department()),
            spacing.column_spacing,
        );
        let rows = ranked(people.iter().filter_map(|p| p.cohort()), spacing.row_spacing);
        let none_row = rows.len() as i64 * spacing.row_spacing;
        Self {
            columns,
            rows,
            none_row,
        }
    }

    pub fn position(&self, department: Option<&str>, cohort: Option<&str>) -> (i64, i64) {
        let x = department
            .and_then(|d| self.columns.get(d.trim()))
            .copied()
            .unwrap_or(0);
        let y = cohort
            .and_then(|c| self.rows.get(c.trim()))
            .copied()
            .unwrap_or(self.none_row);
        (x, y)
    }
}

fn ranked<'a, I>(values: I, spacing: i64) -> BTreeMap<String, i64>
where
    I: Iterator<Item = &'a str>,
{
    let mut distinct: Vec<&str> = values.map(str::trim).filter(|v| !v.is_empty()).collect();
    distinct.sort_unstable();
    distinct.dedup();
    distinct
        .into_iter()
        .enumerate()
        .map(|(i, v)| (v.to_string(), i as i64 * spacing))
        .collect()
}
