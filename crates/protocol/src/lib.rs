use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const GRAPH_SCHEMA_VERSION: u32 = 1;

/// Force model the renderer should run with.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhysicsModel {
    BarnesHut,
    #[default]
    #[serde(rename = "force_atlas_2based")]
    ForceAtlas2Based,
    Repulsion,
}

impl PhysicsModel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BarnesHut => "barnes_hut",
            Self::ForceAtlas2Based => "force_atlas_2based",
            Self::Repulsion => "repulsion",
        }
    }
}

/// Birth cohort bucket derived from a normalized birth year.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Generation {
    GenX,
    Millennial,
    GenZ,
}

impl Generation {
    pub const ALL: [Self; 3] = [Self::GenX, Self::Millennial, Self::GenZ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::GenX => "Gen X",
            Self::Millennial => "Millennial",
            Self::GenZ => "Gen Z+",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct RenderOptions {
    pub physics: PhysicsModel,
    pub show_labels: bool,
}

/// Everything the renderer needs for one run: nodes, edges and the side panels.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct GraphDocument {
    pub schema_version: u32,
    pub options: RenderOptions,
    pub summary: GraphSummary,
    pub nodes: Vec<NodePayload>,
    pub edges: Vec<EdgePayload>,
    /// Handle of the person selected by search, if any.
    pub focus: Option<String>,
    /// True when the personality filter matched nobody and the full roster was used.
    pub filter_fallback: bool,
    pub centrality: Vec<CentralityRow>,
    pub chemistry: ChemistrySummary,
    pub composition: CompositionReport,
    pub poster: Vec<PosterSection>,
    pub missing_images: Vec<String>,
    pub notices: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct GraphSummary {
    pub people: usize,
    pub visible_people: usize,
    pub edges: usize,
    pub edge_kinds: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ColorPair {
    pub border: String,
    pub background: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct NodeColor {
    pub border: String,
    pub background: String,
    pub highlight: ColorPair,
    pub hover: ColorPair,
}

impl NodeColor {
    /// White card with a coloured ring, as used for every person node.
    pub fn ring(border: &str) -> Self {
        Self {
            border: border.to_string(),
            background: "#ffffff".to_string(),
            highlight: ColorPair {
                border: border.to_string(),
                background: "#ffffff".to_string(),
            },
            hover: ColorPair {
                border: border.to_string(),
                background: "#f9fafb".to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct NodePayload {
    pub id: String,
    pub label: Option<String>,
    /// Tooltip lines.
    pub title: Vec<String>,
    pub group: Option<String>,
    pub color: NodeColor,
    pub image: Option<String>,
    pub size: u32,
    pub x: i64,
    pub y: i64,
    pub profile: NodeProfile,
    pub stats: NodeStats,
    pub similar: Vec<SimilarPerson>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct NodeProfile {
    pub name: String,
    pub handle: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub job_family: Option<String>,
    pub birth_year: Option<i32>,
    pub join_year: Option<i32>,
    pub personality: Option<String>,
    pub blood_type: Option<String>,
    pub cohort: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
pub struct NodeStats {
    pub degree: usize,
    pub same_department: usize,
    pub same_personality: usize,
    pub same_cohort: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct SimilarPerson {
    pub name: String,
    pub handle: String,
    pub score: usize,
    pub reasons: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct EdgePayload {
    pub from: String,
    pub to: String,
    pub weight: usize,
    pub reasons: Vec<String>,
    /// First matched edge kind; drives the colour.
    pub edge_type: String,
    pub title: String,
    pub color: String,
    /// Stroke width.
    pub value: f64,
    /// Preferred spring length.
    pub length: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct CentralityRow {
    pub handle: String,
    pub name: String,
    pub department: Option<String>,
    pub degree: f64,
    pub betweenness: f64,
    pub closeness: f64,
    /// `None` when the power iteration did not converge.
    pub eigenvector: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ChemistryPair {
    pub a: String,
    pub b: String,
    pub a_label: String,
    pub b_label: String,
    pub score: usize,
    pub reasons: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, JsonSchema)]
pub struct ChemistrySummary {
    pub top_pairs: Vec<ChemistryPair>,
    pub pair_count: usize,
    pub mean_score: f64,
    pub max_score: usize,
    /// `(score, number of pairs)` ascending by score.
    pub histogram: Vec<(usize, usize)>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, JsonSchema)]
pub struct CompositionReport {
    /// `(code, count)` most frequent first.
    pub personality_counts: Vec<(String, usize)>,
    /// `(year, count)` ascending by year.
    pub join_years: Vec<(i32, usize)>,
    pub energy: AxisCount,
    pub decision: AxisCount,
    pub department_ratios: Vec<DepartmentRatio>,
    pub axis_ratios: Vec<AxisRatio>,
    pub diversity: Vec<DepartmentDiversity>,
    pub generations: Vec<(Generation, usize)>,
    pub department_generations: Vec<DepartmentGenerations>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct AxisCount {
    pub left: String,
    pub right: String,
    pub left_count: usize,
    pub right_count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct DepartmentRatio {
    pub department: String,
    pub introvert_pct: f64,
    pub thinking_pct: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct AxisRatio {
    pub axis: String,
    pub left_pct: f64,
    pub right_pct: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct DepartmentDiversity {
    pub department: String,
    pub entropy: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct DepartmentGenerations {
    pub department: String,
    /// Percentage of the department in each generation, in generation order.
    pub shares: Vec<(Generation, f64)>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct PosterSection {
    pub department: String,
    pub cards: Vec<PosterCard>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct PosterCard {
    pub name: String,
    pub handle: String,
    pub role: Option<String>,
    pub join_year: Option<i32>,
    pub personality: Option<String>,
    pub image: Option<String>,
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

pub fn document_schema() -> Result<String> {
    let schema = schemars::schema_for!(GraphDocument);
    serde_json::to_string_pretty(&schema).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn physics_model_uses_renderer_names() {
        let json = serde_json::to_string(&PhysicsModel::ForceAtlas2Based).unwrap();
        assert_eq!(json, "\"force_atlas_2based\"");
        assert_eq!(PhysicsModel::default().as_str(), "force_atlas_2based");
    }

    #[test]
    fn ring_color_keeps_border_everywhere() {
        let color = NodeColor::ring("#6366f1");
        assert_eq!(color.highlight.border, "#6366f1");
        assert_eq!(color.hover.border, "#6366f1");
        assert_eq!(color.hover.background, "#f9fafb");
    }

    #[test]
    fn schema_mentions_document_fields() {
        let schema = document_schema().unwrap();
        assert!(schema.contains("filter_fallback"));
        assert!(schema.contains("schema_version"));
    }
}
