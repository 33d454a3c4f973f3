use crate::compare::EdgeKind;
use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use teamnet_protocol::PhysicsModel;
use teamnet_roster::{Attribute, CompositionConfig};

pub const BASE_NODE_SIZE_RANGE: RangeInclusive<u32> = 5..=60;
pub const DEGREE_SCALE_RANGE: RangeInclusive<u32> = 0..=40;

/// Configuration for one graph run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Which shared attributes create edges
    pub edges: EdgeToggles,

    /// Substring marking people who came from the same parent company
    pub spinoff_marker: String,

    /// Node sizing rules
    pub sizing: SizingConfig,

    /// Show names on nodes
    pub show_labels: bool,

    /// Entries kept in each person's similar list
    pub similar_limit: usize,

    /// Spacing of the department/cohort layout hint
    pub layout: LayoutConfig,

    /// Force model the renderer should use
    pub physics: PhysicsModel,

    /// Analytics and poster settings
    pub composition: CompositionConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            edges: EdgeToggles::default(),
            spinoff_marker: "카카오".to_string(),
            sizing: SizingConfig::default(),
            show_labels: true,
            similar_limit: 3,
            layout: LayoutConfig::default(),
            physics: PhysicsModel::default(),
            composition: CompositionConfig::default(),
        }
    }
}

impl NetworkConfig {
    /// Every edge kind switched on
    pub fn all_edges() -> Self {
        Self {
            edges: EdgeToggles::all(),
            ..Default::default()
        }
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| GraphError::invalid_config(format!("bad TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !BASE_NODE_SIZE_RANGE.contains(&self.sizing.base_node_size) {
            return Err(GraphError::invalid_config(format!(
                "base_node_size ({}) must be within {}..={}",
                self.sizing.base_node_size,
                BASE_NODE_SIZE_RANGE.start(),
                BASE_NODE_SIZE_RANGE.end()
            )));
        }

        if !DEGREE_SCALE_RANGE.contains(&self.sizing.degree_scale) {
            return Err(GraphError::invalid_config(format!(
                "degree_scale ({}) must be within {}..={}",
                self.sizing.degree_scale,
                DEGREE_SCALE_RANGE.start(),
                DEGREE_SCALE_RANGE.end()
            )));
        }

        if self.layout.column_spacing <= 0 || self.layout.row_spacing <= 0 {
            return Err(GraphError::invalid_config("layout spacing must be > 0"));
        }

        if self.edges.enabled(EdgeKind::Spinoff) && self.spinoff_marker.trim().is_empty() {
            return Err(GraphError::invalid_config(
                "spinoff edges need a non-empty spinoff_marker",
            ));
        }

        Ok(())
    }

    /// Columns the table must carry for this configuration
    pub fn required_attributes(&self) -> Vec<Attribute> {
        let mut attrs = vec![Attribute::Name];
        attrs.extend(self.edges.enabled_kinds().into_iter().map(EdgeKind::attribute));
        attrs
    }
}

/// Per-kind switches plus an `all` override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdgeToggles {
    pub all: bool,
    pub department: bool,
    pub role: bool,
    pub birth_year: bool,
    pub cohort: bool,
    pub spinoff: bool,
    pub gender: bool,
    pub join_year: bool,
    pub personality: bool,
    pub blood_type: bool,
}

impl Default for EdgeToggles {
    fn default() -> Self {
        Self {
            all: false,
            department: true,
            role: false,
            birth_year: true,
            cohort: false,
            spinoff: false,
            gender: false,
            join_year: false,
            personality: true,
            blood_type: true,
        }
    }
}

impl EdgeToggles {
    pub fn all() -> Self {
        Self {
            all: true,
            ..Self::none()
        }
    }

    pub fn none() -> Self {
        Self {
            all: false,
            department: false,
            role: false,
            birth_year: false,
            cohort: false,
            spinoff: false,
            gender: false,
            join_year: false,
            personality: false,
            blood_type: false,
        }
    }

    /// Exactly the given kinds
    pub fn only<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = EdgeKind>,
    {
        let mut toggles = Self::none();
        for kind in kinds {
            toggles.set(kind, true);
        }
        toggles
    }

    pub fn set(&mut self, kind: EdgeKind, on: bool) {
        *self.slot(kind) = on;
    }

    fn slot(&mut self, kind: EdgeKind) -> &mut bool {
        match kind {
            EdgeKind::Department => &mut self.department,
            EdgeKind::Role => &mut self.role,
            EdgeKind::BirthYear => &mut self.birth_year,
            EdgeKind::Cohort => &mut self.cohort,
            EdgeKind::Spinoff => &mut self.spinoff,
            EdgeKind::Gender => &mut self.gender,
            EdgeKind::JoinYear => &mut self.join_year,
            EdgeKind::Personality => &mut self.personality,
            EdgeKind::BloodType => &mut self.blood_type,
        }
    }

    pub fn enabled(&self, kind: EdgeKind) -> bool {
        self.all
            || match kind {
                EdgeKind::Department => self.department,
                EdgeKind::Role => self.role,
                EdgeKind::BirthYear => self.birth_year,
                EdgeKind::Cohort => self.cohort,
                EdgeKind::Spinoff => self.spinoff,
                EdgeKind::Gender => self.gender,
                EdgeKind::JoinYear => self.join_year,
                EdgeKind::Personality => self.personality,
                EdgeKind::BloodType => self.blood_type,
            }
    }

    /// Enabled kinds in evaluation order
    pub fn enabled_kinds(&self) -> Vec<EdgeKind> {
        EdgeKind::ALL
            .into_iter()
            .filter(|kind| self.enabled(*kind))
            .collect()
    }
}

/// Node size = base + role tier + degree × degree_scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    pub base_node_size: u32,
    pub degree_scale: u32,
    /// Role title → size offset
    pub role_tiers: BTreeMap<String, u32>,
    pub default_tier: u32,
}

impl Default for SizingConfig {
    fn default() -> Self {
        let role_tiers = [
            ("실장", 20),
            ("head", 20),
            ("셀장", 16),
            ("lead", 16),
            ("셀원", 12),
            ("member", 12),
        ]
        .into_iter()
        .map(|(role, tier)| (role.to_string(), tier))
        .collect();

        Self {
            base_node_size: 16,
            degree_scale: 5,
            role_tiers,
            default_tier: 12,
        }
    }
}

impl SizingConfig {
    pub fn tier(&self, role: Option<&str>) -> u32 {
        role.and_then(|r| self.role_tiers.get(r.trim()))
            .copied()
            .unwrap_or(self.default_tier)
    }

    pub fn node_size(&self, role: Option<&str>, degree: usize) -> u32 {
        let degree = u32::try_from(degree).unwrap_or(u32::MAX);
        self.base_node_size
            .saturating_add(self.tier(role))
            .saturating_add(self.degree_scale.saturating_mul(degree))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Horizontal distance between departments
    pub column_spacing: i64,
    /// Vertical distance between cohorts
    pub row_spacing: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_spacing: 400,
            row_spacing: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_valid() {
        assert!(NetworkConfig::default().validate().is_ok());
        assert!(NetworkConfig::all_edges().validate().is_ok());
    }

    #[test]
    fn default_edge_kinds() {
        assert_eq!(
            EdgeToggles::default().enabled_kinds(),
            vec![
                EdgeKind::Department,
                EdgeKind::BirthYear,
                EdgeKind::Personality,
                EdgeKind::BloodType
            ]
        );
        assert_eq!(EdgeToggles::all().enabled_kinds().len(), 9);
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        let mut config = NetworkConfig::default();
        config.sizing.base_node_size = 4;
        assert!(config.validate().is_err());

        config.sizing.base_node_size = 60;
        config.sizing.degree_scale = 41;
        assert!(config.validate().is_err());

        config.sizing.degree_scale = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn node_size_adds_tier_and_degree() {
        let sizing = SizingConfig::default();
        assert_eq!(sizing.node_size(Some("실장"), 0), 36);
        assert_eq!(sizing.node_size(Some("셀원"), 3), 16 + 12 + 15);
        assert_eq!(sizing.node_size(Some("intern"), 1), 16 + 12 + 5);
        assert_eq!(sizing.node_size(None, 0), 28);
    }

    #[test]
    fn parses_partial_toml() {
        let config = NetworkConfig::from_toml(
            r#"
show_labels = false
physics = "barnes_hut"

[edges]
cohort = true

[sizing]
degree_scale = 8

[composition]
excluded_departments = ["Lab"]
"#,
        )
        .unwrap();
        assert!(!config.show_labels);
        assert_eq!(config.physics, PhysicsModel::BarnesHut);
        assert!(config.edges.cohort && config.edges.department);
        assert_eq!(config.sizing.degree_scale, 8);
        assert_eq!(config.sizing.base_node_size, 16);
        assert_eq!(config.composition.excluded_departments, vec!["Lab".to_string()]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(NetworkConfig::from_toml("colour = \"red\"\n").is_err());
        assert!(NetworkConfig::from_toml("[edges]\nshoe_size = true\n").is_err());
        assert!(NetworkConfig::from_toml("[sizing]\nbase_node_size = 100\n").is_err());
    }

    #[test]
    fn required_columns_follow_enabled_edges() {
        let config = NetworkConfig {
            edges: EdgeToggles::only([EdgeKind::Cohort, EdgeKind::JoinYear]),
            ..Default::default()
        };
        assert_eq!(
            config.required_attributes(),
            vec![Attribute::Name, Attribute::Cohort, Attribute::JoinYear]
        );
    }
}
