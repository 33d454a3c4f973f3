use anyhow::{Context, Result};
use std::path::Path;
use teamnet_graph::{AssembledNetwork, AssemblyRequest, DocumentAssembler, NetworkConfig};
use teamnet_roster::{
    AxisFilter, ImageReport, ImageResolver, Person, PersonalityFilter, Roster, RosterError,
    RosterLoader,
};

/// State of one invocation, resolved from flags and config
pub(crate) struct RunContext {
    pub(crate) config: NetworkConfig,
    pub(crate) roster: Roster,
    pub(crate) filter: PersonalityFilter,
    pub(crate) search: Option<String>,
    pub(crate) images: Option<ImageReport>,
}

impl RunContext {
    pub(crate) fn assemble(&self) -> Result<AssembledNetwork> {
        let assembler = DocumentAssembler::new(&self.config)?;
        let request = AssemblyRequest {
            filter: self.filter.clone(),
            search: self.search.as_deref(),
            images: self.images.as_ref(),
        };
        let network = assembler
            .assemble(&self.roster, &request)
            .context("Failed to build team graph")?;
        Ok(network)
    }
}

/// Read the table, or the built-in sample when no path is given
pub(crate) fn load_roster(csv: Option<&Path>, config: &NetworkConfig) -> Result<Roster> {
    let loader = RosterLoader::new().require(config.required_attributes());
    match csv {
        Some(path) => loader
            .load_path(path)
            .with_context(|| format!("Failed to load roster {}", path.display())),
        None => {
            log::info!("No table given; using the built-in sample roster");
            loader.load_sample().context("Failed to load sample roster")
        }
    }
}

pub(crate) fn build_filter(
    energy: Option<&str>,
    decision: Option<&str>,
    exact: Option<&str>,
) -> Result<PersonalityFilter> {
    let mut filter = match exact {
        Some(code) => code.parse::<PersonalityFilter>()?,
        None => PersonalityFilter::default(),
    };
    filter.energy = energy.map(AxisFilter::energy).transpose()?;
    filter.decision = decision.map(AxisFilter::decision).transpose()?;
    Ok(filter)
}

pub(crate) fn resolve_images(dir: Option<&Path>, roster: &Roster) -> Option<ImageReport> {
    let dir = dir?;
    if !dir.is_dir() {
        log::warn!("Image directory {} does not exist", dir.display());
    }
    Some(ImageResolver::new(dir).resolve_all(roster))
}

/// Person by exact handle, else the first name/handle search hit
pub(crate) fn find_person<'a>(roster: &'a Roster, query: &str) -> Result<&'a Person> {
    if let Some(person) = roster.get(query.trim()) {
        return Ok(person);
    }
    roster
        .search(query)
        .into_iter()
        .next()
        .ok_or_else(|| RosterError::PersonNotFound(query.to_string()).into())
}
