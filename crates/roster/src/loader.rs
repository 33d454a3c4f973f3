use crate::error::{Result, RosterError};
use crate::sample::SAMPLE_ROSTER_CSV;
use crate::types::{Attribute, Person, Roster};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a people table into a [`Roster`]
///
/// Headers and cells are trimmed, headers are matched against the
/// [`Attribute`] aliases, and unrecognized columns are kept as extras.
#[derive(Debug, Clone)]
pub struct RosterLoader {
    required: Vec<Attribute>,
}

impl Default for RosterLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterLoader {
    /// Loader requiring only the `name` column
    pub fn new() -> Self {
        Self {
            required: vec![Attribute::Name],
        }
    }

    /// Add columns that must be present in the header
    pub fn require<I>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        for attr in attrs {
            if !self.required.contains(&attr) {
                self.required.push(attr);
            }
        }
        self
    }

    pub fn required(&self) -> &[Attribute] {
        &self.required
    }

    /// Load a CSV file
    pub fn load_path(&self, path: &Path) -> Result<Roster> {
        let file = File::open(path)?;
        log::debug!("Loading roster from {}", path.display());
        self.load_reader(file)
    }

    /// Load the built-in sample roster
    pub fn load_sample(&self) -> Result<Roster> {
        log::debug!("Loading built-in sample roster");
        self.load_str(SAMPLE_ROSTER_CSV)
    }

    pub fn load_str(&self, text: &str) -> Result<Roster> {
        self.load_reader(text.as_bytes())
    }

    /// Load CSV from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Roster> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.is_empty() {
            return Err(RosterError::InvalidHeader("empty header row".to_string()));
        }

        // Column position -> attribute; the first header claiming an attribute wins.
        let mut mapped: Vec<(usize, Attribute)> = Vec::new();
        let mut extras: Vec<(usize, String)> = Vec::new();
        for (pos, header) in headers.iter().enumerate() {
            let header = header.trim().trim_start_matches('\u{feff}');
            match Attribute::from_header(header) {
                Some(attr) if !mapped.iter().any(|(_, a)| *a == attr) => mapped.push((pos, attr)),
                _ => extras.push((pos, header.to_string())),
            }
        }

        let columns: Vec<Attribute> = mapped.iter().map(|(_, attr)| *attr).collect();
        let missing: Vec<&str> = self
            .required
            .iter()
            .filter(|attr| !columns.contains(attr))
            .map(|attr| attr.key())
            .collect();
        if !missing.is_empty() {
            return Err(RosterError::missing_columns(missing));
        }

        let mut people = Vec::new();
        let mut skipped = 0usize;
        for (offset, record) in csv_reader.records().enumerate() {
            let row = offset + 1;
            let record = match record {
                Ok(record) => record,
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    log::warn!("Skipping malformed row {row}: {err}");
                    skipped += 1;
                    continue;
                }
            };

            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            let values: BTreeMap<Attribute, String> = mapped
                .iter()
                .map(|&(pos, attr)| (attr, record.get(pos).unwrap_or("").trim().to_string()))
                .collect();

            let Some(mut person) = Person::from_values(row, values) else {
                log::warn!("Skipping row {row}: neither name nor handle is filled");
                skipped += 1;
                continue;
            };
            person.extras = extras
                .iter()
                .map(|(pos, header)| {
                    (
                        header.clone(),
                        record.get(*pos).unwrap_or("").trim().to_string(),
                    )
                })
                .collect();
            people.push(person);
        }

        let roster = Roster::new(columns, people)?;
        log::info!(
            "Loaded roster: {} people, {} recognized columns, {} skipped rows",
            roster.len(),
            roster.columns().len(),
            skipped
        );
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_sample_roster() {
        let roster = RosterLoader::new().load_sample().unwrap();
        assert_eq!(roster.len(), 20);
        assert!(roster.has_column(Attribute::Personality));
        assert!(roster.has_column(Attribute::Image));

        let carl = roster.get("carl.lee").unwrap();
        assert_eq!(carl.name(), "이창욱");
        assert_eq!(carl.join_year(), Some(2021));
        assert_eq!(carl.cohort(), Some("2021 공채 동기"));

        let walt = roster.get("walt.kim").unwrap();
        assert_eq!(walt.personality(), None);
    }

    #[test]
    fn keeps_unrecognized_columns_as_extras() {
        let roster = RosterLoader::new().load_sample().unwrap();
        let person = roster.get("steven.song").unwrap();
        assert!(person
            .extras
            .iter()
            .any(|(header, value)| header == "거주지" && value == "경기도"));
    }

    #[test]
    fn trims_headers_and_cells() {
        let csv = " name , handle ,  department \n  Ann , ann.k ,  BI  \n";
        let roster = RosterLoader::new()
            .require([Attribute::Department])
            .load_str(csv)
            .unwrap();
        let ann = roster.get("ann.k").unwrap();
        assert_eq!(ann.name(), "Ann");
        assert_eq!(ann.department(), Some("BI"));
    }

    #[test]
    fn reports_every_missing_required_column() {
        let err = RosterLoader::new()
            .require([Attribute::Department, Attribute::BloodType])
            .load_str("name,role\nAnn,lead\n")
            .unwrap_err();
        match err {
            RosterError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["department".to_string(), "blood_type".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_rows_are_treated_as_absent_cells() {
        let roster = RosterLoader::new()
            .load_str("name,handle,department,personality\nAnn,ann\nBo,bo,BI,INTP\n")
            .unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("ann").unwrap().department(), None);
        assert_eq!(roster.get("bo").unwrap().personality(), Some("INTP"));
    }

    #[test]
    fn skips_rows_without_identity_and_blank_lines() {
        let roster = RosterLoader::new()
            .load_str("name,handle,department\n,,BI\n,,\nCy,,BI\n")
            .unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.people()[0].handle, "Cy");
        assert_eq!(roster.people()[0].row, 3);
    }

    #[test]
    fn first_header_claiming_a_column_wins() {
        let roster = RosterLoader::new()
            .load_str("name,Image,image\nAnn,a.png,b.png\n")
            .unwrap();
        let ann = roster.get("Ann").unwrap();
        assert_eq!(ann.value(Attribute::Image), Some("a.png"));
        assert_eq!(ann.extras, vec![("image".to_string(), "b.png".to_string())]);
    }
}
