use crate::error::{Result, RosterError};
use crate::normalize::{is_filled, year_of};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Column a person record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Name,
    Handle,
    Department,
    Role,
    JobFamily,
    BirthYear,
    JoinYear,
    Personality,
    BloodType,
    Cohort,
    Spinoff,
    Gender,
    Image,
}

impl Attribute {
    pub const ALL: [Self; 13] = [
        Self::Name,
        Self::Handle,
        Self::Department,
        Self::Role,
        Self::JobFamily,
        Self::BirthYear,
        Self::JoinYear,
        Self::Personality,
        Self::BloodType,
        Self::Cohort,
        Self::Spinoff,
        Self::Gender,
        Self::Image,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Handle => "handle",
            Self::Department => "department",
            Self::Role => "role",
            Self::JobFamily => "job_family",
            Self::BirthYear => "birth_year",
            Self::JoinYear => "join_year",
            Self::Personality => "personality",
            Self::BloodType => "blood_type",
            Self::Cohort => "cohort",
            Self::Spinoff => "spinoff",
            Self::Gender => "gender",
            Self::Image => "image",
        }
    }

    /// Header spellings accepted for this column (compared after trimming and ASCII case folding)
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name", "이름"],
            Self::Handle => &["handle", "ldap"],
            Self::Department => &["department", "dept", "소속"],
            Self::Role => &["role", "position", "직위"],
            Self::JobFamily => &["job_family", "job family", "직군"],
            Self::BirthYear => &["birth_year", "birth year", "탄생년도"],
            Self::JoinYear => &["join_year", "join year", "입사년도"],
            Self::Personality => &["personality", "mbti"],
            Self::BloodType => &["blood_type", "blood type", "혈액형"],
            Self::Cohort => &["cohort", "동기 여부", "동기여부"],
            Self::Spinoff => &["spinoff", "spin-off", "카카오분사"],
            Self::Gender => &["gender", "성별"],
            Self::Image => &["image"],
        }
    }

    /// Resolve a header cell to an attribute
    pub fn from_header(header: &str) -> Option<Self> {
        let folded = header.trim().trim_start_matches('\u{feff}').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|attr| attr.aliases().iter().any(|alias| *alias == folded))
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One row of the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// 1-based data row (header excluded)
    pub row: usize,

    /// Unique identity: the handle column, or the name when no handle is given
    pub handle: String,

    /// Trimmed cell values of the recognized columns
    values: BTreeMap<Attribute, String>,

    /// Unrecognized columns in header order
    pub extras: Vec<(String, String)>,
}

impl Person {
    /// Build a person from trimmed cell values.
    ///
    /// Returns `None` when neither a handle nor a name is filled.
    pub fn from_values(row: usize, values: BTreeMap<Attribute, String>) -> Option<Self> {
        let pick = |attr: Attribute| {
            values
                .get(&attr)
                .map(|v| v.trim())
                .filter(|v| is_filled(Some(v)))
                .map(str::to_string)
        };
        let handle = pick(Attribute::Handle).or_else(|| pick(Attribute::Name))?;

        Some(Self {
            row,
            handle,
            values,
            extras: Vec::new(),
        })
    }

    /// Test and fixture helper: person with a handle and the given cells
    pub fn with_values<I, S>(row: usize, handle: &str, cells: I) -> Self
    where
        I: IntoIterator<Item = (Attribute, S)>,
        S: Into<String>,
    {
        let mut values: BTreeMap<Attribute, String> = cells
            .into_iter()
            .map(|(attr, v)| (attr, v.into()))
            .collect();
        values.insert(Attribute::Handle, handle.to_string());
        Self {
            row,
            handle: handle.to_string(),
            values,
            extras: Vec::new(),
        }
    }

    /// Raw trimmed cell, present even when it holds a missing-value sentinel
    pub fn raw(&self, attr: Attribute) -> Option<&str> {
        self.values.get(&attr).map(String::as_str)
    }

    /// Filled cell value
    pub fn value(&self, attr: Attribute) -> Option<&str> {
        self.raw(attr).filter(|v| is_filled(Some(v)))
    }

    /// Display name, falling back to the handle
    pub fn name(&self) -> &str {
        self.value(Attribute::Name).unwrap_or(&self.handle)
    }

    pub fn department(&self) -> Option<&str> {
        self.value(Attribute::Department)
    }

    pub fn role(&self) -> Option<&str> {
        self.value(Attribute::Role)
    }

    pub fn cohort(&self) -> Option<&str> {
        self.value(Attribute::Cohort)
    }

    pub fn personality(&self) -> Option<&str> {
        self.value(Attribute::Personality)
    }

    pub fn birth_year(&self) -> Option<i32> {
        year_of(self.raw(Attribute::BirthYear))
    }

    pub fn join_year(&self) -> Option<i32> {
        year_of(self.raw(Attribute::JoinYear))
    }

    /// `name (handle)` label used in listings
    pub fn label(&self) -> String {
        match self.value(Attribute::Handle) {
            Some(handle) => format!("{} ({handle})", self.name()),
            None => self.name().to_string(),
        }
    }
}

/// Loaded table of people; immutable after load
#[derive(Debug, Clone, Default)]
pub struct Roster {
    columns: Vec<Attribute>,
    people: Vec<Person>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Assemble a roster, enforcing handle uniqueness
    pub fn new(columns: Vec<Attribute>, people: Vec<Person>) -> Result<Self> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(people.len());
        for (pos, person) in people.iter().enumerate() {
            if let Some(&first) = index.get(&person.handle) {
                return Err(RosterError::DuplicateHandle {
                    handle: person.handle.clone(),
                    first_row: people[first].row,
                    row: person.row,
                });
            }
            index.insert(person.handle.clone(), pos);
        }

        Ok(Self {
            columns,
            people,
            index,
        })
    }

    /// Columns recognized in the source header
    pub fn columns(&self) -> &[Attribute] {
        &self.columns
    }

    pub fn has_column(&self, attr: Attribute) -> bool {
        self.columns.contains(&attr)
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Find person by handle
    pub fn get(&self, handle: &str) -> Option<&Person> {
        self.index.get(handle).map(|&pos| &self.people[pos])
    }

    /// Find person by handle, failing when absent
    pub fn require(&self, handle: &str) -> Result<&Person> {
        self.get(handle)
            .ok_or_else(|| RosterError::PersonNotFound(handle.to_string()))
    }

    /// Case-insensitive substring search over names and handles, in table order
    pub fn search(&self, query: &str) -> Vec<&Person> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.people
            .iter()
            .filter(|p| {
                p.name().to_lowercase().contains(&needle)
                    || p.handle.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Keep the people matching `keep`, preserving order and columns
    pub fn retain<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Person) -> bool,
    {
        let people: Vec<Person> = self.people.iter().filter(|p| keep(p)).cloned().collect();
        let index = people
            .iter()
            .enumerate()
            .map(|(pos, p)| (p.handle.clone(), pos))
            .collect();
        Self {
            columns: self.columns.clone(),
            people,
            index,
        }
    }
}
