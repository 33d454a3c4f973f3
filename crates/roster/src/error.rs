use thiserror::Error;

/// Result type for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors that can occur while loading or querying a roster
#[derive(Error, Debug)]
pub enum RosterError {
    /// The table lacks columns the run depends on
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Two rows resolved to the same handle
    #[error("Duplicate handle '{handle}' (rows {first_row} and {row})")]
    DuplicateHandle {
        handle: String,
        first_row: usize,
        row: usize,
    },

    /// The header row could not be read
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// CSV decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Filter value not understood
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Lookup by handle failed
    #[error("Person not found: {0}")]
    PersonNotFound(String),
}

impl RosterError {
    /// Create a missing columns error
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns(columns.into_iter().map(Into::into).collect())
    }

    /// Create an invalid filter error
    pub fn invalid_filter(msg: impl Into<String>) -> Self {
        Self::InvalidFilter(msg.into())
    }
}
