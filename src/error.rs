use thiserror::Error;

/// Domain errors raised while building or querying a launch dataset.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    /// Dropdown index beyond the catalog (sites + the ALL entry).
    #[error("unknown launch site index {index} (catalog has {available} sites plus ALL)")]
    UnknownSite { index: usize, available: usize },

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: class must be 0 or 1, got '{value}'")]
    InvalidClass { row: usize, value: String },

    #[error("row {row}: payload mass '{value}' is not a finite number")]
    InvalidPayload { row: usize, value: String },

    #[error("dataset contains no launch records")]
    EmptyDataset,
}
