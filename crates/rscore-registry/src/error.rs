//! Registry load errors. Every variant is a startup configuration fault.

use rscore_core::ValidationError;

/// Errors while loading the location table.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The source file could not be opened.
    #[error("failed to open location table {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// The CSV stream itself is malformed (bad quoting, ragged row, IO).
    #[error("malformed CSV at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("location table is missing column {column:?} (found: {available:?})")]
    MissingColumn {
        column: &'static str,
        available: Vec<String>,
    },

    /// A cell could not be converted to its typed field.
    #[error("invalid row at line {line}: {source}")]
    InvalidRow {
        line: u64,
        #[source]
        source: ValidationError,
    },

    /// The table has a header but no data rows.
    #[error("location table contains no rows")]
    Empty,
}
