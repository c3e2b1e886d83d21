use movies_loader_shared::types::Table;
use movies_loader_shared::RecordError;
use thiserror::Error;

/// Represents errors raised while reading the SQLite source.
///
/// Every variant raised after the database is open names the table being read.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to open source database {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Source table {table} does not exist")]
    MissingTable { table: Table },

    #[error("Source table {table} has no column {column}")]
    MissingColumn { table: Table, column: &'static str },

    #[error("Malformed row in {table} at offset {offset}: {source}")]
    Mapping {
        table: Table,
        offset: usize,
        #[source]
        source: MappingError,
    },

    #[error("Database error while reading {table}: {source}")]
    Database {
        table: Table,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to close source database: {0}")]
    Close(#[source] sqlx::Error),
}

impl ExtractError {
    /// Table the failure happened on, if it is tied to one.
    pub fn table(&self) -> Option<Table> {
        match self {
            ExtractError::MissingTable { table }
            | ExtractError::MissingColumn { table, .. }
            | ExtractError::Mapping { table, .. }
            | ExtractError::Database { table, .. } => Some(*table),
            ExtractError::Open { .. } | ExtractError::Close(_) => None,
        }
    }
}

/// Represents a single source row that could not be bound to its record type.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("column decode failed: {0}")]
    Decode(#[from] sqlx::Error),

    #[error("column {column} holds an invalid UUID '{value}'")]
    InvalidUuid { column: &'static str, value: String },

    #[error("column {column} holds an invalid date '{value}'")]
    InvalidDate { column: &'static str, value: String },

    #[error(transparent)]
    Record(#[from] RecordError),
}
