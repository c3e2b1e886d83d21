use movies_loader_shared::types::Table;
use thiserror::Error;

/// Represents errors raised while writing to the PostgreSQL target.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to connect to target database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to truncate {table}: {source}")]
    Truncate {
        table: Table,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to write {table} batch at offset {offset}: {source}")]
    Batch {
        table: Table,
        offset: usize,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to count rows of {table}: {source}")]
    Count {
        table: Table,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to close target database: {0}")]
    Close(#[source] sqlx::Error),
}

impl WriteError {
    pub fn table(&self) -> Option<Table> {
        match self {
            WriteError::Truncate { table, .. }
            | WriteError::Batch { table, .. }
            | WriteError::Count { table, .. } => Some(*table),
            WriteError::Connect(_) | WriteError::Close(_) => None,
        }
    }
}
