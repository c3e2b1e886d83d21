//! Error types for the Movies Loader application.
//! Consolidates the errors of the configuration, source and target layers into
//! the single error surfaced by a migration run.
use movies_loader_repository::{ExtractError, WriteError};
use movies_loader_shared::types::Table;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

impl MigrationError {
    /// Table the run failed on, when the failure is tied to one.
    pub fn table(&self) -> Option<Table> {
        match self {
            MigrationError::Config(_) => None,
            MigrationError::Extract(e) => e.table(),
            MigrationError::Write(e) => e.table(),
        }
    }

    /// Short name of the phase that failed, for diagnostics.
    pub fn phase(&self) -> &'static str {
        match self {
            MigrationError::Config(_) => "configuration",
            MigrationError::Extract(_) => "extract",
            MigrationError::Write(_) => "load",
        }
    }
}
