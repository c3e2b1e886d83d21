//! Migration module - drives the source and target repositories table by table.
mod executor;
mod report;

pub use executor::MigrationExecutor;
pub use report::{MigrationReport, TableCount, TableReport, VerificationReport};
