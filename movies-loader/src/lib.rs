//! Movies Loader Library
//!
//! Copies the movie catalog from the legacy SQLite file into PostgreSQL:
//! configuration, dependency wiring, and the migration executor that drives
//! the source and target repositories table by table.

pub mod config;
pub mod errors;
pub mod migration;

pub use config::{Config, Dependencies};
pub use errors::MigrationError;
pub use migration::{MigrationExecutor, MigrationReport, VerificationReport};
