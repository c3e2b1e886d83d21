//! # Movies Loader Repository
//! This crate provides the two storage sides of the catalog migration: a
//! read-only SQLite source and a PostgreSQL target. Both are exposed through
//! the `SourceRepository` and `TargetRepository` traits so the orchestrator can
//! be driven by any implementation.
pub mod cursor;
pub mod errors;
pub mod interfaces;
pub mod postgres;
pub mod sqlite;

pub use cursor::BatchCursor;
pub use errors::{ExtractError, MappingError, WriteError};
pub use interfaces::{SourceRepository, TargetRepository};
pub use postgres::PostgresTarget;
pub use sqlite::SqliteSource;
