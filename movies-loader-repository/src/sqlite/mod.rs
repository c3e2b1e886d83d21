//! SQLite module - read-only access to the embedded catalog database.
mod reader;
mod rows;

pub use reader::SqliteSource;
