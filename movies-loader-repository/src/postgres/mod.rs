//! PostgreSQL module - truncate-and-reload writes into the `content` schema.
mod writer;

pub use writer::{PostgresTarget, TARGET_SCHEMA};
