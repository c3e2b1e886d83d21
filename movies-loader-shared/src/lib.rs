//! # Movies Loader Shared
//! This crate defines the record model shared by the movies loader crates:
//! one value type per catalog table, the closed set of tables, and the
//! batch type that carries records from the source reader to the target writer.
pub mod errors;
pub mod types;

pub use errors::RecordError;
