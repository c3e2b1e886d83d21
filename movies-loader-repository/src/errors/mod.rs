//! Error types for the movies loader repository.
//! Consolidates and re-exports the errors raised by the source and target sides.
mod extract;
mod write;

pub use extract::{ExtractError, MappingError};
pub use write::WriteError;
