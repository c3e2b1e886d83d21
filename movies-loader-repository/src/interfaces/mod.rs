//! This module defines and re-exports the interfaces for the two storage sides
//! of the migration.
mod source;
mod target;

pub use source::SourceRepository;
pub use target::TargetRepository;
