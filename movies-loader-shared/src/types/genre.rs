use uuid::Uuid;

use crate::errors::{required, RecordError};

/// A catalog genre, e.g. "Drama".
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl Genre {
    /// Builds a genre, generating a fresh id when the source carries none.
    pub fn new(
        id: Option<Uuid>,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            name: required("name", name)?,
            description,
        })
    }
}
