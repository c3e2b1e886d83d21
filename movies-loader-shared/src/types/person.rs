use uuid::Uuid;

use crate::errors::{required, RecordError};

/// A person credited on one or more film works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Uuid,
    pub full_name: String,
}

impl Person {
    pub fn new(id: Option<Uuid>, full_name: Option<String>) -> Result<Self, RecordError> {
        Ok(Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            full_name: required("full_name", full_name)?,
        })
    }
}
