use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::errors::{required, RecordError};

/// Role a person plays in a film work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonRole {
    Actor,
    Director,
    Screenwriter,
    Producer,
    Operator,
    Composer,
}

impl PersonRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonRole::Actor => "actor",
            PersonRole::Director => "director",
            PersonRole::Screenwriter => "screenwriter",
            PersonRole::Producer => "producer",
            PersonRole::Operator => "operator",
            PersonRole::Composer => "composer",
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonRole {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actor" => Ok(PersonRole::Actor),
            "director" => Ok(PersonRole::Director),
            "screenwriter" => Ok(PersonRole::Screenwriter),
            "producer" => Ok(PersonRole::Producer),
            "operator" => Ok(PersonRole::Operator),
            "composer" => Ok(PersonRole::Composer),
            other => Err(RecordError::InvalidValue {
                field: "role",
                reason: format!("unknown person role '{}'", other),
            }),
        }
    }
}

/// Link between a person and a film work, qualified by role.
///
/// The role is nullable in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFilmWork {
    pub id: Uuid,
    pub person_id: Uuid,
    pub film_work_id: Uuid,
    pub role: Option<PersonRole>,
}

impl PersonFilmWork {
    pub fn new(
        id: Option<Uuid>,
        person_id: Option<Uuid>,
        film_work_id: Option<Uuid>,
        role: Option<PersonRole>,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            person_id: required("person_id", person_id)?,
            film_work_id: required("film_work_id", film_work_id)?,
            role,
        })
    }
}
