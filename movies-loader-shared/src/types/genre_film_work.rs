use uuid::Uuid;

use crate::errors::{required, RecordError};

/// Link between a film work and one of its genres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreFilmWork {
    pub id: Uuid,
    pub genre_id: Uuid,
    pub film_work_id: Uuid,
}

impl GenreFilmWork {
    pub fn new(
        id: Option<Uuid>,
        genre_id: Option<Uuid>,
        film_work_id: Option<Uuid>,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            genre_id: required("genre_id", genre_id)?,
            film_work_id: required("film_work_id", film_work_id)?,
        })
    }
}
