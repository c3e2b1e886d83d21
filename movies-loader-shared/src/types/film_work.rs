use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{required, RecordError};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Kind of film work. Stored as text (`movie`, `tv_show`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilmType {
    #[default]
    Movie,
    TvShow,
}

impl FilmType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilmType::Movie => "movie",
            FilmType::TvShow => "tv_show",
        }
    }
}

impl fmt::Display for FilmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilmType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(FilmType::Movie),
            "tv_show" => Ok(FilmType::TvShow),
            other => Err(RecordError::InvalidValue {
                field: "type",
                reason: format!("unknown film type '{}'", other),
            }),
        }
    }
}

/// A movie or TV show, the central catalog entity.
///
/// Fields mirror the stored columns: a NULL rating stays `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmWork {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub creation_date: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub film_type: FilmType,
}

impl FilmWork {
    /// Builds a film work from its column values.
    ///
    /// `title` and `film_type` are required. A rating, when present, must be a
    /// finite value in `0.0..=10.0`.
    pub fn new(
        id: Option<Uuid>,
        title: Option<String>,
        description: Option<String>,
        creation_date: Option<NaiveDate>,
        rating: Option<f64>,
        film_type: Option<FilmType>,
    ) -> Result<Self, RecordError> {
        let title = required("title", title)?;
        let film_type = required("type", film_type)?;
        if let Some(rating) = rating {
            if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(RecordError::InvalidValue {
                    field: "rating",
                    reason: format!("{} is outside {}..={}", rating, MIN_RATING, MAX_RATING),
                });
            }
        }

        Ok(Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            title,
            description,
            creation_date,
            rating,
            film_type,
        })
    }

    /// A new catalog entry with only a title: fresh id, rating `0.0`, type `movie`.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            creation_date: None,
            rating: Some(MIN_RATING),
            film_type: FilmType::default(),
        }
    }
}
