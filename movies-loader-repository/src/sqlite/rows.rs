//! Column-to-field binding for each record type.
//!
//! Columns are looked up by name, so the select list order does not matter.
use chrono::{NaiveDate, NaiveDateTime};
use movies_loader_shared::types::{
    FilmType, FilmWork, Genre, GenreFilmWork, Person, PersonFilmWork, PersonRole,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::errors::MappingError;

fn text(row: &SqliteRow, column: &'static str) -> Result<Option<String>, MappingError> {
    Ok(row.try_get::<Option<String>, _>(column)?)
}

fn uuid(row: &SqliteRow, column: &'static str) -> Result<Option<Uuid>, MappingError> {
    text(row, column)?
        .map(|value| {
            Uuid::parse_str(value.trim())
                .map_err(|_| MappingError::InvalidUuid { column, value })
        })
        .transpose()
}

/// Reads a `DATE` column stored as text.
///
/// The legacy file holds empty strings where no date was entered; those read
/// as `None`, the same as NULL, and are written to the target as NULL.
fn date(row: &SqliteRow, column: &'static str) -> Result<Option<NaiveDate>, MappingError> {
    let Some(value) = text(row, column)? else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date())
        })
        .map(Some)
        .map_err(|_| MappingError::InvalidDate { column, value })
}

pub(crate) fn genre(row: &SqliteRow) -> Result<Genre, MappingError> {
    Ok(Genre::new(
        uuid(row, "id")?,
        text(row, "name")?,
        text(row, "description")?,
    )?)
}

pub(crate) fn person(row: &SqliteRow) -> Result<Person, MappingError> {
    Ok(Person::new(uuid(row, "id")?, text(row, "full_name")?)?)
}

pub(crate) fn film_work(row: &SqliteRow) -> Result<FilmWork, MappingError> {
    let film_type = text(row, "type")?
        .map(|value| value.parse::<FilmType>())
        .transpose()?;

    Ok(FilmWork::new(
        uuid(row, "id")?,
        text(row, "title")?,
        text(row, "description")?,
        date(row, "creation_date")?,
        row.try_get::<Option<f64>, _>("rating")?,
        film_type,
    )?)
}

pub(crate) fn genre_film_work(row: &SqliteRow) -> Result<GenreFilmWork, MappingError> {
    Ok(GenreFilmWork::new(
        uuid(row, "id")?,
        uuid(row, "genre_id")?,
        uuid(row, "film_work_id")?,
    )?)
}

pub(crate) fn person_film_work(row: &SqliteRow) -> Result<PersonFilmWork, MappingError> {
    let role = text(row, "role")?
        .map(|value| value.parse::<PersonRole>())
        .transpose()?;

    Ok(PersonFilmWork::new(
        uuid(row, "id")?,
        uuid(row, "person_id")?,
        uuid(row, "film_work_id")?,
        role,
    )?)
}
