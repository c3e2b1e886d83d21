//! The closed set of catalog tables copied by the loader.
use std::fmt;


/// One of the five catalog tables.
///
/// Each variant knows its SQL name, the columns bound from the source and the
/// column list written to the target. Use [`Table::MIGRATION_ORDER`] to visit
/// the tables so that parents are always loaded before the links that
/// reference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Genre,
    Person,
    FilmWork,
    GenreFilmWork,
    PersonFilmWork,
}

impl Table {
    /// Parent entities first, then the link entities referencing them.
    pub const MIGRATION_ORDER: [Table; 5] = [
        Table::Person,
        Table::Genre,
        Table::FilmWork,
        Table::PersonFilmWork,
        Table::GenreFilmWork,
    ];

    /// Returns the table name shared by the source and target schemas.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Genre => "genre",
            Table::Person => "person",
            Table::FilmWork => "film_work",
            Table::GenreFilmWork => "genre_film_work",
            Table::PersonFilmWork => "person_film_work",
        }
    }

    /// Columns read from the source table. Any other column is ignored.
    pub fn source_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Genre => &["id", "name", "description"],
            Table::Person => &["id", "full_name"],
            Table::FilmWork => &["id", "title", "description", "creation_date", "rating", "type"],
            Table::GenreFilmWork => &["id", "genre_id", "film_work_id"],
            Table::PersonFilmWork => &["id", "person_id", "film_work_id", "role"],
        }
    }

    /// Insert column list of the target table, in bind order.
    pub fn target_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Genre => &["name", "description", "id", "created", "modified"],
            Table::Person => &["full_name", "id", "created", "modified"],
            Table::FilmWork => &[
                "title",
                "description",
                "creation_date",
                "type",
                "id",
                "rating",
                "created",
                "modified",
            ],
            Table::GenreFilmWork => &["genre_id", "film_work_id", "id", "created"],
            Table::PersonFilmWork => &["person_id", "film_work_id", "role", "id", "created"],
        }
    }

    /// Link tables only carry a `created` timestamp.
    pub fn has_modified(&self) -> bool {
        matches!(self, Table::Genre | Table::Person | Table::FilmWork)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
