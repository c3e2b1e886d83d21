use crate::types::{FilmWork, Genre, GenreFilmWork, Person, PersonFilmWork, Table};

/// A bounded group of records read from one table.
///
/// The variant fixes which table the records belong to, so a writer matching on
/// it is checked for exhaustiveness at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordBatch {
    Genre(Vec<Genre>),
    Person(Vec<Person>),
    FilmWork(Vec<FilmWork>),
    GenreFilmWork(Vec<GenreFilmWork>),
    PersonFilmWork(Vec<PersonFilmWork>),
}

impl RecordBatch {
    /// Returns an empty batch for `table`.
    pub fn empty(table: Table) -> Self {
        match table {
            Table::Genre => RecordBatch::Genre(Vec::new()),
            Table::Person => RecordBatch::Person(Vec::new()),
            Table::FilmWork => RecordBatch::FilmWork(Vec::new()),
            Table::GenreFilmWork => RecordBatch::GenreFilmWork(Vec::new()),
            Table::PersonFilmWork => RecordBatch::PersonFilmWork(Vec::new()),
        }
    }

    pub fn table(&self) -> Table {
        match self {
            RecordBatch::Genre(_) => Table::Genre,
            RecordBatch::Person(_) => Table::Person,
            RecordBatch::FilmWork(_) => Table::FilmWork,
            RecordBatch::GenreFilmWork(_) => Table::GenreFilmWork,
            RecordBatch::PersonFilmWork(_) => Table::PersonFilmWork,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RecordBatch::Genre(records) => records.len(),
            RecordBatch::Person(records) => records.len(),
            RecordBatch::FilmWork(records) => records.len(),
            RecordBatch::GenreFilmWork(records) => records.len(),
            RecordBatch::PersonFilmWork(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
