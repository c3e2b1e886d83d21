mod batch;
mod film_work;
mod genre;
mod genre_film_work;
mod person;
mod person_film_work;
mod table;

pub use batch::RecordBatch;
pub use film_work::{FilmType, FilmWork, MAX_RATING, MIN_RATING};
pub use genre::Genre;
pub use genre_film_work::GenreFilmWork;
pub use person::Person;
pub use person_film_work::{PersonFilmWork, PersonRole};
pub use table::Table;
