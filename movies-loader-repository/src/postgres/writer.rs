//! PostgreSQL implementation of the target repository.
//!
//! Writes go to the `content` schema. Each batch becomes one multi-row
//! `INSERT ... ON CONFLICT (id) DO NOTHING` built with `QueryBuilder`, inside a
//! transaction of its own that is committed before the call returns.
//!
//! `created`/`modified` are bound to the time of the write. Source timestamps,
//! if any, are not copied.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use movies_loader_shared::types::{RecordBatch, Table};
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};
use tracing::{debug, warn};

use crate::errors::WriteError;
use crate::TargetRepository;

/// Schema holding the catalog tables in the target database.
pub const TARGET_SCHEMA: &str = "content";

/// PostgreSQL target owning a single connection.
pub struct PostgresTarget {
    conn: PgConnection,
}

impl PostgresTarget {
    /// Opens a connection with the given options.
    pub async fn connect(options: &PgConnectOptions) -> Result<Self, WriteError> {
        let conn = PgConnection::connect_with(options)
            .await
            .map_err(WriteError::Connect)?;

        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: PgConnection) -> Self {
        Self { conn }
    }
}

fn qualified(table: Table) -> String {
    format!("{}.{}", TARGET_SCHEMA, table.name())
}

/// Builds the bulk insert for `batch`, binding `now` to every timestamp column.
fn insert_query(batch: &RecordBatch, now: DateTime<Utc>) -> QueryBuilder<'static, Postgres> {
    let table = batch.table();
    let columns = table
        .target_columns()
        .iter()
        .map(|column| format!("\"{}\"", column))
        .collect::<Vec<_>>()
        .join(", ");

    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        qualified(table),
        columns
    ));

    match batch {
        RecordBatch::FilmWork(films) => {
            builder.push_values(films, |mut b, film| {
                b.push_bind(film.title.clone())
                    .push_bind(film.description.clone())
                    .push_bind(film.creation_date)
                    .push_bind(film.film_type.as_str())
                    .push_bind(film.id)
                    .push_bind(film.rating)
                    .push_bind(now)
                    .push_bind(now);
            });
        }
        RecordBatch::Person(people) => {
            builder.push_values(people, |mut b, person| {
                b.push_bind(person.full_name.clone())
                    .push_bind(person.id)
                    .push_bind(now)
                    .push_bind(now);
            });
        }
        RecordBatch::Genre(genres) => {
            builder.push_values(genres, |mut b, genre| {
                b.push_bind(genre.name.clone())
                    .push_bind(genre.description.clone())
                    .push_bind(genre.id)
                    .push_bind(now)
                    .push_bind(now);
            });
        }
        RecordBatch::GenreFilmWork(links) => {
            builder.push_values(links, |mut b, link| {
                b.push_bind(link.genre_id)
                    .push_bind(link.film_work_id)
                    .push_bind(link.id)
                    .push_bind(now);
            });
        }
        RecordBatch::PersonFilmWork(links) => {
            builder.push_values(links, |mut b, link| {
                b.push_bind(link.person_id)
                    .push_bind(link.film_work_id)
                    .push_bind(link.role.map(|role| role.as_str()))
                    .push_bind(link.id)
                    .push_bind(now);
            });
        }
    }

    builder.push(" ON CONFLICT (id) DO NOTHING");
    builder
}

#[async_trait]
impl TargetRepository for PostgresTarget {
    async fn truncate(&mut self, table: Table) -> Result<(), WriteError> {
        let sql = format!("TRUNCATE TABLE {} CASCADE", qualified(table));
        let map_err = |source: sqlx::Error| WriteError::Truncate { table, source };

        let mut tx = self.conn.begin().await.map_err(map_err)?;
        if let Err(source) = sqlx::query(&sql).execute(&mut *tx).await {
            if let Err(e) = tx.rollback().await {
                warn!(table = %table, error = %e, "Rollback after failed truncate also failed");
            }
            return Err(map_err(source));
        }
        tx.commit().await.map_err(map_err)?;

        debug!(table = %table, "Truncated target table");
        Ok(())
    }

    async fn write_batch(&mut self, batch: &RecordBatch, offset: usize) -> Result<u64, WriteError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let table = batch.table();
        let map_err = |source: sqlx::Error| WriteError::Batch {
            table,
            offset,
            source,
        };

        let mut builder = insert_query(batch, Utc::now());
        let mut tx = self.conn.begin().await.map_err(map_err)?;
        let inserted = match builder.build().execute(&mut *tx).await {
            Ok(result) => result.rows_affected(),
            Err(source) => {
                if let Err(e) = tx.rollback().await {
                    warn!(table = %table, offset, error = %e, "Rollback after failed batch also failed");
                }
                return Err(map_err(source));
            }
        };
        tx.commit().await.map_err(map_err)?;

        let skipped = (batch.len() as u64).saturating_sub(inserted);
        if skipped > 0 {
            debug!(table = %table, offset, skipped, "Skipped rows with existing ids");
        }
        debug!(table = %table, offset, rows = inserted, "Committed target batch");
        Ok(inserted)
    }

    async fn count(&mut self, table: Table) -> Result<u64, WriteError> {
        let sql = format!("SELECT COUNT(*) FROM {}", qualified(table));
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&mut self.conn)
            .await
            .map_err(|source| WriteError::Count { table, source })?;

        Ok(count as u64)
    }

    async fn close(self) -> Result<(), WriteError> {
        self.conn.close().await.map_err(WriteError::Close)
    }
}
