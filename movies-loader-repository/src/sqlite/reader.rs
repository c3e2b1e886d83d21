//! SQLite implementation of the source repository.
//!
//! Opens the catalog file read-only and pages through each table with
//! `LIMIT/OFFSET`, selecting only the columns the record types need.
use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use movies_loader_shared::types::{RecordBatch, Table};
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Connection, Row, SqliteConnection};
use tracing::debug;

use super::rows;
use crate::errors::{ExtractError, MappingError};
use crate::SourceRepository;

/// Read-only SQLite source.
///
/// Each table's columns are checked once, before its first read, so schema
/// drift fails the run before any row is mapped.
pub struct SqliteSource {
    conn: SqliteConnection,
    verified: HashSet<Table>,
}

impl SqliteSource {
    /// Opens the database file at `path` without creating or modifying it.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|source| ExtractError::Open {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: SqliteConnection) -> Self {
        Self {
            conn,
            verified: HashSet::new(),
        }
    }

    /// Fails when `table` is missing or lacks one of its expected columns.
    async fn verify_columns(&mut self, table: Table) -> Result<(), ExtractError> {
        if self.verified.contains(&table) {
            return Ok(());
        }

        let pragma = format!("PRAGMA table_info(\"{}\")", table.name());
        let rows = sqlx::query(&pragma)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|source| ExtractError::Database { table, source })?;

        if rows.is_empty() {
            return Err(ExtractError::MissingTable { table });
        }

        let present = rows
            .iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<Result<HashSet<_>, _>>()
            .map_err(|source| ExtractError::Database { table, source })?;

        if let Some(column) = table
            .source_columns()
            .iter()
            .copied()
            .find(|column| !present.contains(*column))
        {
            return Err(ExtractError::MissingColumn { table, column });
        }

        debug!(table = %table, columns = present.len(), "Verified source columns");
        self.verified.insert(table);
        Ok(())
    }
}

fn select_sql(table: Table) -> String {
    let columns = table
        .source_columns()
        .iter()
        .map(|column| format!("\"{}\"", column))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "SELECT {} FROM \"{}\" LIMIT ? OFFSET ?",
        columns,
        table.name()
    )
}

fn map_rows<T>(
    rows: &[SqliteRow],
    offset: usize,
    table: Table,
    bind: fn(&SqliteRow) -> Result<T, MappingError>,
) -> Result<Vec<T>, ExtractError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            bind(row).map_err(|source| ExtractError::Mapping {
                table,
                offset: offset + i,
                source,
            })
        })
        .collect()
}

#[async_trait]
impl SourceRepository for SqliteSource {
    async fn read_batch(
        &mut self,
        table: Table,
        offset: usize,
        limit: usize,
    ) -> Result<RecordBatch, ExtractError> {
        self.verify_columns(table).await?;

        let sql = select_sql(table);
        let fetched = sqlx::query(&sql)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|source| ExtractError::Database { table, source })?;

        let batch = match table {
            Table::Genre => RecordBatch::Genre(map_rows(&fetched, offset, table, rows::genre)?),
            Table::Person => RecordBatch::Person(map_rows(&fetched, offset, table, rows::person)?),
            Table::FilmWork => {
                RecordBatch::FilmWork(map_rows(&fetched, offset, table, rows::film_work)?)
            }
            Table::GenreFilmWork => {
                RecordBatch::GenreFilmWork(map_rows(&fetched, offset, table, rows::genre_film_work)?)
            }
            Table::PersonFilmWork => RecordBatch::PersonFilmWork(map_rows(
                &fetched,
                offset,
                table,
                rows::person_film_work,
            )?),
        };

        debug!(table = %table, offset, rows = batch.len(), "Read source batch");
        Ok(batch)
    }

    async fn count(&mut self, table: Table) -> Result<u64, ExtractError> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.name());
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&mut self.conn)
            .await
            .map_err(|source| ExtractError::Database { table, source })?;

        Ok(count as u64)
    }

    async fn close(self) -> Result<(), ExtractError> {
        self.conn.close().await.map_err(ExtractError::Close)
    }
}
