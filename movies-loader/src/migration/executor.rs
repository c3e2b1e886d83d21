//! Migration executor - orchestrates the copy from source to target.
//!
//! Tables are visited in `Table::MIGRATION_ORDER`. For each table the target is
//! truncated first, then batches are read and written one at a time until the
//! source table is exhausted. The first error stops the run.
use std::time::Instant;

use movies_loader_repository::{BatchCursor, SourceRepository, TargetRepository};
use movies_loader_shared::types::Table;
use tracing::{debug, info, info_span, warn, Instrument, Span};

use crate::errors::MigrationError;
use crate::migration::{MigrationReport, TableCount, TableReport, VerificationReport};

/// Migration executor that coordinates one truncate-and-reload run.
///
/// Owns both repositories for the duration of the run; [`MigrationExecutor::run`]
/// closes them on every exit path.
pub struct MigrationExecutor<S, T> {
    source: S,
    target: T,
    batch_size: usize,
    span: Span,
}

impl<S, T> MigrationExecutor<S, T>
where
    S: SourceRepository,
    T: TargetRepository,
{
    /// Creates a new executor.
    ///
    /// # Arguments
    ///
    /// * `source` - Repository the records are read from
    /// * `target` - Repository the records are written to
    /// * `batch_size` - Rows per read/write round-trip
    /// * `span` - Parent span for every event emitted during the run
    pub fn new(source: S, target: T, batch_size: usize, span: Span) -> Self {
        Self {
            source,
            target,
            batch_size: batch_size.max(1),
            span,
        }
    }

    /// Executes the migration, optionally verifies row counts, and closes both
    /// repositories whatever the outcome.
    ///
    /// An error from the migration itself takes precedence over an error raised
    /// while closing.
    pub async fn run(mut self, verify: bool) -> Result<MigrationReport, MigrationError> {
        let span = self.span.clone();

        async move {
            info!(batch_size = self.batch_size, "Starting catalog migration");

            let outcome = match self.execute().await {
                Ok(report) => {
                    report.log();
                    if verify {
                        self.verify().await.map(|verification| {
                            verification.log();
                            report
                        })
                    } else {
                        Ok(report)
                    }
                }
                Err(e) => Err(e),
            };

            let closed = self.finish().await;
            match (outcome, closed) {
                (Ok(report), Ok(())) => Ok(report),
                (Ok(_), Err(close_err)) => Err(close_err),
                (Err(e), Ok(())) => Err(e),
                (Err(e), Err(close_err)) => {
                    warn!(error = %close_err, "Failed to close databases after error");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Copies every table in migration order.
    pub async fn execute(&mut self) -> Result<MigrationReport, MigrationError> {
        let started = Instant::now();
        let mut report = MigrationReport::default();

        for table in Table::MIGRATION_ORDER {
            let span = info_span!(parent: &self.span, "table", table = %table);
            let table_report = self.copy_table(table).instrument(span).await?;
            report.tables.push(table_report);
        }

        report.elapsed = started.elapsed();
        Ok(report)
    }

    async fn copy_table(&mut self, table: Table) -> Result<TableReport, MigrationError> {
        let mut report = TableReport::new(table);

        self.target.truncate(table).await?;
        debug!("Cleared target table");

        let mut cursor = BatchCursor::new(table, self.batch_size);
        loop {
            let offset = cursor.offset();
            let Some(batch) = cursor.next_batch(&mut self.source).await? else {
                break;
            };

            let written = self.target.write_batch(&batch, offset).await?;
            report.rows_read += batch.len() as u64;
            report.rows_written += written;
            report.batches += 1;
            debug!(offset, rows = batch.len(), written, "Copied batch");
        }

        info!(
            rows = report.rows_written,
            batches = report.batches,
            "✓ Copied table"
        );
        Ok(report)
    }

    /// Compares per-table row counts between source and target.
    pub async fn verify(&mut self) -> Result<VerificationReport, MigrationError> {
        let mut report = VerificationReport::default();

        for table in Table::MIGRATION_ORDER {
            let source = self.source.count(table).await?;
            let target = self.target.count(table).await?;
            report.tables.push(TableCount {
                table,
                source,
                target,
            });
        }

        Ok(report)
    }

    /// Closes both repositories, reporting the first failure.
    pub async fn finish(self) -> Result<(), MigrationError> {
        let source = self.source.close().await;
        let target = self.target.close().await;
        source?;
        target?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    use movies_loader_repository::{ExtractError, WriteError};
    use movies_loader_shared::types::{
        FilmType, FilmWork, Genre, GenreFilmWork, Person, PersonFilmWork, PersonRole,
        RecordBatch,
    };
    use uuid::Uuid;

    use super::*;

    type Journal = Arc<Mutex<Vec<String>>>;

    fn slice(batch: &RecordBatch, offset: usize, limit: usize) -> RecordBatch {
        fn window<R: Clone>(records: &[R], offset: usize, limit: usize) -> Vec<R> {
            records.iter().skip(offset).take(limit).cloned().collect()
        }

        match batch {
            RecordBatch::Genre(r) => RecordBatch::Genre(window(r, offset, limit)),
            RecordBatch::Person(r) => RecordBatch::Person(window(r, offset, limit)),
            RecordBatch::FilmWork(r) => RecordBatch::FilmWork(window(r, offset, limit)),
            RecordBatch::GenreFilmWork(r) => RecordBatch::GenreFilmWork(window(r, offset, limit)),
            RecordBatch::PersonFilmWork(r) => RecordBatch::PersonFilmWork(window(r, offset, limit)),
        }
    }

    fn ids(batch: &RecordBatch) -> Vec<Uuid> {
        match batch {
            RecordBatch::Genre(r) => r.iter().map(|x| x.id).collect(),
            RecordBatch::Person(r) => r.iter().map(|x| x.id).collect(),
            RecordBatch::FilmWork(r) => r.iter().map(|x| x.id).collect(),
            RecordBatch::GenreFilmWork(r) => r.iter().map(|x| x.id).collect(),
            RecordBatch::PersonFilmWork(r) => r.iter().map(|x| x.id).collect(),
        }
    }

    fn protocol_error() -> sqlx::Error {
        sqlx::Error::Protocol("connection reset".to_string())
    }

    struct FakeSource {
        tables: HashMap<Table, RecordBatch>,
        fail_at: Option<(Table, usize)>,
        journal: Journal,
    }

    #[async_trait::async_trait]
    impl SourceRepository for FakeSource {
        async fn read_batch(
            &mut self,
            table: Table,
            offset: usize,
            limit: usize,
        ) -> Result<RecordBatch, ExtractError> {
            if self.fail_at == Some((table, offset)) {
                return Err(ExtractError::Database {
                    table,
                    source: protocol_error(),
                });
            }
            self.journal.lock().unwrap().push(format!("read {} {}", table, offset));
            Ok(self
                .tables
                .get(&table)
                .map(|all| slice(all, offset, limit))
                .unwrap_or_else(|| RecordBatch::empty(table)))
        }

        async fn count(&mut self, table: Table) -> Result<u64, ExtractError> {
            Ok(self.tables.get(&table).map_or(0, |all| all.len() as u64))
        }

        async fn close(self) -> Result<(), ExtractError> {
            self.journal.lock().unwrap().push("close source".to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct TargetState {
        rows: HashMap<Table, HashSet<Uuid>>,
    }

    struct FakeTarget {
        state: Arc<Mutex<TargetState>>,
        fail_at: Option<(Table, usize)>,
        journal: Journal,
    }

    #[async_trait::async_trait]
    impl TargetRepository for FakeTarget {
        async fn truncate(&mut self, table: Table) -> Result<(), WriteError> {
            self.journal.lock().unwrap().push(format!("truncate {}", table));
            let mut state = self.state.lock().unwrap();
            state.rows.remove(&table);
            match table {
                Table::Person => {
                    state.rows.remove(&Table::PersonFilmWork);
                }
                Table::Genre => {
                    state.rows.remove(&Table::GenreFilmWork);
                }
                Table::FilmWork => {
                    state.rows.remove(&Table::PersonFilmWork);
                    state.rows.remove(&Table::GenreFilmWork);
                }
                Table::GenreFilmWork | Table::PersonFilmWork => {}
            }
            Ok(())
        }

        async fn write_batch(&mut self, batch: &RecordBatch, offset: usize) -> Result<u64, WriteError> {
            let table = batch.table();
            if self.fail_at == Some((table, offset)) {
                return Err(WriteError::Batch {
                    table,
                    offset,
                    source: protocol_error(),
                });
            }
            self.journal
                .lock()
                .unwrap()
                .push(format!("write {} {} {}", table, offset, batch.len()));
            let mut state = self.state.lock().unwrap();
            let rows = state.rows.entry(table).or_default();
            let inserted = ids(batch).into_iter().filter(|id| rows.insert(*id)).count();
            Ok(inserted as u64)
        }

        async fn count(&mut self, table: Table) -> Result<u64, WriteError> {
            let state = self.state.lock().unwrap();
            Ok(state.rows.get(&table).map_or(0, |rows| rows.len() as u64))
        }

        async fn close(self) -> Result<(), WriteError> {
            self.journal.lock().unwrap().push("close target".to_string());
            Ok(())
        }
    }

    fn catalog(people: usize) -> HashMap<Table, RecordBatch> {
        let persons: Vec<Person> = (0..people)
            .map(|i| Person::new(None, Some(format!("Person {}", i))).unwrap())
            .collect();
        let genre = Genre::new(None, Some("Drama".to_string()), Some(String::new())).unwrap();
        let film = FilmWork::new(
            None,
            Some("Solaris".to_string()),
            None,
            None,
            Some(8.1),
            Some(FilmType::Movie),
        )
        .unwrap();
        let genre_link = GenreFilmWork::new(None, Some(genre.id), Some(film.id)).unwrap();
        let person_links: Vec<PersonFilmWork> = persons
            .iter()
            .map(|p| {
                PersonFilmWork::new(None, Some(p.id), Some(film.id), Some(PersonRole::Actor)).unwrap()
            })
            .collect();

        HashMap::from([
            (Table::Person, RecordBatch::Person(persons)),
            (Table::Genre, RecordBatch::Genre(vec![genre])),
            (Table::FilmWork, RecordBatch::FilmWork(vec![film])),
            (Table::GenreFilmWork, RecordBatch::GenreFilmWork(vec![genre_link])),
            (Table::PersonFilmWork, RecordBatch::PersonFilmWork(person_links)),
        ])
    }

    struct Harness {
        tables: HashMap<Table, RecordBatch>,
        state: Arc<Mutex<TargetState>>,
        journal: Journal,
    }

    impl Harness {
        fn new(tables: HashMap<Table, RecordBatch>) -> Self {
            Self {
                tables,
                state: Arc::default(),
                journal: Arc::default(),
            }
        }

        fn executor(
            &self,
            batch_size: usize,
            source_fail: Option<(Table, usize)>,
            target_fail: Option<(Table, usize)>,
        ) -> MigrationExecutor<FakeSource, FakeTarget> {
            let source = FakeSource {
                tables: self.tables.clone(),
                fail_at: source_fail,
                journal: self.journal.clone(),
            };
            let target = FakeTarget {
                state: self.state.clone(),
                fail_at: target_fail,
                journal: self.journal.clone(),
            };
            MigrationExecutor::new(source, target, batch_size, Span::none())
        }

        fn journal(&self) -> Vec<String> {
            self.journal.lock().unwrap().clone()
        }

        fn target_count(&self, table: Table) -> usize {
            self.state
                .lock()
                .unwrap()
                .rows
                .get(&table)
                .map_or(0, HashSet::len)
        }
    }

    #[tokio::test]
    async fn test_copies_every_table() {
        let harness = Harness::new(catalog(3));

        let report = harness.executor(500, None, None).run(true).await.unwrap();

        for table in Table::MIGRATION_ORDER {
            let expected = harness.tables[&table].len();
            assert_eq!(harness.target_count(table), expected, "{}", table);
            assert_eq!(report.table(table).unwrap().rows_written, expected as u64);
        }
        assert_eq!(report.total_written(), 3 + 1 + 1 + 3 + 1);
    }

    #[tokio::test]
    async fn test_parents_are_loaded_before_links() {
        let harness = Harness::new(catalog(1));

        harness.executor(500, None, None).run(false).await.unwrap();

        let truncates: Vec<_> = harness
            .journal()
            .into_iter()
            .filter(|entry| entry.starts_with("truncate"))
            .collect();
        assert_eq!(
            truncates,
            vec![
                "truncate person",
                "truncate genre",
                "truncate film_work",
                "truncate person_film_work",
                "truncate genre_film_work",
            ]
        );
    }

    #[tokio::test]
    async fn test_writes_in_batches_with_offsets() {
        let harness = Harness::new(catalog(5));

        let report = harness.executor(2, None, None).run(false).await.unwrap();

        let person_writes: Vec<_> = harness
            .journal()
            .into_iter()
            .filter(|entry| entry.starts_with("write person "))
            .collect();
        assert_eq!(
            person_writes,
            vec!["write person 0 2", "write person 2 2", "write person 4 1"]
        );
        assert_eq!(report.table(Table::Person).unwrap().batches, 3);
    }

    #[tokio::test]
    async fn test_second_run_yields_same_rows() {
        let harness = Harness::new(catalog(4));

        harness.executor(3, None, None).run(false).await.unwrap();
        let first: Vec<_> = Table::MIGRATION_ORDER
            .iter()
            .map(|t| harness.state.lock().unwrap().rows.get(t).cloned())
            .collect();

        harness.executor(3, None, None).run(true).await.unwrap();
        let second: Vec<_> = Table::MIGRATION_ORDER
            .iter()
            .map(|t| harness.state.lock().unwrap().rows.get(t).cloned())
            .collect();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_tables() {
        let harness = Harness::new(HashMap::new());

        let report = harness.executor(500, None, None).run(true).await.unwrap();

        assert_eq!(report.total_written(), 0);
        assert!(report.tables.iter().all(|t| t.batches == 0));
        assert!(!harness.journal().iter().any(|entry| entry.starts_with("write")));
    }

    #[tokio::test]
    async fn test_extract_failure_stops_run() {
        let harness = Harness::new(catalog(2));

        let err = harness
            .executor(500, Some((Table::FilmWork, 0)), None)
            .run(true)
            .await
            .unwrap_err();

        assert!(matches!(err, MigrationError::Extract(_)));
        assert_eq!(err.table(), Some(Table::FilmWork));

        let journal = harness.journal();
        assert!(!journal.iter().any(|e| e.starts_with("write film_work")));
        assert!(!journal.iter().any(|e| e.contains("person_film_work")));
        assert!(!journal.iter().any(|e| e.contains("genre_film_work")));
        assert!(journal.contains(&"close source".to_string()));
        assert!(journal.contains(&"close target".to_string()));
    }

    #[tokio::test]
    async fn test_write_failure_keeps_earlier_batches() {
        let harness = Harness::new(catalog(5));

        let err = harness
            .executor(2, None, Some((Table::Person, 2)))
            .run(true)
            .await
            .unwrap_err();

        match &err {
            MigrationError::Write(WriteError::Batch { table, offset, .. }) => {
                assert_eq!(*table, Table::Person);
                assert_eq!(*offset, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(harness.target_count(Table::Person), 2);
        assert_eq!(harness.target_count(Table::Genre), 0);
        assert!(harness.journal().contains(&"close target".to_string()));
    }
}
