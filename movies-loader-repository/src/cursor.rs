//! Lazy, batch-by-batch iteration over one source table.
use movies_loader_shared::types::{RecordBatch, Table};

use crate::errors::ExtractError;
use crate::interfaces::SourceRepository;

/// Walks a table in fixed-size batches.
///
/// The cursor holds no records itself: each call to [`BatchCursor::next_batch`]
/// asks the source for the next window and hands it straight back.
#[derive(Debug, Clone)]
pub struct BatchCursor {
    table: Table,
    batch_size: usize,
    offset: usize,
    exhausted: bool,
}

impl BatchCursor {
    pub fn new(table: Table, batch_size: usize) -> Self {
        Self {
            table,
            batch_size: batch_size.max(1),
            offset: 0,
            exhausted: false,
        }
    }

    pub fn table(&self) -> Table {
        self.table
    }

    /// Number of rows handed out so far, i.e. the offset of the next batch.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the next non-empty batch, or `None` once the table is exhausted.
    pub async fn next_batch<S>(&mut self, source: &mut S) -> Result<Option<RecordBatch>, ExtractError>
    where
        S: SourceRepository + ?Sized,
    {
        if self.exhausted {
            return Ok(None);
        }

        let batch = source
            .read_batch(self.table, self.offset, self.batch_size)
            .await?;

        if batch.len() < self.batch_size {
            self.exhausted = true;
        }
        if batch.is_empty() {
            return Ok(None);
        }

        self.offset += batch.len();
        Ok(Some(batch))
    }
}
