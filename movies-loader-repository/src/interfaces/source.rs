use movies_loader_shared::types::{RecordBatch, Table};

use crate::errors::ExtractError;

/// A trait that defines the read side of the migration.
///
/// Implementors own their connection exclusively and hand out records one
/// batch at a time, in the natural row order of each table.
#[async_trait::async_trait]
pub trait SourceRepository: Send {
    /// Reads up to `limit` records of `table`, skipping the first `offset` rows.
    ///
    /// # Arguments
    ///
    /// * `table` - Table to read from
    /// * `offset` - Number of rows already consumed
    /// * `limit` - Maximum number of rows in the returned batch
    ///
    /// # Returns
    ///
    /// A `RecordBatch` for `table`. A batch shorter than `limit` (possibly empty)
    /// means the table is exhausted. Nothing partial is returned on error.
    async fn read_batch(
        &mut self,
        table: Table,
        offset: usize,
        limit: usize,
    ) -> Result<RecordBatch, ExtractError>;

    /// Returns the number of rows stored in `table`.
    async fn count(&mut self, table: Table) -> Result<u64, ExtractError>;

    /// Closes the underlying connection.
    async fn close(self) -> Result<(), ExtractError>
    where
        Self: Sized;
}
