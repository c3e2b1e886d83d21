use movies_loader_shared::types::{RecordBatch, Table};

use crate::errors::WriteError;

/// A trait that defines the write side of the migration.
///
/// Every call runs in its own transaction and is committed before it returns,
/// so a failure never undoes work reported as successful earlier.
#[async_trait::async_trait]
pub trait TargetRepository: Send {
    /// Removes every row of `table`, cascading to rows that reference it.
    async fn truncate(&mut self, table: Table) -> Result<(), WriteError>;

    /// Inserts a batch of records, skipping records whose id already exists.
    ///
    /// # Arguments
    ///
    /// * `batch` - Records to insert (empty batches are no-ops)
    /// * `offset` - Position of the batch within its table, used for diagnostics
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of rows actually inserted
    /// * `Err(WriteError)` - The batch was rolled back
    async fn write_batch(&mut self, batch: &RecordBatch, offset: usize) -> Result<u64, WriteError>;

    /// Returns the number of rows stored in `table`.
    async fn count(&mut self, table: Table) -> Result<u64, WriteError>;

    /// Closes the underlying connection.
    async fn close(self) -> Result<(), WriteError>
    where
        Self: Sized;
}
