//! Summaries produced by a migration run.
use std::time::Duration;

use movies_loader_shared::types::Table;
use tracing::{info, warn};

/// Outcome of copying one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: Table,
    pub rows_read: u64,
    pub rows_written: u64,
    pub batches: usize,
}

impl TableReport {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            rows_read: 0,
            rows_written: 0,
            batches: 0,
        }
    }

    /// Rows read but not inserted because their id already existed.
    pub fn rows_skipped(&self) -> u64 {
        self.rows_read.saturating_sub(self.rows_written)
    }
}

/// Outcome of a successful run, one entry per table in migration order.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    pub tables: Vec<TableReport>,
    pub elapsed: Duration,
}

impl MigrationReport {
    pub fn table(&self, table: Table) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.table == table)
    }

    pub fn total_written(&self) -> u64 {
        self.tables.iter().map(|report| report.rows_written).sum()
    }

    pub fn log(&self) {
        info!("=== Migration Complete ===");
        info!("Total time: {:.2}s", self.elapsed.as_secs_f64());
        for report in &self.tables {
            info!(
                table = %report.table,
                read = report.rows_read,
                written = report.rows_written,
                skipped = report.rows_skipped(),
                batches = report.batches,
                "Table copied"
            );
        }
    }
}

/// Row counts of one table on both sides after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: Table,
    pub source: u64,
    pub target: u64,
}

impl TableCount {
    pub fn matches(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub tables: Vec<TableCount>,
}

impl VerificationReport {
    pub fn is_consistent(&self) -> bool {
        self.tables.iter().all(TableCount::matches)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &TableCount> {
        self.tables.iter().filter(|count| !count.matches())
    }

    pub fn log(&self) {
        if self.is_consistent() {
            info!(tables = self.tables.len(), "Row counts match between source and target");
            return;
        }
        for count in self.mismatches() {
            warn!(
                table = %count.table,
                source = count.source,
                target = count.target,
                "Row count mismatch between source and target"
            );
        }
    }
}
