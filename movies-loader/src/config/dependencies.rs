use movies_loader_repository::{PostgresTarget, SourceRepository, SqliteSource};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::MigrationError;

/// `Dependencies` holds the two database handles a migration run needs.
///
/// Each handle is owned exclusively by its repository for the whole run.
pub struct Dependencies {
    pub source: SqliteSource,
    pub target: PostgresTarget,
}

impl Dependencies {
    /// Opens the SQLite source and connects to the PostgreSQL target.
    ///
    /// If the target cannot be reached, the already opened source is closed
    /// before the error is returned.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` when both databases are open or a
    /// `MigrationError` naming the side that failed.
    pub async fn new(config: &Config) -> Result<Self, MigrationError> {
        info!(path = %config.sqlite_path.display(), "Opening SQLite source");
        let source = SqliteSource::open(&config.sqlite_path).await?;

        info!(
            host = %config.postgres.host,
            port = config.postgres.port,
            database = %config.postgres.dbname,
            "Connecting to PostgreSQL target"
        );
        let target = match PostgresTarget::connect(&config.postgres.connect_options()).await {
            Ok(target) => target,
            Err(e) => {
                if let Err(close_err) = source.close().await {
                    warn!(error = %close_err, "Failed to close SQLite source");
                }
                return Err(e.into());
            }
        };

        Ok(Self { source, target })
    }
}
