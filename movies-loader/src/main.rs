use std::process::ExitCode;

use dotenv::dotenv;
use movies_loader::{Config, Dependencies, MigrationError, MigrationExecutor, MigrationReport};
use tracing::{error, info, info_span, Instrument, Span};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "movies_loader=info,movies_loader_repository=info";

/// Main entry point for the Movies Loader application.
///
/// Loads `.env`, reads the configuration, opens both databases and runs a
/// single truncate-and-reload migration.
///
/// # Returns
///
/// `ExitCode::SUCCESS` when every table was copied, `ExitCode::FAILURE` after
/// logging the failing phase and table otherwise.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_target(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let span = info_span!("migration");
    match run(span.clone()).await {
        Ok(report) => {
            span.in_scope(|| info!(rows = report.total_written(), "✓ Migration finished"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            span.in_scope(|| {
                error!(
                    phase = e.phase(),
                    table = ?e.table().map(|table| table.name()),
                    error = %e,
                    "Migration failed"
                )
            });
            ExitCode::FAILURE
        }
    }
}

async fn run(span: Span) -> Result<MigrationReport, MigrationError> {
    let config = Config::from_env()?;

    let dependencies = Dependencies::new(&config)
        .instrument(span.clone())
        .await?;

    MigrationExecutor::new(
        dependencies.source,
        dependencies.target,
        config.batch_size,
        span,
    )
    .run(config.verify)
    .await
}
