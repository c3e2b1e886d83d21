use std::fmt;
use std::path::PathBuf;

use movies_loader_shared::types::Table;
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

/// Rows per read/write round-trip unless `MIGRATION_BATCH_SIZE` says otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// PostgreSQL accepts at most this many bind parameters in one statement.
const MAX_BIND_PARAMETERS: usize = u16::MAX as usize;

const DEFAULT_DB_HOST: &str = "127.0.0.1";
const DEFAULT_DB_PORT: u16 = 5432;
const TARGET_SEARCH_PATH: &str = "content";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Largest batch whose bulk insert stays within the bind-parameter limit for
/// every table.
pub fn max_batch_size() -> usize {
    let widest = Table::MIGRATION_ORDER
        .iter()
        .map(|table| table.target_columns().len())
        .max()
        .unwrap_or(1);
    MAX_BIND_PARAMETERS / widest
}

/// Connection parameters of the PostgreSQL target.
#[derive(Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl PostgresConfig {
    /// Connection options for the target, with `content` as the search path.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
            .options([("search_path", TARGET_SEARCH_PATH)])
    }
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Settings of one migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the SQLite source file (`SQLT_DB_NAME`).
    pub sqlite_path: PathBuf,
    pub postgres: PostgresConfig,
    pub batch_size: usize,
    /// Compare source and target row counts after loading (`MIGRATION_VERIFY`).
    pub verify: bool,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let require = |var: &'static str| get(var).ok_or(ConfigError::Missing(var));

        let sqlite_path = PathBuf::from(require("SQLT_DB_NAME")?);

        let postgres = PostgresConfig {
            dbname: require("DB_NAME")?,
            user: require("DB_USER")?,
            password: require("DB_PASSWORD")?,
            host: get("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            port: match get("DB_PORT") {
                Some(value) => parse("DB_PORT", value)?,
                None => DEFAULT_DB_PORT,
            },
        };

        let batch_size = match get("MIGRATION_BATCH_SIZE") {
            Some(value) => {
                let size: usize = parse("MIGRATION_BATCH_SIZE", value.clone())?;
                let max = max_batch_size();
                if size == 0 || size > max {
                    return Err(ConfigError::Invalid {
                        var: "MIGRATION_BATCH_SIZE",
                        value,
                        reason: format!("must be between 1 and {}", max),
                    });
                }
                size
            }
            None => DEFAULT_BATCH_SIZE,
        };

        let verify = match get("MIGRATION_VERIFY") {
            Some(value) => parse_flag("MIGRATION_VERIFY", value)?,
            None => true,
        };

        Ok(Self {
            sqlite_path,
            postgres,
            batch_size,
            verify,
        })
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}
