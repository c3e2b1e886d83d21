//! Configuration module for the Movies Loader.
//! Reads settings from the environment and opens the two databases.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{max_batch_size, Config, ConfigError, PostgresConfig, DEFAULT_BATCH_SIZE};
