use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid index table in configuration: {0}")]
    InvalidIndexTable(#[from] CoreError),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}
