use configuration::error::ConfigError;
use core_types::CoreError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PressureError {
    #[error("Invalid input for {field}: expected a positive value, got {value}")]
    NonPositiveInput { field: &'static str, value: Decimal },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid index table: {0}")]
    Table(#[from] CoreError),

    #[error("Calculation error: {0}")]
    Calculation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
