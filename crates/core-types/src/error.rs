use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("The index table has no entries.")]
    EmptyIndexTable,

    #[error("Index '{0}' is registered more than once.")]
    DuplicateIndex(String),

    #[error("Default index '{0}' is not registered in the index table.")]
    UnknownDefaultIndex(String),
}
