use events::EventsError;
use pressure::PressureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlerterError {
    #[error("Failed to read index events: {0}")]
    Source(#[from] EventsError),

    #[error("Failed to score {ticker}: {source}")]
    Pressure {
        ticker: String,
        #[source]
        source: PressureError,
    },

    #[error("Failed to serialize alerts: {0}")]
    Serialization(#[from] serde_json::Error),
}
