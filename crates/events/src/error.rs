use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventsError {
    #[error("Failed to read events file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse events: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid event for {ticker}: {reason}")]
    InvalidEvent { ticker: String, reason: String },
}
