//! Client error definitions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Failed to connect: {0}")]
    Connect(#[from] reqwest::Error),

    #[error("Server responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Unexpected content type: {0}")]
    ContentType(String),

    #[error("Event stream ended")]
    Ended,
}
