//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Required text was empty (or whitespace only)
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Text exceeded its maximum length
    #[error("{field} cannot exceed {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Identifier was not a UUID
    #[error("{field} must be a valid UUID format (got: {value})")]
    InvalidId { field: &'static str, value: String },
}

/// Errors returned by the document store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by a channel's transport sink
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The sink was closed, either by us or because the peer went away
    #[error("sink is closed")]
    Closed,

    /// The transport refused the write
    #[error("sink rejected write: {0}")]
    Rejected(String),
}

/// A publishable event could not be serialized
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to encode '{event_type}' event: {message}")]
pub struct EncodeError {
    pub event_type: &'static str,
    pub message: String,
}

impl EncodeError {
    pub fn new(event_type: &'static str, source: serde_json::Error) -> Self {
        Self {
            event_type,
            message: source.to_string(),
        }
    }
}
