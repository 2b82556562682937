//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{EncodeError, RepositoryError, SinkError};

/// Errors from the community write-side use cases
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommunityError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    #[error("Document store error: {0}")]
    Store(String),

    #[error("{0}")]
    Encode(String),
}

impl From<RepositoryError> for CommunityError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ThreadNotFound(id) => CommunityError::ThreadNotFound(id),
            RepositoryError::CommentNotFound(id) => CommunityError::CommentNotFound(id),
            RepositoryError::Unavailable(msg) => CommunityError::Store(msg),
        }
    }
}

impl From<EncodeError> for CommunityError {
    fn from(err: EncodeError) -> Self {
        CommunityError::Encode(err.to_string())
    }
}

/// Errors from opening a real-time channel
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscribeError {
    #[error("Failed to send handshake: {0}")]
    Handshake(#[from] SinkError),
}
