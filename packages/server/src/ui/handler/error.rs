//! Error responses of the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    domain::ValueObjectError,
    usecase::{CommunityError, SubscribeError},
};

/// Error returned by a handler, rendered as `{"error": {"message": ...}}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Invalid admin password")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {}", self.message);
        }
        let body = json!({ "error": { "message": self.message } });
        (self.status, Json(body)).into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(err: ValueObjectError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl From<CommunityError> for ApiError {
    fn from(err: CommunityError) -> Self {
        let status = match err {
            CommunityError::ThreadNotFound(_) | CommunityError::CommentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            CommunityError::Store(_) | CommunityError::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<SubscribeError> for ApiError {
    fn from(err: SubscribeError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorName, EncodeError};

    #[test]
    fn test_not_found_mapping() {
        let err = ApiError::from(CommunityError::ThreadNotFound("abc".to_string()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_mapping() {
        // テスト項目: 検証エラーのメッセージは JSON のフィールド名で対象を示す
        // given (前提条件):
        let invalid = AuthorName::new("   ".to_string()).unwrap_err();

        // when (操作):
        let err = ApiError::from(invalid);

        // then (期待する結果):
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "author cannot be empty");
    }

    #[test]
    fn test_store_failure_mapping() {
        let err = ApiError::from(CommunityError::Store("down".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_encode_failure_mapping() {
        // テスト項目: イベントのエンコード失敗は 500 として書き込み側に返る
        // given (前提条件):
        let source = serde_json::from_str::<u64>("{").unwrap_err();
        let community = CommunityError::from(EncodeError::new("thread_liked", source));

        // when (操作):
        let err = ApiError::from(community);

        // then (期待する結果):
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("thread_liked"));
    }
}
