//! HTTP API request and response DTOs.
//!
//! Field names are camelCase on the wire; timestamps are ISO 8601 strings.

use serde::{Deserialize, Serialize};

use crate::domain::{Comment, Reply, Report, Thread};

/// Body of `POST /api/community/threads`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadRequest {
    pub title: String,
    pub body: String,
    pub author: String,
}

/// Body of comment and reply creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub author: String,
    pub body: String,
}

/// Body of `POST .../report`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub reason: String,
}

/// Thread summary for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummaryDto {
    #[serde(flatten)]
    pub thread: Thread,
    pub comment_count: usize,
}

/// Comment together with its replies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetailDto {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<Reply>,
}

/// Thread detail for the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDetailDto {
    #[serde(flatten)]
    pub thread: Thread,
    pub comments: Vec<CommentDetailDto>,
}

/// Result of a like
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesDto {
    pub likes: u64,
}

/// Moderation report list for the admin endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListDto {
    pub reports: Vec<Report>,
}

/// Real-time channel diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsDto {
    pub connections: usize,
}
