//! Core domain models for the community forum.

use serde::{Deserialize, Serialize};

use super::{
    factory::IdFactory,
    value_object::{
        AuthorName, CommentId, PostBody, ReplyId, ReportId, ReportReason, ThreadId, ThreadTitle,
        Timestamp,
    },
};

/// A forum thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: ThreadId,
    pub title: ThreadTitle,
    pub body: PostBody,
    pub author: AuthorName,
    pub likes: u64,
    pub created_at: Timestamp,
}

impl Thread {
    /// Create a new thread with a fresh id and no likes
    pub fn new(
        title: ThreadTitle,
        body: PostBody,
        author: AuthorName,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: IdFactory::thread_id(),
            title,
            body,
            author,
            likes: 0,
            created_at,
        }
    }

    /// Add one like and return the new total
    pub fn like(&mut self) -> u64 {
        self.likes = self.likes.saturating_add(1);
        self.likes
    }
}

/// A top-level comment on a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub thread_id: ThreadId,
    pub author: AuthorName,
    pub body: PostBody,
    pub likes: u64,
    pub created_at: Timestamp,
}

impl Comment {
    pub fn new(
        thread_id: ThreadId,
        author: AuthorName,
        body: PostBody,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: IdFactory::comment_id(),
            thread_id,
            author,
            body,
            likes: 0,
            created_at,
        }
    }

    /// Add one like and return the new total
    pub fn like(&mut self) -> u64 {
        self.likes = self.likes.saturating_add(1);
        self.likes
    }
}

/// A reply to a comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: ReplyId,
    pub thread_id: ThreadId,
    pub comment_id: CommentId,
    pub author: AuthorName,
    pub body: PostBody,
    pub created_at: Timestamp,
}

impl Reply {
    pub fn new(
        thread_id: ThreadId,
        comment_id: CommentId,
        author: AuthorName,
        body: PostBody,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: IdFactory::reply_id(),
            thread_id,
            comment_id,
            author,
            body,
            created_at,
        }
    }
}

/// A moderation report filed against a comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub thread_id: ThreadId,
    pub comment_id: CommentId,
    pub reason: ReportReason,
    pub created_at: Timestamp,
}

impl Report {
    pub fn new(
        thread_id: ThreadId,
        comment_id: CommentId,
        reason: ReportReason,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: IdFactory::report_id(),
            thread_id,
            comment_id,
            reason,
            created_at,
        }
    }
}
