//! Document store abstraction.
//!
//! The forum data lives in a document database that is treated as a plain
//! CRUD service. The domain layer defines the trait; the infrastructure layer
//! provides the implementation (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::{Comment, Reply, Report, Thread},
    error::RepositoryError,
    value_object::{CommentId, ThreadId},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn insert_thread(&self, thread: Thread) -> Result<(), RepositoryError>;

    /// All threads, newest first
    async fn list_threads(&self) -> Result<Vec<Thread>, RepositoryError>;

    async fn get_thread(&self, thread_id: &ThreadId) -> Result<Thread, RepositoryError>;

    /// Insert a comment. Fails with `ThreadNotFound` if its thread is missing.
    async fn insert_comment(&self, comment: Comment) -> Result<(), RepositoryError>;

    /// Comments of a thread, oldest first
    async fn list_comments(&self, thread_id: &ThreadId) -> Result<Vec<Comment>, RepositoryError>;

    /// Insert a reply. Fails if its thread or comment is missing.
    async fn insert_reply(&self, reply: Reply) -> Result<(), RepositoryError>;

    /// Replies to a comment, oldest first
    async fn list_replies(&self, comment_id: &CommentId) -> Result<Vec<Reply>, RepositoryError>;

    /// Increment a thread's like counter and return the new total
    async fn increment_thread_likes(&self, thread_id: &ThreadId) -> Result<u64, RepositoryError>;

    /// Increment a comment's like counter and return the new total
    async fn increment_comment_likes(
        &self,
        thread_id: &ThreadId,
        comment_id: &CommentId,
    ) -> Result<u64, RepositoryError>;

    async fn insert_report(&self, report: Report) -> Result<(), RepositoryError>;

    /// All reports, newest first
    async fn list_reports(&self) -> Result<Vec<Report>, RepositoryError>;
}
