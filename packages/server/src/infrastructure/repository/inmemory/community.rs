//! InMemory Community Repository 実装
//!
//! ドメイン層が定義する CommunityRepository trait の具体的な実装。
//! Vec をインメモリのドキュメントストアとして使用します。
//!
//! 本番のドキュメント DB は単純な CRUD サービスとして扱うため、
//! この実装もトランザクションやインデックスは持ちません。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Comment, CommentId, CommunityRepository, Reply, Report, RepositoryError, Thread, ThreadId,
};

/// Collections held by the in-memory store, in insertion order
#[derive(Debug, Default)]
struct CommunityStore {
    threads: Vec<Thread>,
    comments: Vec<Comment>,
    replies: Vec<Reply>,
    reports: Vec<Report>,
}

/// インメモリ Community Repository 実装
pub struct InMemoryCommunityRepository {
    store: Mutex<CommunityStore>,
}

impl InMemoryCommunityRepository {
    /// 空のストアで InMemoryCommunityRepository を作成
    pub fn new() -> Self {
        Self {
            store: Mutex::new(CommunityStore::default()),
        }
    }
}

impl Default for InMemoryCommunityRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityStore {
    fn has_thread(&self, thread_id: &ThreadId) -> bool {
        self.threads.iter().any(|t| &t.id == thread_id)
    }

    fn comment_mut(
        &mut self,
        thread_id: &ThreadId,
        comment_id: &CommentId,
    ) -> Result<&mut Comment, RepositoryError> {
        if !self.has_thread(thread_id) {
            return Err(RepositoryError::ThreadNotFound(thread_id.to_string()));
        }
        self.comments
            .iter_mut()
            .find(|c| &c.id == comment_id && &c.thread_id == thread_id)
            .ok_or_else(|| RepositoryError::CommentNotFound(comment_id.to_string()))
    }
}

#[async_trait]
impl CommunityRepository for InMemoryCommunityRepository {
    async fn insert_thread(&self, thread: Thread) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        store.threads.push(thread);
        Ok(())
    }

    async fn list_threads(&self) -> Result<Vec<Thread>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.threads.iter().rev().cloned().collect())
    }

    async fn get_thread(&self, thread_id: &ThreadId) -> Result<Thread, RepositoryError> {
        let store = self.store.lock().await;
        store
            .threads
            .iter()
            .find(|t| &t.id == thread_id)
            .cloned()
            .ok_or_else(|| RepositoryError::ThreadNotFound(thread_id.to_string()))
    }

    async fn insert_comment(&self, comment: Comment) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        if !store.has_thread(&comment.thread_id) {
            return Err(RepositoryError::ThreadNotFound(comment.thread_id.to_string()));
        }
        store.comments.push(comment);
        Ok(())
    }

    async fn list_comments(&self, thread_id: &ThreadId) -> Result<Vec<Comment>, RepositoryError> {
        let store = self.store.lock().await;
        if !store.has_thread(thread_id) {
            return Err(RepositoryError::ThreadNotFound(thread_id.to_string()));
        }
        Ok(store
            .comments
            .iter()
            .filter(|c| &c.thread_id == thread_id)
            .cloned()
            .collect())
    }

    async fn insert_reply(&self, reply: Reply) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        store.comment_mut(&reply.thread_id, &reply.comment_id)?;
        store.replies.push(reply);
        Ok(())
    }

    async fn list_replies(&self, comment_id: &CommentId) -> Result<Vec<Reply>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store
            .replies
            .iter()
            .filter(|r| &r.comment_id == comment_id)
            .cloned()
            .collect())
    }

    async fn increment_thread_likes(&self, thread_id: &ThreadId) -> Result<u64, RepositoryError> {
        let mut store = self.store.lock().await;
        store
            .threads
            .iter_mut()
            .find(|t| &t.id == thread_id)
            .map(|t| t.like())
            .ok_or_else(|| RepositoryError::ThreadNotFound(thread_id.to_string()))
    }

    async fn increment_comment_likes(
        &self,
        thread_id: &ThreadId,
        comment_id: &CommentId,
    ) -> Result<u64, RepositoryError> {
        let mut store = self.store.lock().await;
        store.comment_mut(thread_id, comment_id).map(|c| c.like())
    }

    async fn insert_report(&self, report: Report) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        store.comment_mut(&report.thread_id, &report.comment_id)?;
        store.reports.push(report);
        Ok(())
    }

    async fn list_reports(&self) -> Result<Vec<Report>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.reports.iter().rev().cloned().collect())
    }
}
