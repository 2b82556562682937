//! UseCase: いいね（スレッド / コメント）
//!
//! 対象に応じて `thread_liked` または `comment_liked` を配信する。

use std::sync::Arc;

use crate::domain::{
    CommentId, CommentLikedData, CommunityEvent, CommunityRepository, EncodedEvent,
    EventPublisher, ThreadId, ThreadLikedData,
};

use super::error::CommunityError;

/// スレッドへのいいねのユースケース
pub struct LikeThreadUseCase {
    repository: Arc<dyn CommunityRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl LikeThreadUseCase {
    pub fn new(
        repository: Arc<dyn CommunityRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// いいねを加算し、新しい合計を返す
    pub async fn execute(&self, thread_id: ThreadId) -> Result<u64, CommunityError> {
        let likes = self.repository.increment_thread_likes(&thread_id).await?;

        let event = EncodedEvent::encode(CommunityEvent::ThreadLiked(ThreadLikedData {
            thread_id,
            likes,
        }))?;
        self.publisher.publish(event);

        Ok(likes)
    }
}

/// コメントへのいいねのユースケース
pub struct LikeCommentUseCase {
    repository: Arc<dyn CommunityRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl LikeCommentUseCase {
    pub fn new(
        repository: Arc<dyn CommunityRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// いいねを加算し、新しい合計を返す
    pub async fn execute(
        &self,
        thread_id: ThreadId,
        comment_id: CommentId,
    ) -> Result<u64, CommunityError> {
        let likes = self
            .repository
            .increment_comment_likes(&thread_id, &comment_id)
            .await?;

        let event = EncodedEvent::encode(CommunityEvent::CommentLiked(CommentLikedData {
            thread_id,
            comment_id,
            likes,
        }))?;
        self.publisher.publish(event);

        Ok(likes)
    }
}
