//! UseCase: スレッド作成
//!
//! スレッドの作成はリアルタイム配信の対象外（一覧は通常の再取得で反映される）。

use std::sync::Arc;

use crate::domain::{AuthorName, CommunityRepository, PostBody, Thread, ThreadTitle, Timestamp};

use super::error::CommunityError;

/// スレッド作成のユースケース
pub struct CreateThreadUseCase {
    repository: Arc<dyn CommunityRepository>,
}

impl CreateThreadUseCase {
    pub fn new(repository: Arc<dyn CommunityRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        title: ThreadTitle,
        body: PostBody,
        author: AuthorName,
    ) -> Result<Thread, CommunityError> {
        let thread = Thread::new(title, body, author, Timestamp::now());
        self.repository.insert_thread(thread.clone()).await?;
        tracing::info!(thread_id = %thread.id, "Thread created");
        Ok(thread)
    }
}
