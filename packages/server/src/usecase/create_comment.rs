//! UseCase: コメント作成
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateCommentUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 保存に成功した場合のみ `new_comment` が配信されることを保証する
//! - 保存に失敗した場合は配信されず、エラーが呼び出し元に返ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：コメント保存と配信
//! - 異常系：存在しないスレッド、ドキュメントストアの障害

use std::sync::Arc;

use crate::domain::{
    AuthorName, Comment, CommunityEvent, CommunityRepository, EncodedEvent, EventPublisher,
    NewCommentData, PostBody, ThreadId, Timestamp,
};

use super::error::CommunityError;

/// コメント作成のユースケース
pub struct CreateCommentUseCase {
    repository: Arc<dyn CommunityRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl CreateCommentUseCase {
    pub fn new(
        repository: Arc<dyn CommunityRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// コメントを保存し、成功したら `new_comment` を配信する
    pub async fn execute(
        &self,
        thread_id: ThreadId,
        author: AuthorName,
        body: PostBody,
    ) -> Result<Comment, CommunityError> {
        let comment = Comment::new(thread_id.clone(), author, body, Timestamp::now());

        // 1. 保存（失敗したら配信しない）
        self.repository.insert_comment(comment.clone()).await?;

        // 2. 配信
        let event = EncodedEvent::encode(CommunityEvent::NewComment(NewCommentData {
            thread_id,
            comment: comment.clone(),
        }))?;
        self.publisher.publish(event);

        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            AuthorName, EventKind, IdFactory, RepositoryError, Thread, ThreadTitle,
            publisher::MockEventPublisher, repository::MockCommunityRepository,
        },
        infrastructure::repository::InMemoryCommunityRepository,
    };

    async fn create_repository_with_thread() -> (Arc<InMemoryCommunityRepository>, Thread) {
        let repository = Arc::new(InMemoryCommunityRepository::default());
        let thread = Thread::new(
            ThreadTitle::new("Knife skills".to_string()).unwrap(),
            PostBody::new("Which knife first?".to_string()).unwrap(),
            AuthorName::new("alice".to_string()).unwrap(),
            Timestamp::now(),
        );
        repository.insert_thread(thread.clone()).await.unwrap();
        (repository, thread)
    }

    fn author() -> AuthorName {
        AuthorName::new("bob".to_string()).unwrap()
    }

    fn body() -> PostBody {
        PostBody::new("A good chef's knife".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_comment_publishes_new_comment() {
        // テスト項目: 保存後に new_comment が 1 回だけ配信される
        // given (前提条件):
        let (repository, thread) = create_repository_with_thread().await;
        let expected_thread_id = thread.id.clone();
        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .times(1)
            .withf(move |event| {
                matches!(&event.envelope().kind, EventKind::NewComment { data }
                    if data.thread_id == expected_thread_id
                        && data.comment.body.as_str() == "A good chef's knife")
            })
            .return_const(());
        let usecase = CreateCommentUseCase::new(repository.clone(), Arc::new(publisher));

        // when (操作):
        let comment = usecase
            .execute(thread.id.clone(), author(), body())
            .await
            .unwrap();

        // then (期待する結果):
        let stored = repository.list_comments(&thread.id).await.unwrap();
        assert_eq!(stored, vec![comment]);
    }

    #[tokio::test]
    async fn test_create_comment_unknown_thread() {
        // テスト項目: 存在しないスレッドへのコメントはエラーになり、配信されない
        // given (前提条件):
        let repository = Arc::new(InMemoryCommunityRepository::default());
        let mut publisher = MockEventPublisher::new();
        publisher.expect_publish().never();
        let usecase = CreateCommentUseCase::new(repository, Arc::new(publisher));

        // when (操作):
        let result = usecase
            .execute(IdFactory::thread_id(), author(), body())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(CommunityError::ThreadNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_comment_store_failure() {
        // テスト項目: ドキュメントストアの障害はエラーとして返り、配信されない
        // given (前提条件):
        let mut repository = MockCommunityRepository::new();
        repository
            .expect_insert_comment()
            .times(1)
            .returning(|_| Err(RepositoryError::Unavailable("connection reset".to_string())));
        let mut publisher = MockEventPublisher::new();
        publisher.expect_publish().never();
        let usecase = CreateCommentUseCase::new(Arc::new(repository), Arc::new(publisher));

        // when (操作):
        let result = usecase
            .execute(IdFactory::thread_id(), author(), body())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CommunityError::Store("connection reset".to_string()))
        );
    }
}
