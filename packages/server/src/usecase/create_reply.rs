//! UseCase: 返信作成

use std::sync::Arc;

use crate::domain::{
    AuthorName, CommentId, CommunityEvent, CommunityRepository, EncodedEvent, EventPublisher,
    NewReplyData, PostBody, Reply, ThreadId, Timestamp,
};

use super::error::CommunityError;

/// 返信作成のユースケース
pub struct CreateReplyUseCase {
    repository: Arc<dyn CommunityRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl CreateReplyUseCase {
    pub fn new(
        repository: Arc<dyn CommunityRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// 返信を保存し、成功したら `new_reply` を配信する
    pub async fn execute(
        &self,
        thread_id: ThreadId,
        comment_id: CommentId,
        author: AuthorName,
        body: PostBody,
    ) -> Result<Reply, CommunityError> {
        let reply = Reply::new(
            thread_id.clone(),
            comment_id.clone(),
            author,
            body,
            Timestamp::now(),
        );
        self.repository.insert_reply(reply.clone()).await?;

        let event = EncodedEvent::encode(CommunityEvent::NewReply(NewReplyData {
            thread_id,
            comment_id,
            reply: reply.clone(),
        }))?;
        self.publisher.publish(event);

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Comment, EventKind, IdFactory, Thread, ThreadTitle, publisher::MockEventPublisher,
        },
        infrastructure::repository::InMemoryCommunityRepository,
    };

    async fn create_repository_with_comment() -> (Arc<InMemoryCommunityRepository>, Comment) {
        let repository = Arc::new(InMemoryCommunityRepository::default());
        let thread = Thread::new(
            ThreadTitle::new("Ramen broth".to_string()).unwrap(),
            PostBody::new("Tonkotsu at home?".to_string()).unwrap(),
            AuthorName::new("alice".to_string()).unwrap(),
            Timestamp::now(),
        );
        repository.insert_thread(thread.clone()).await.unwrap();
        let comment = Comment::new(
            thread.id.clone(),
            AuthorName::new("bob".to_string()).unwrap(),
            PostBody::new("Pressure cooker helps".to_string()).unwrap(),
            Timestamp::now(),
        );
        repository.insert_comment(comment.clone()).await.unwrap();
        (repository, comment)
    }

    #[tokio::test]
    async fn test_create_reply_publishes_new_reply() {
        // テスト項目: 返信の保存後に new_reply が配信される
        // given (前提条件):
        let (repository, comment) = create_repository_with_comment().await;
        let expected_comment_id = comment.id.clone();
        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .times(1)
            .withf(move |event| {
                matches!(&event.envelope().kind, EventKind::NewReply { data }
                    if data.comment_id == expected_comment_id
                        && data.reply.comment_id == expected_comment_id)
            })
            .return_const(());
        let usecase = CreateReplyUseCase::new(repository.clone(), Arc::new(publisher));

        // when (操作):
        let reply = usecase
            .execute(
                comment.thread_id.clone(),
                comment.id.clone(),
                AuthorName::new("carol".to_string()).unwrap(),
                PostBody::new("How long?".to_string()).unwrap(),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(repository.list_replies(&comment.id).await.unwrap(), vec![reply]);
    }

    #[tokio::test]
    async fn test_create_reply_unknown_comment() {
        // テスト項目: 存在しないコメントへの返信はエラーになり、配信されない
        let (repository, comment) = create_repository_with_comment().await;
        let mut publisher = MockEventPublisher::new();
        publisher.expect_publish().never();
        let usecase = CreateReplyUseCase::new(repository, Arc::new(publisher));

        let result = usecase
            .execute(
                comment.thread_id.clone(),
                IdFactory::comment_id(),
                AuthorName::new("carol".to_string()).unwrap(),
                PostBody::new("Hello?".to_string()).unwrap(),
            )
            .await;

        assert!(matches!(result, Err(CommunityError::CommentNotFound(_))));
    }
}
