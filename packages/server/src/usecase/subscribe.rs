//! UseCase: リアルタイム購読（チャンネルのライフサイクル管理）
//!
//! 購読リクエスト 1 件を、登録済み・keep-alive 付きのチャンネル 1 本に変換し、
//! どの経路で終了しても確実に後片付けされることを保証します。
//!
//! ## ライフサイクル
//!
//! ```text
//! Open ──(切断 / 書き込み失敗 / シャットダウン)──▶ Closing ──▶ Closed
//! ```
//!
//! - `connected` は常に最初のエンベロープ（登録前に書き込むので、並行する
//!   publish に追い越されない）
//! - `ping` は 1 インターバル経過ごとにこのチャンネルだけに送る
//! - [`SubscriptionHandle`] の drop がトランスポートの切断シグナルに相当する
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubscribeUseCase::execute() と SubscriptionHandle の drop
//!
//! ### どのような状況を想定しているか
//! - 正常系：handshake → ping の順序、複数クライアントへの配信
//! - 異常系：ping 失敗、handshake 失敗
//! - エッジケース：ping 失敗後の切断シグナル（二重の後片付け）

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::{
    domain::{ChannelId, ChannelSink, EventEnvelope},
    infrastructure::realtime::{BroadcastRegistry, Channel},
};

use super::error::SubscribeError;

/// Keep-alive interval used unless configured otherwise
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(30);

const MIN_PING_INTERVAL: Duration = Duration::from_millis(1);

/// 購読のユースケース
pub struct SubscribeUseCase {
    registry: Arc<BroadcastRegistry>,
    ping_interval: Duration,
}

impl SubscribeUseCase {
    /// 新しい SubscribeUseCase を作成
    pub fn new(registry: Arc<BroadcastRegistry>, ping_interval: Duration) -> Self {
        Self {
            registry,
            ping_interval: ping_interval.max(MIN_PING_INTERVAL),
        }
    }

    /// 購読を開始
    ///
    /// Does not wait for the connection to end: everything after the
    /// handshake happens in the keep-alive task and in the handle's `Drop`.
    /// Must be called within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `SubscribeError::Handshake` if the sink rejects the `connected`
    /// envelope; the channel is already torn down in that case.
    pub fn execute(
        &self,
        sink: Arc<dyn ChannelSink>,
    ) -> Result<SubscriptionHandle, SubscribeError> {
        let channel = Arc::new(Channel::new(sink));

        if let Err(e) = channel.send(&EventEnvelope::connected()) {
            tracing::warn!(channel_id = %channel.id(), "Handshake failed: {}", e);
            self.registry.teardown(&channel);
            return Err(SubscribeError::Handshake(e));
        }
        self.registry.register(channel.clone());

        let keepalive = spawn_keepalive(channel.clone(), self.registry.clone(), self.ping_interval);
        channel.attach_keepalive(keepalive);

        tracing::info!(
            channel_id = %channel.id(),
            "Channel opened (total: {})",
            self.registry.size()
        );

        Ok(SubscriptionHandle {
            channel,
            registry: self.registry.clone(),
        })
    }
}

/// Owner-side handle of an open channel.
///
/// Dropping it is the abort signal: the keep-alive task is cancelled, the
/// channel is unregistered and its sink closed. Safe after the channel was
/// already torn down by a failed write.
pub struct SubscriptionHandle {
    channel: Arc<Channel>,
    registry: Arc<BroadcastRegistry>,
}

impl SubscriptionHandle {
    pub fn channel_id(&self) -> &ChannelId {
        self.channel.id()
    }

    pub fn is_open(&self) -> bool {
        self.channel.is_open()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if self.registry.teardown(&self.channel) {
            tracing::info!(channel_id = %self.channel.id(), "Client disconnected");
        }
    }
}

fn spawn_keepalive(
    channel: Arc<Channel>,
    registry: Arc<BroadcastRegistry>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if !channel.is_open() {
                break;
            }
            if let Err(e) = channel.send(&EventEnvelope::ping()) {
                tracing::warn!(channel_id = %channel.id(), "Keep-alive ping failed: {}", e);
                registry.teardown(&channel);
                break;
            }
            tracing::debug!(channel_id = %channel.id(), "Sent keep-alive ping");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            AuthorName, Comment, CommunityEvent, EncodedEvent, EventKind, IdFactory,
            NewCommentData, PostBody, ThreadLikedData, Timestamp,
        },
        infrastructure::realtime::testing::RecordingSink,
    };

    const TEST_PING: Duration = Duration::from_millis(50);

    fn create_usecase() -> (SubscribeUseCase, Arc<BroadcastRegistry>) {
        let registry = Arc::new(BroadcastRegistry::new());
        (SubscribeUseCase::new(registry.clone(), TEST_PING), registry)
    }

    fn subscribe(usecase: &SubscribeUseCase) -> (SubscriptionHandle, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let handle = usecase.execute(sink.clone()).unwrap();
        (handle, sink)
    }

    #[tokio::test]
    async fn test_handshake_is_first_envelope() {
        // テスト項目: 最初のエンベロープは必ず connected で、ping はその後
        // given (前提条件):
        let (usecase, registry) = create_usecase();

        // when (操作):
        let (_handle, sink) = subscribe(&usecase);
        tokio::time::sleep(TEST_PING * 3).await;

        // then (期待する結果):
        let envelopes = sink.envelopes();
        assert!(envelopes.len() >= 2, "expected at least one ping");
        assert!(matches!(envelopes[0].kind, EventKind::Connected { .. }));
        assert!(envelopes[1..].iter().all(|e| e.kind == EventKind::Ping));
        assert_eq!(registry.size(), 1);
    }

    #[tokio::test]
    async fn test_no_ping_before_first_interval() {
        let registry = Arc::new(BroadcastRegistry::new());
        let usecase = SubscribeUseCase::new(registry, Duration::from_secs(60));

        let (_handle, sink) = subscribe(&usecase);
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(sink.envelopes().len(), 1);
    }

    #[tokio::test]
    async fn test_drop_handle_tears_down() {
        // テスト項目: 切断（handle の drop）で登録解除・タイマー停止・sink クローズが行われる
        // given (前提条件):
        let (usecase, registry) = create_usecase();
        let (handle, sink) = subscribe(&usecase);
        assert_eq!(registry.size(), 1);

        // when (操作):
        drop(handle);
        let writes_at_close = sink.writes().len();
        tokio::time::sleep(TEST_PING * 3).await;

        // then (期待する結果):
        assert_eq!(registry.size(), 0);
        assert!(sink.is_closed());
        assert_eq!(sink.writes().len(), writes_at_close);
    }

    #[tokio::test]
    async fn test_failed_ping_tears_down_and_later_abort_is_noop() {
        // テスト項目: ping の書き込み失敗で後片付けされ、その後の切断シグナルは何もしない
        // given (前提条件):
        let (usecase, registry) = create_usecase();
        let (handle, sink) = subscribe(&usecase);
        let (_other, _other_sink) = subscribe(&usecase);

        // when (操作):
        sink.fail_writes();
        tokio::time::sleep(TEST_PING * 3).await;

        // then (期待する結果):
        assert!(!handle.is_open());
        assert_eq!(registry.size(), 1);
        assert_eq!(sink.close_calls(), 1);

        drop(handle);
        assert_eq!(registry.size(), 1);
        assert_eq!(sink.close_calls(), 1);
    }

    #[tokio::test]
    async fn test_handshake_failure() {
        // テスト項目: handshake に失敗したチャンネルは登録されない
        let (usecase, registry) = create_usecase();
        let sink = Arc::new(RecordingSink::new());
        sink.fail_writes();

        let result = usecase.execute(sink.clone());

        assert!(matches!(result, Err(SubscribeError::Handshake(_))));
        assert_eq!(registry.size(), 0);
        assert!(sink.is_closed());
    }

    #[tokio::test]
    async fn test_three_clients_scenario() {
        // テスト項目: X, Y, Z の 3 クライアントが購読し、Y の切断後は X と Z にだけ届く
        // given (前提条件):
        let registry = Arc::new(BroadcastRegistry::new());
        let usecase = SubscribeUseCase::new(registry.clone(), DEFAULT_PING_INTERVAL);
        let (_x, sink_x) = subscribe(&usecase);
        let (y, sink_y) = subscribe(&usecase);
        let (_z, sink_z) = subscribe(&usecase);
        for sink in [&sink_x, &sink_y, &sink_z] {
            assert!(matches!(
                sink.envelopes()[0].kind,
                EventKind::Connected { .. }
            ));
        }

        // when (操作): コメント作成の配信
        let thread_id = IdFactory::thread_id();
        let comment = Comment::new(
            thread_id.clone(),
            AuthorName::new("alice".to_string()).unwrap(),
            PostBody::new("First!".to_string()).unwrap(),
            Timestamp::now(),
        );
        let new_comment = EncodedEvent::encode(CommunityEvent::NewComment(NewCommentData {
            thread_id: thread_id.clone(),
            comment,
        }))
        .unwrap();
        registry.publish(&new_comment);

        // then (期待する結果): 全員に new_comment がちょうど 1 件
        for sink in [&sink_x, &sink_y, &sink_z] {
            let envelopes = sink.envelopes();
            assert_eq!(envelopes.len(), 2);
            match &envelopes[1].kind {
                EventKind::NewComment { data } => assert_eq!(data.thread_id, thread_id),
                other => panic!("unexpected envelope: {other:?}"),
            }
        }

        // when (操作): Y が切断し、スレッドへのいいねを配信
        drop(y);
        assert_eq!(registry.size(), 2);
        let thread_liked = EncodedEvent::encode(CommunityEvent::ThreadLiked(ThreadLikedData {
            thread_id: thread_id.clone(),
            likes: 1,
        }))
        .unwrap();
        registry.publish(&thread_liked);

        // then (期待する結果): X と Z のみ受信
        assert_eq!(sink_x.envelopes().len(), 3);
        assert_eq!(sink_z.envelopes().len(), 3);
        assert_eq!(sink_y.envelopes().len(), 2);
        assert_eq!(sink_x.envelopes()[2].kind.event_type(), "thread_liked");
    }

    #[tokio::test]
    async fn test_shutdown_closes_subscriptions() {
        let (usecase, registry) = create_usecase();
        let (handle, sink) = subscribe(&usecase);

        registry.close_all();

        assert!(sink.is_closed());
        assert!(!handle.is_open());
        assert_eq!(registry.size(), 0);
    }
}
