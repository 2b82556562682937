//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。
//!
//! - 購読（リアルタイムチャンネルのライフサイクル管理）
//! - 書き込み系（スレッド・コメント・返信・いいね・通報）

pub mod create_comment;
pub mod create_reply;
pub mod create_thread;
pub mod error;
pub mod like;
pub mod report_comment;
pub mod subscribe;

pub use create_comment::CreateCommentUseCase;
pub use create_reply::CreateReplyUseCase;
pub use create_thread::CreateThreadUseCase;
pub use error::{CommunityError, SubscribeError};
pub use like::{LikeCommentUseCase, LikeThreadUseCase};
pub use report_comment::ReportCommentUseCase;
pub use subscribe::{DEFAULT_PING_INTERVAL, SubscribeUseCase, SubscriptionHandle};
