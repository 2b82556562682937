//! Domain factories for creating identifiers.

use uuid::Uuid;

use super::{ChannelId, CommentId, ReplyId, ReportId, ThreadId};

/// Factory for generating identifier instances.
///
/// Keeps the generation concern (random UUID v4) apart from the validation
/// logic in the identifier value objects.
pub struct IdFactory;

impl IdFactory {
    pub fn thread_id() -> ThreadId {
        ThreadId::from_uuid(Uuid::new_v4())
    }

    pub fn comment_id() -> CommentId {
        CommentId::from_uuid(Uuid::new_v4())
    }

    pub fn reply_id() -> ReplyId {
        ReplyId::from_uuid(Uuid::new_v4())
    }

    pub fn report_id() -> ReportId {
        ReportId::from_uuid(Uuid::new_v4())
    }

    pub fn channel_id() -> ChannelId {
        ChannelId::from_uuid(Uuid::new_v4())
    }
}
