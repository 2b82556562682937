//! Domain layer for the community server.
//!
//! This module contains the forum model and the real-time event vocabulary,
//! plus the traits the outer layers implement (document store, event
//! publisher, transport sink). Nothing here depends on axum or on the
//! concrete in-memory implementations.

pub mod channel;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod publisher;
pub mod repository;
pub mod value_object;

pub use channel::{ChannelSink, ChannelState};
pub use entity::{Comment, Reply, Report, Thread};
pub use error::{EncodeError, RepositoryError, SinkError, ValueObjectError};
pub use event::{
    CommentLikedData, CommunityEvent, EncodedEvent, EventEnvelope, EventKind, NewCommentData,
    NewReplyData, ThreadLikedData,
};
pub use factory::IdFactory;
pub use publisher::EventPublisher;
pub use repository::CommunityRepository;
pub use value_object::{
    AuthorName, ChannelId, CommentId, PostBody, ReplyId, ReportId, ReportReason, ThreadId,
    ThreadTitle, Timestamp,
};
