//! Real-time event vocabulary.
//!
//! Every message pushed to a subscriber is an [`EventEnvelope`]: a tagged
//! [`EventKind`] plus the time the envelope was built. On the wire it is the
//! JSON object `{ "type", "data"?, "message"?, "timestamp" }`, carried as the
//! `data` field of one Server-Sent Event.
//!
//! Publishable events are encoded by the caller into an [`EncodedEvent`]
//! before they reach the broadcast registry, so an unserializable payload is
//! an error at the call site and publishing itself cannot fail.

use serde::{Deserialize, Serialize};

use super::{
    entity::{Comment, Reply},
    error::EncodeError,
    value_object::{CommentId, ThreadId, Timestamp},
};

/// Handshake text sent as the first envelope on every channel.
pub const CONNECTED_MESSAGE: &str = "Connected to community updates";

/// Payload of `new_comment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentData {
    pub thread_id: ThreadId,
    pub comment: Comment,
}

/// Payload of `comment_liked`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentLikedData {
    pub thread_id: ThreadId,
    pub comment_id: CommentId,
    pub likes: u64,
}

/// Payload of `thread_liked`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadLikedData {
    pub thread_id: ThreadId,
    pub likes: u64,
}

/// Payload of `new_reply`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReplyData {
    pub thread_id: ThreadId,
    pub comment_id: CommentId,
    pub reply: Reply,
}

/// Envelope type tag together with its payload.
///
/// The tag fully determines the payload shape. Tags this build does not know
/// decode as [`EventKind::Unknown`] so consumers can skip them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Connected { message: String },
    Ping,
    NewComment { data: NewCommentData },
    CommentLiked { data: CommentLikedData },
    ThreadLiked { data: ThreadLikedData },
    NewReply { data: NewReplyData },
    #[serde(other)]
    Unknown,
}

impl EventKind {
    /// Wire name of the tag, for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            EventKind::Connected { .. } => "connected",
            EventKind::Ping => "ping",
            EventKind::NewComment { .. } => "new_comment",
            EventKind::CommentLiked { .. } => "comment_liked",
            EventKind::ThreadLiked { .. } => "thread_liked",
            EventKind::NewReply { .. } => "new_reply",
            EventKind::Unknown => "unknown",
        }
    }
}

/// Application events that write-side handlers publish to every subscriber.
///
/// Handshake and keep-alive envelopes belong to a single channel and are not
/// publishable, so they have no variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum CommunityEvent {
    NewComment(NewCommentData),
    CommentLiked(CommentLikedData),
    ThreadLiked(ThreadLikedData),
    NewReply(NewReplyData),
}

impl From<CommunityEvent> for EventKind {
    fn from(event: CommunityEvent) -> Self {
        match event {
            CommunityEvent::NewComment(data) => EventKind::NewComment { data },
            CommunityEvent::CommentLiked(data) => EventKind::CommentLiked { data },
            CommunityEvent::ThreadLiked(data) => EventKind::ThreadLiked { data },
            CommunityEvent::NewReply(data) => EventKind::NewReply { data },
        }
    }
}

/// The message unit pushed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(flatten)]
    pub kind: EventKind,
    pub timestamp: Timestamp,
}

impl EventEnvelope {
    /// Build an envelope stamped with the current time
    pub fn new(kind: impl Into<EventKind>) -> Self {
        Self {
            kind: kind.into(),
            timestamp: Timestamp::now(),
        }
    }

    pub fn connected() -> Self {
        Self::new(EventKind::Connected {
            message: CONNECTED_MESSAGE.to_string(),
        })
    }

    pub fn ping() -> Self {
        Self::new(EventKind::Ping)
    }

    /// Envelope as compact JSON.
    ///
    /// Compact JSON never contains a raw newline, so it always fits in a
    /// single SSE `data:` line.
    pub fn to_json(&self) -> Result<String, EncodeError> {
        serde_json::to_string(self).map_err(|e| EncodeError::new(self.kind.event_type(), e))
    }
}

/// A community event stamped and encoded once, ready for fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedEvent {
    envelope: EventEnvelope,
    json: String,
}

impl EncodedEvent {
    /// Stamp `event` with the current time and encode it.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if the payload cannot be serialized.
    pub fn encode(event: CommunityEvent) -> Result<Self, EncodeError> {
        let envelope = EventEnvelope::new(event);
        let json = envelope.to_json()?;
        Ok(Self { envelope, json })
    }

    pub fn envelope(&self) -> &EventEnvelope {
        &self.envelope
    }

    pub fn event_type(&self) -> &'static str {
        self.envelope.kind.event_type()
    }

    /// The envelope JSON written to every channel
    pub fn json(&self) -> &str {
        &self.json
    }
}
