//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Declares a UUID-backed identifier value object.
///
/// `$field` is the wire name used in validation messages.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, validating the UUID format.
            pub fn new(id: String) -> Result<Self, ValueObjectError> {
                if id.is_empty() {
                    return Err(ValueObjectError::Empty {
                        field: $field,
                    });
                }
                if Uuid::parse_str(&id).is_err() {
                    return Err(ValueObjectError::InvalidId {
                        field: $field,
                        value: id,
                    });
                }
                Ok(Self(id))
            }

            /// Create an identifier from a UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid.to_string())
            }

            /// Get the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert to owned String.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// Declares a length-limited text value object.
macro_rules! bounded_text {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_CHARS: usize = $max;

            /// Create a new value. Surrounding whitespace is trimmed first.
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValueObjectError::Empty {
                        field: $field,
                    });
                }
                let len = trimmed.chars().count();
                if len > Self::MAX_CHARS {
                    return Err(ValueObjectError::TooLong {
                        field: $field,
                        max: Self::MAX_CHARS,
                        actual: len,
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Get the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Forum thread identifier.
    ThreadId,
    "threadId"
);
uuid_id!(
    /// Comment identifier.
    CommentId,
    "commentId"
);
uuid_id!(
    /// Reply identifier.
    ReplyId,
    "replyId"
);
uuid_id!(
    /// Moderation report identifier.
    ReportId,
    "reportId"
);
uuid_id!(
    /// Identifier of one subscriber's live connection.
    ChannelId,
    "channelId"
);

bounded_text!(
    /// Display name of whoever wrote a thread, comment or reply.
    AuthorName,
    "author",
    100
);
bounded_text!(
    /// Thread title.
    ThreadTitle,
    "title",
    200
);
bounded_text!(
    /// Body text of a thread, comment or reply.
    PostBody,
    "body",
    5000
);
bounded_text!(
    /// Free-text reason attached to a moderation report.
    ReportReason,
    "reason",
    1000
);

/// Point in time, stored as Unix milliseconds (UTC).
///
/// Serialized as an RFC 3339 string so every timestamp on the wire is ISO 8601.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn now() -> Self {
        Self(larder_shared::time::now_millis())
    }

    /// Unix milliseconds.
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn to_rfc3339(&self) -> String {
        larder_shared::time::millis_to_rfc3339(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| Self(dt.with_timezone(&Utc).timestamp_millis()))
            .map_err(serde::de::Error::custom)
    }
}
