//! Transport capability for one subscriber's live connection.

use super::error::SinkError;

/// Where a channel's bytes go.
///
/// Implementations wrap a runtime-specific transport (an HTTP streaming
/// response body, a socket, ...). Both operations must be cheap and must not
/// block; `close` must tolerate being called more than once.
pub trait ChannelSink: Send + Sync {
    /// Push one encoded envelope (JSON) to the subscriber.
    fn write(&self, json: &str) -> Result<(), SinkError>;

    /// Release the transport. Further writes fail with [`SinkError::Closed`].
    fn close(&self) -> Result<(), SinkError>;
}

/// Lifecycle state of a channel.
///
/// `Open` → `Closing` → `Closed`. No writes are attempted outside `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChannelState {
    Open = 0,
    Closing = 1,
    Closed = 2,
}

impl ChannelState {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => ChannelState::Open,
            1 => ChannelState::Closing,
            _ => ChannelState::Closed,
        }
    }
}
