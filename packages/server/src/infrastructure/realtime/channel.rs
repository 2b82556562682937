//! One subscriber's live connection.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU8, Ordering},
};

use tokio::task::JoinHandle;

use crate::domain::{ChannelId, ChannelSink, ChannelState, EventEnvelope, IdFactory, SinkError};

/// A registered output channel.
///
/// Holds the transport sink, the lifecycle state and the handle of the
/// keep-alive task, so whichever path tears the channel down (client abort,
/// failed broadcast, failed ping, shutdown) can reach all three.
pub struct Channel {
    id: ChannelId,
    sink: Arc<dyn ChannelSink>,
    state: AtomicU8,
    keepalive: Mutex<Option<JoinHandle<()>>>,
}

impl Channel {
    /// Wrap a sink in a new channel in the `Open` state
    pub fn new(sink: Arc<dyn ChannelSink>) -> Self {
        Self {
            id: IdFactory::channel_id(),
            sink,
            state: AtomicU8::new(ChannelState::Open as u8),
            keepalive: Mutex::new(None),
        }
    }

    pub fn id(&self) -> &ChannelId {
        &self.id
    }

    pub fn state(&self) -> ChannelState {
        ChannelState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_open(&self) -> bool {
        self.state() == ChannelState::Open
    }

    /// Write already encoded envelope JSON. Fails without touching the sink unless open.
    pub fn write_json(&self, json: &str) -> Result<(), SinkError> {
        if !self.is_open() {
            return Err(SinkError::Closed);
        }
        self.sink.write(json)
    }

    /// Encode and write one of this channel's own envelopes (handshake, ping).
    ///
    /// An encoding failure counts as a write failure.
    pub fn send(&self, envelope: &EventEnvelope) -> Result<(), SinkError> {
        let json = envelope
            .to_json()
            .map_err(|e| SinkError::Rejected(e.to_string()))?;
        self.write_json(&json)
    }

    /// Store the keep-alive task handle.
    ///
    /// If the channel already left `Open`, the task is aborted right away.
    pub fn attach_keepalive(&self, handle: JoinHandle<()>) {
        let mut slot = self.keepalive_slot();
        if self.is_open() {
            *slot = Some(handle);
        } else {
            handle.abort();
        }
    }

    /// `Open` → `Closing`. Returns `true` only for the caller that won the transition.
    pub fn begin_close(&self) -> bool {
        self.state
            .compare_exchange(
                ChannelState::Open as u8,
                ChannelState::Closing as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Abort the keep-alive task if one is attached
    pub fn cancel_keepalive(&self) {
        if let Some(handle) = self.keepalive_slot().take() {
            handle.abort();
        }
    }

    /// Close the sink (errors swallowed) and enter `Closed`
    pub fn release(&self) {
        if let Err(e) = self.sink.close() {
            tracing::debug!(channel_id = %self.id, "Ignoring sink close error: {}", e);
        }
        self.state.store(ChannelState::Closed as u8, Ordering::Release);
    }

    fn keepalive_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.keepalive.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}
