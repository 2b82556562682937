//! Broadcast Registry: the set of open channels and the fan-out over it.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::domain::{ChannelId, EncodedEvent, EventPublisher};

use super::channel::Channel;

/// Outcome of one publish, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOut {
    /// Channels the envelope was written to
    pub delivered: usize,
    /// Channels removed because their write failed
    pub dropped: usize,
}

/// Registry of live channels.
///
/// A channel is present iff it is still expected to be writable. The map is
/// guarded by a plain mutex that is never held across a sink write: `publish`
/// works on a snapshot, so concurrent register/unregister calls never observe
/// a half-iterated set.
#[derive(Default)]
pub struct BroadcastRegistry {
    channels: Mutex<HashMap<ChannelId, Arc<Channel>>>,
}

impl BroadcastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel. Registering the same id again replaces the entry.
    pub fn register(&self, channel: Arc<Channel>) {
        let mut channels = self.channels();
        channels.insert(channel.id().clone(), channel);
        tracing::debug!("Channel registered (total: {})", channels.len());
    }

    /// Remove a channel if present. Returns whether anything was removed.
    pub fn unregister(&self, channel_id: &ChannelId) -> bool {
        let mut channels = self.channels();
        let removed = channels.remove(channel_id).is_some();
        if removed {
            tracing::debug!("Channel unregistered (total: {})", channels.len());
        }
        removed
    }

    /// Fan `event` out to every registered channel.
    ///
    /// A channel whose write fails is torn down and dropped from the set; the
    /// failure is logged and never reaches the caller. A channel that is
    /// already closing (client abort or shutdown racing this publish) is
    /// skipped.
    pub fn publish(&self, event: &EncodedEvent) -> FanOut {
        let event_type = event.event_type();
        let targets = self.snapshot();
        let mut fan_out = FanOut::default();

        for channel in &targets {
            match channel.write_json(event.json()) {
                Ok(()) => fan_out.delivered += 1,
                Err(_) if !channel.is_open() => {
                    tracing::debug!(
                        channel_id = %channel.id(),
                        "Skipped '{}' for closing channel",
                        event_type
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        channel_id = %channel.id(),
                        "Failed to deliver '{}': {}; dropping channel",
                        event_type,
                        e
                    );
                    self.teardown(channel);
                    fan_out.dropped += 1;
                }
            }
        }

        tracing::debug!(
            "Broadcast '{}' to {}/{} channels",
            event_type,
            fan_out.delivered,
            targets.len()
        );
        fan_out
    }

    /// Number of registered channels
    pub fn size(&self) -> usize {
        self.channels().len()
    }

    /// Tear a channel down: cancel its keep-alive, unregister it, close its sink.
    ///
    /// Idempotent. Returns `true` only for the call that actually closed it.
    pub fn teardown(&self, channel: &Channel) -> bool {
        if !channel.begin_close() {
            return false;
        }
        channel.cancel_keepalive();
        self.unregister(channel.id());
        channel.release();
        tracing::info!(
            channel_id = %channel.id(),
            "Channel closed (remaining: {})",
            self.size()
        );
        true
    }

    /// Close every channel. Used on process shutdown so open streams end.
    pub fn close_all(&self) {
        let targets = self.snapshot();
        let count = targets.len();
        for channel in &targets {
            self.teardown(channel);
        }
        tracing::info!("Closed {} channel(s) for shutdown", count);
    }

    fn snapshot(&self) -> Vec<Arc<Channel>> {
        self.channels().values().cloned().collect()
    }

    fn channels(&self) -> MutexGuard<'_, HashMap<ChannelId, Arc<Channel>>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventPublisher for BroadcastRegistry {
    fn publish(&self, event: EncodedEvent) {
        BroadcastRegistry::publish(self, &event);
    }

    fn connection_count(&self) -> usize {
        self.size()
    }
}
