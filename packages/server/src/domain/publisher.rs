//! Publish side of the real-time broadcast channel.

use super::event::EncodedEvent;

/// Fan-out of community events to every connected subscriber.
///
/// Write-side use cases depend on this trait rather than on the concrete
/// registry. Events arrive already encoded, so publishing is fire-and-forget
/// and has no error path.
#[cfg_attr(test, mockall::automock)]
pub trait EventPublisher: Send + Sync {
    /// Deliver `event` to every currently open channel.
    fn publish(&self, event: EncodedEvent);

    /// Number of currently open channels (diagnostics only).
    fn connection_count(&self) -> usize;
}
