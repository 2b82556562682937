//! In-process real-time broadcast channel.
//!
//! - [`Channel`]: one subscriber's live connection and its keep-alive task
//! - [`BroadcastRegistry`]: the set of open channels and the fan-out
//! - [`StreamSink`]: a [`ChannelSink`](crate::domain::ChannelSink) feeding an
//!   HTTP streaming response body

pub mod channel;
pub mod registry;
pub mod sink;

pub use channel::Channel;
pub use registry::{BroadcastRegistry, FanOut};
pub use sink::StreamSink;

#[cfg(test)]
pub(crate) mod testing;
