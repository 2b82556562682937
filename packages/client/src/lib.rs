//! Larder community event watcher.
//!
//! Connects to the server's event stream and turns the raw SSE bytes into
//! envelopes that a terminal can print.

pub mod error;
pub mod frame;
pub mod watch;

pub use error::WatchError;
pub use frame::{Envelope, FrameParser};
pub use watch::{TypeFilter, WatchOptions, run_watch};
