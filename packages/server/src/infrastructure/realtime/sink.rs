//! Channel sink backed by an unbounded mpsc queue.
//!
//! Each item is one envelope's JSON. The HTTP layer turns the receiving half
//! into the Server-Sent Events response, one event per item.
//! When the client disconnects the body (and the receiver) is dropped, so the
//! next write fails with [`SinkError::Closed`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::domain::{ChannelSink, SinkError};

pub struct StreamSink {
    sender: Mutex<Option<mpsc::UnboundedSender<String>>>,
}

impl StreamSink {
    /// Create a sink and the receiver that drains it
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                sender: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    fn sender(&self) -> MutexGuard<'_, Option<mpsc::UnboundedSender<String>>> {
        self.sender.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChannelSink for StreamSink {
    fn write(&self, json: &str) -> Result<(), SinkError> {
        match self.sender().as_ref() {
            Some(tx) => tx.send(json.to_string()).map_err(|_| SinkError::Closed),
            None => Err(SinkError::Closed),
        }
    }

    fn close(&self) -> Result<(), SinkError> {
        // Dropping the only sender ends the receiver's stream
        self.sender().take();
        Ok(())
    }
}
