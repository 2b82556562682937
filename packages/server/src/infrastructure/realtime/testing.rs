//! Test doubles for channel sinks.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use crate::domain::{ChannelSink, EventEnvelope, SinkError};

/// Records every envelope JSON written to it; can be switched to fail writes.
#[derive(Default)]
pub struct RecordingSink {
    writes: Mutex<Vec<String>>,
    failing: AtomicBool,
    closed: AtomicBool,
    close_calls: AtomicUsize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, as if the peer went away
    pub fn fail_writes(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    /// Decode every recorded write back into an envelope
    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        self.writes()
            .iter()
            .map(|json| serde_json::from_str(json).expect("write is not a valid envelope"))
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

impl ChannelSink for RecordingSink {
    fn write(&self, json: &str) -> Result<(), SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Rejected("peer went away".to_string()));
        }
        if self.is_closed() {
            return Err(SinkError::Closed);
        }
        self.writes.lock().unwrap().push(json.to_string());
        Ok(())
    }

    fn close(&self) -> Result<(), SinkError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
