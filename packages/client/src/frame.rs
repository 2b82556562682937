//! Incremental Server-Sent Events framing and tolerant envelope decoding.

use serde::Deserialize;

/// Splits a byte stream into SSE frames.
///
/// Input is processed line by line. A line ends at `\n`, `\r\n` or a bare
/// `\r`, and a blank line dispatches the frame. Bytes may arrive split at any
/// point, including inside a UTF-8 sequence, so an unterminated line stays
/// buffered until its terminator arrives.
#[derive(Debug, Default)]
pub struct FrameParser {
    buffer: Vec<u8>,
    // `buffer[..scanned]` is known to hold no line terminator
    scanned: usize,
    // previous chunk ended in `\r`; a leading `\n` completes that terminator
    skip_lf: bool,
    data: Vec<String>,
}

impl FrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return the `data` payload of every completed frame.
    ///
    /// Multiple `data:` lines within one frame are joined with `\n`; frames
    /// without data (comments, retry hints) yield nothing.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        if chunk.is_empty() {
            return Vec::new();
        }
        let chunk = match chunk.split_first() {
            Some((b'\n', rest)) if self.skip_lf => rest,
            _ => chunk,
        };
        self.skip_lf = false;
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        let mut line_start = 0;
        let mut search_from = self.scanned;
        while let Some(offset) = self.buffer[search_from..]
            .iter()
            .position(|b| matches!(b, b'\n' | b'\r'))
        {
            let line_end = search_from + offset;
            let line = String::from_utf8_lossy(&self.buffer[line_start..line_end]).into_owned();
            line_start = line_end + 1;
            if self.buffer[line_end] == b'\r' {
                match self.buffer.get(line_start) {
                    Some(b'\n') => line_start += 1,
                    Some(_) => {}
                    None => self.skip_lf = true,
                }
            }
            search_from = line_start;

            if let Some(payload) = self.process_line(&line) {
                payloads.push(payload);
            }
        }

        self.buffer.drain(..line_start);
        self.scanned = self.buffer.len();
        payloads
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            if self.data.is_empty() {
                return None;
            }
            return Some(std::mem::take(&mut self.data).join("\n"));
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_string());
        }
        None
    }
}

/// Loosely typed envelope.
///
/// Only `type` is required so envelopes added by newer servers still decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Envelope {
    /// Decode one frame payload
    pub fn decode(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn is_ping(&self) -> bool {
        self.event_type == "ping"
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        let timestamp = self.timestamp.as_deref().unwrap_or("-");
        match (&self.message, &self.data) {
            (Some(message), _) => format!("[{timestamp}] {}: {message}", self.event_type),
            (None, Some(data)) => format!("[{timestamp}] {}: {data}", self.event_type),
            (None, None) => format!("[{timestamp}] {}", self.event_type),
        }
    }
}
