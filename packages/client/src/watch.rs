//! Event stream watcher.

use std::collections::HashSet;

use crate::{
    error::WatchError,
    frame::{Envelope, FrameParser},
};

/// Envelope types to print. Empty means everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    types: HashSet<String>,
}

impl TypeFilter {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types
                .into_iter()
                .map(|t| {
                    let t: String = t.into();
                    t.trim().to_string()
                })
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn accepts(&self, event_type: &str) -> bool {
        self.types.is_empty() || self.types.contains(event_type)
    }
}

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub url: String,
    pub filter: TypeFilter,
}

/// Stream envelopes from `options.url`, passing each accepted one to `on_event`.
///
/// Pings are never passed on. Frames that fail to decode are logged and
/// skipped.
///
/// # Errors
///
/// Returns an error if the request fails, the response is not an event
/// stream, or the stream breaks. A clean end of stream is `WatchError::Ended`.
pub async fn run_watch<F>(options: &WatchOptions, mut on_event: F) -> Result<(), WatchError>
where
    F: FnMut(&Envelope),
{
    let client = reqwest::Client::new();
    let mut response = client
        .get(&options.url)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(WatchError::Status(response.status()));
    }
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.starts_with("text/event-stream") {
        return Err(WatchError::ContentType(content_type));
    }

    tracing::info!("Subscribed to {}", options.url);

    let mut parser = FrameParser::new();
    while let Some(chunk) = response.chunk().await? {
        for payload in parser.feed(&chunk) {
            dispatch(&payload, &options.filter, &mut on_event);
        }
    }

    Err(WatchError::Ended)
}

fn dispatch<F>(payload: &str, filter: &TypeFilter, on_event: &mut F)
where
    F: FnMut(&Envelope),
{
    let envelope = match Envelope::decode(payload) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!("Skipping undecodable frame: {}", e);
            return;
        }
    };

    if envelope.is_ping() {
        tracing::debug!("Received keep-alive ping");
        return;
    }
    if filter.accepts(&envelope.event_type) {
        on_event(&envelope);
    } else {
        tracing::trace!("Filtered out '{}'", envelope.event_type);
    }
}
