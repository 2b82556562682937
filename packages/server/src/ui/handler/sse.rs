//! Server-Sent Events endpoint.
//!
//! Each request becomes one channel in the broadcast registry. The response
//! body drains the channel's queue of envelope JSON and frames each entry as
//! an SSE `data:` event; the [`SubscriptionHandle`] lives inside the body, so
//! when hyper drops the body on client disconnect the channel is torn down.

use std::{
    convert::Infallible,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::State,
    http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONNECTION},
    response::{
        IntoResponse, Response,
        sse::{Event, Sse},
    },
};
use futures_util::Stream;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    infrastructure::realtime::StreamSink,
    ui::state::AppState,
    usecase::{SubscribeUseCase, SubscriptionHandle},
};

use super::error::ApiError;

/// Open an event stream
pub async fn subscribe_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let (sink, rx) = StreamSink::new();
    let handle = SubscribeUseCase::new(state.registry.clone(), state.ping_interval)
        .execute(Arc::new(sink))?;

    let stream = SubscriptionStream { rx, _handle: handle };

    // Headers are applied after `Sse` sets its own, so this cache-control wins.
    Ok((
        [
            (CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (CONNECTION, "keep-alive"),
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        Sse::new(stream),
    )
        .into_response())
}

/// Response body of one subscription
struct SubscriptionStream {
    rx: UnboundedReceiver<String>,
    _handle: SubscriptionHandle,
}

impl Stream for SubscriptionStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx
            .poll_recv(cx)
            .map(|json| json.map(|json| Ok(Event::default().data(json))))
    }
}
