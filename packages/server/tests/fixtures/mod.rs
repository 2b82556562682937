//! Test fixtures: an in-process server on an ephemeral port.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use larder_server::{ServerConfig, serve, ui::state::AppState};
use tokio::{net::TcpListener, sync::oneshot};

pub const ADMIN_PASSWORD: &str = "test-admin";
pub const PING_INTERVAL: Duration = Duration::from_millis(300);

/// Running server; shut down when dropped
pub struct TestServer {
    base_url: String,
    state: Arc<AppState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_ping_interval(PING_INTERVAL).await
    }

    /// Start with a custom keep-alive interval
    pub async fn start_with_ping_interval(ping_interval: Duration) -> Self {
        let config = ServerConfig {
            port: 0,
            ping_interval,
            admin_password: ADMIN_PASSWORD.to_string(),
            ..ServerConfig::default()
        };
        let listener = TcpListener::bind(config.bind_addr())
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let state = Arc::new(AppState::new(&config));

        let (tx, rx) = oneshot::channel::<()>();
        let server_state = state.clone();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            if let Err(e) = serve(listener, server_state, shutdown).await {
                eprintln!("test server error: {e}");
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            shutdown: Some(tx),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Wait until the registry holds `expected` channels
    pub async fn wait_for_connections(&self, expected: usize) {
        for _ in 0..100 {
            if self.state.registry.size() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!(
            "expected {expected} connections, found {}",
            self.state.registry.size()
        );
    }

    /// Whether the registry drops to `expected` channels within `timeout`
    pub async fn connections_reach(&self, expected: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if self.state.registry.size() == expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.state.registry.size() == expected
    }

    /// Create a thread and return its JSON representation
    pub async fn create_thread(&self, client: &reqwest::Client, title: &str) -> serde_json::Value {
        client
            .post(self.url("/api/community/threads"))
            .json(&serde_json::json!({
                "title": title,
                "body": "Tell us everything",
                "author": "alice",
            }))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }

    /// Comment on a thread and return the comment JSON
    pub async fn create_comment(
        &self,
        client: &reqwest::Client,
        thread_id: &str,
        body: &str,
    ) -> serde_json::Value {
        client
            .post(self.url(&format!("/api/community/threads/{thread_id}/comments")))
            .json(&serde_json::json!({ "author": "bob", "body": body }))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Reads `data:` frames off a streaming SSE response
pub struct EventReader {
    response: reqwest::Response,
    buffer: String,
}

impl EventReader {
    pub fn new(response: reqwest::Response) -> Self {
        Self {
            response,
            buffer: String::new(),
        }
    }

    /// Next envelope as JSON, or `None` once the stream ended
    pub async fn next(&mut self) -> Option<serde_json::Value> {
        loop {
            if let Some(end) = self.buffer.find("\n\n") {
                let frame: String = self.buffer.drain(..end + 2).collect();
                let data = frame
                    .lines()
                    .filter_map(|line| line.strip_prefix("data:"))
                    .map(str::trim_start)
                    .collect::<Vec<_>>()
                    .join("\n");
                return Some(serde_json::from_str(&data).expect("Invalid envelope JSON"));
            }
            let chunk = self.response.chunk().await.expect("Failed to read stream")?;
            self.buffer.push_str(std::str::from_utf8(&chunk).expect("Non UTF-8 frame"));
        }
    }

    /// Next envelope that is not a keep-alive ping
    pub async fn next_event(&mut self) -> Option<serde_json::Value> {
        loop {
            let envelope = self.next().await?;
            if envelope["type"] != "ping" {
                return Some(envelope);
            }
        }
    }

    /// Next envelope, failing the test if none arrives within `timeout`
    pub async fn next_within(&mut self, timeout: Duration) -> serde_json::Value {
        tokio::time::timeout(timeout, self.next_event())
            .await
            .expect("Timed out waiting for an event")
            .expect("Stream ended")
    }
}
