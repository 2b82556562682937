//! Server runner.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::{handler, signal::shutdown_signal, state::AppState};

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health_check))
        .route("/api/community/events", get(handler::subscribe_handler))
        .route("/api/community/connections", get(handler::connection_count))
        .route(
            "/api/community/threads",
            get(handler::list_threads).post(handler::create_thread),
        )
        .route("/api/community/threads/{thread_id}", get(handler::get_thread))
        .route(
            "/api/community/threads/{thread_id}/like",
            post(handler::like_thread),
        )
        .route(
            "/api/community/threads/{thread_id}/comments",
            post(handler::create_comment),
        )
        .route(
            "/api/community/threads/{thread_id}/comments/{comment_id}/like",
            post(handler::like_comment),
        )
        .route(
            "/api/community/threads/{thread_id}/comments/{comment_id}/replies",
            post(handler::create_reply),
        )
        .route(
            "/api/community/threads/{thread_id}/comments/{comment_id}/report",
            post(handler::report_comment),
        )
        .route("/api/admin/reports", get(handler::list_reports))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl+C / SIGTERM
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let state = Arc::new(AppState::new(&config));
    serve(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// On shutdown every open event stream is closed first, otherwise the
/// long-lived responses would keep graceful shutdown waiting forever.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let registry = state.registry.clone();
    let app = build_router(state);

    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            registry.close_all();
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
