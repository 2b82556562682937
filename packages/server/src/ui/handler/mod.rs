//! Handler modules for the HTTP API and the event stream.

mod error;
pub mod http;
pub mod sse;

// Re-export HTTP handlers
pub use http::{
    connection_count, create_comment, create_reply, create_thread, get_thread, health_check,
    like_comment, like_thread, list_reports, list_threads, report_comment,
};

// Re-export the event stream handler
pub use sse::subscribe_handler;
