//! Larder community server.
//!
//! Forum CRUD handlers over a document store, plus the real-time broadcast
//! channel that pushes comment / like / reply events to every connected
//! browser over Server-Sent Events.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{ServerArgs, ServerConfig};
pub use ui::{run, serve};
