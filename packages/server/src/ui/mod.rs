//! HTTP server: router, handlers and shared state.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_router, run, serve};
