//! Shared utilities for the Larder server and client.

pub mod logger;
pub mod time;
