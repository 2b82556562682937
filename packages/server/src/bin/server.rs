//! Larder community server.
//!
//! Serves the forum API and streams community events to connected browsers.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin larder-server -- --port 8080
//! ```

use clap::Parser;
use larder_server::{ServerArgs, ServerConfig};
use larder_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    if let Err(e) = larder_server::run(ServerConfig::from(args)).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
