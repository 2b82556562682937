//! Larder community event watcher.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin larder-watch -- --url http://127.0.0.1:8080/api/community/events --types new_comment,new_reply
//! ```

use clap::Parser;
use larder_client::{TypeFilter, WatchError, WatchOptions, run_watch};
use larder_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "larder-watch", version, about = "Print Larder community events as they happen")]
struct Args {
    /// Event stream URL
    #[arg(
        short,
        long,
        env = "LARDER_EVENTS_URL",
        default_value = "http://127.0.0.1:8080/api/community/events"
    )]
    url: String,

    /// Only print these event types (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    types: Vec<String>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let options = WatchOptions {
        url: args.url,
        filter: TypeFilter::new(args.types),
    };

    match run_watch(&options, |envelope| println!("{}", envelope.summary())).await {
        Ok(()) => {}
        Err(WatchError::Ended) => tracing::info!("Server closed the event stream"),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
