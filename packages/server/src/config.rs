//! Server configuration.
//!
//! Command-line flags with environment variable fallbacks, converted into a
//! plain [`ServerConfig`] that the runner and the tests consume.

use std::time::Duration;

use clap::Parser;

use crate::usecase::DEFAULT_PING_INTERVAL;

/// Command-line arguments of `larder-server`
#[derive(Debug, Clone, Parser)]
#[command(name = "larder-server", version, about = "Larder community server")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "LARDER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "LARDER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Seconds between keep-alive pings on each event stream
    #[arg(
        long,
        env = "LARDER_PING_INTERVAL_SECS",
        default_value_t = DEFAULT_PING_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub ping_interval_secs: u64,

    /// Static password required by the admin endpoints
    #[arg(long, env = "LARDER_ADMIN_PASSWORD", default_value = "changeme", hide_env_values = true)]
    pub admin_password: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "LARDER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub ping_interval: Duration,
    pub admin_password: String,
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ping_interval: DEFAULT_PING_INTERVAL,
            admin_password: "changeme".to_string(),
        }
    }
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            ping_interval: Duration::from_secs(args.ping_interval_secs),
            admin_password: args.admin_password,
        }
    }
}
