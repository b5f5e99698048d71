//! Server configuration from command line flags and environment variables.

use std::time::Duration;

use clap::Parser;

/// Duet chat server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "duet-server", version, about = "Two-party chat server with WebSocket broadcast")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "DUET_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "DUET_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "DUET_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,

    /// Deadline for each store call, in milliseconds
    #[arg(
        long,
        env = "DUET_STORE_TIMEOUT_MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub store_timeout_ms: Option<u64>,
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_timeout(&self) -> Option<Duration> {
        self.store_timeout_ms.map(Duration::from_millis)
    }
}
