//! Server configuration from flags and environment

use clap::{Parser, ValueEnum};
use std::time::Duration;

/// Default bound on a single backend call
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 2000;

/// Which document backend holds the voter records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Process-local map, contents are lost on restart
    Memory,
    /// Redis with the RedisJSON module
    Redis,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "voter-server")]
#[command(version, about = "REST service for voters and their poll history", long_about = None)]
pub struct Config {
    /// Interface to listen on
    #[arg(short = 'H', long, env = "VOTER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "VOTER_PORT", default_value_t = 1080)]
    pub port: u16,

    /// Record backend
    #[arg(long, env = "VOTER_BACKEND", value_enum, default_value_t = Backend::Redis)]
    pub backend: Backend,

    /// Redis location, either a URL or host:port
    #[arg(long, env = "REDIS_URL", default_value = "redis://0.0.0.0:6379")]
    pub redis_url: String,

    /// Upper bound for each backend call, in milliseconds
    #[arg(long, env = "VOTER_STORE_TIMEOUT_MS", default_value_t = DEFAULT_STORE_TIMEOUT_MS)]
    pub store_timeout_ms: u64,

    /// Insert the sample voters once at startup
    #[arg(long, env = "VOTER_SEED")]
    pub seed: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "VOTER_LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
