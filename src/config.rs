//! Server configuration, read from command-line flags or the environment.

use crate::{Error, Result};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Screenshot and slide-deck rendering server
#[derive(Debug, Clone, Parser)]
#[command(name = "slidepress", version, about)]
pub struct ServerConfig {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "BIND_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Maximum number of browser sessions alive at once
    #[arg(long, env = "MAX_SESSIONS", default_value_t = num_cpus::get())]
    pub max_sessions: usize,

    /// How long a screenshot target may take to load, in milliseconds
    #[arg(long, env = "NAVIGATION_TIMEOUT_MS", default_value_t = 60_000)]
    pub navigation_timeout_ms: u64,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_body_bytes: usize,

    /// Chrome or Chromium binary (auto-detected when unset)
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Keep Chrome's process sandbox enabled
    #[arg(long, env = "CHROME_SANDBOX")]
    pub sandbox: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            max_sessions: num_cpus::get(),
            navigation_timeout_ms: 60_000,
            max_body_bytes: 10 * 1024 * 1024,
            chrome_path: None,
            sandbox: false,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_sessions == 0 {
            return Err(Error::ConfigError("max_sessions must be at least 1".into()));
        }
        if self.navigation_timeout_ms == 0 {
            return Err(Error::ConfigError("navigation_timeout_ms must be positive".into()));
        }
        if self.max_body_bytes == 0 {
            return Err(Error::ConfigError("max_body_bytes must be positive".into()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}
