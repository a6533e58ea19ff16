//! Server configuration

use crate::error::{Result, ServerError};
use std::net::SocketAddr;

/// Listener configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// HTTP port
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The socket address this configuration binds to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        if self.host.trim().is_empty() {
            return Err(ServerError::ConfigError("host not configured".into()));
        }
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}
