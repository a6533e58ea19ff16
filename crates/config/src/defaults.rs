//! Default values for configuration sections

use crate::{LoggingConfig, ServerConfig, ServiceConfig};

/// Default HTTP port for the service
pub const DEFAULT_PORT: u16 = 8080;

/// Symbols registered when generating a fresh configuration
pub const DEFAULT_SYMBOLS: [&str; 2] = ["AAPL", "MSFT"];

pub fn default_service() -> ServiceConfig {
    ServiceConfig {
        name: "crossbook".to_string(),
    }
}

pub fn default_server() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: DEFAULT_PORT,
    }
}

pub fn default_logging() -> LoggingConfig {
    LoggingConfig {
        format: "pretty".to_string(),
        level: "info".to_string(),
    }
}

pub fn default_view_depth() -> usize {
    10
}
